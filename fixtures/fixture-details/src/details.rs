// Copyright (c) The range-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::value_generator::ValueGenerator;
use camino::{Utf8Path, Utf8PathBuf};
use color_eyre::{
    eyre::{bail, eyre, WrapErr},
    Result,
};
use itertools::Itertools;
use range_min::{display::RulesDisplay, table::Rule, term::Term};
use std::{fmt, fs, ops::RangeInclusive, str::FromStr};

/// How many consecutive combinations share a mode, and so how much a table can be merged.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MergeLevel {
    Low,
    Medium,
    High,
}

impl MergeLevel {
    /// Maps the `1`, `2` or `3` of a config file to a merge level.
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(MergeLevel::Low),
            2 => Some(MergeLevel::Medium),
            3 => Some(MergeLevel::High),
            _ => None,
        }
    }

    /// The range run lengths are drawn from.
    pub fn run_lengths(self) -> RangeInclusive<usize> {
        match self {
            MergeLevel::Low => 1..=3,
            MergeLevel::Medium => 6..=9,
            MergeLevel::High => 18..=22,
        }
    }
}

/// Settings for generating random tables.
///
/// The file format is six lines:
///
/// ```text
/// <table count>
/// <min variables> <max variables>
/// <min modes> <max modes>
/// <min values per variable> <max values per variable>
/// <merge level: 1, 2 or 3>
/// <max entries per table, or 0 for no limit>
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub table_count: usize,
    pub variable_count: RangeInclusive<usize>,
    pub mode_count: RangeInclusive<usize>,
    pub value_count: RangeInclusive<u32>,
    pub merge_level: MergeLevel,
    pub entries_max: usize,
}

impl GeneratorConfig {
    pub fn from_path(path: impl AsRef<Utf8Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents =
            fs::read_to_string(path).wrap_err_with(|| format!("failed to read {}", path))?;
        contents
            .parse()
            .wrap_err_with(|| format!("invalid generator config at {}", path))
    }

    /// The number of entries in a table with these per-variable value counts.
    pub fn entry_count(&self, value_counts: &[u32]) -> usize {
        let combinations = value_counts
            .iter()
            .fold(1usize, |acc, &count| acc.saturating_mul(count as usize));
        if self.entries_max == 0 {
            combinations
        } else {
            combinations.min(self.entries_max)
        }
    }
}

impl FromStr for GeneratorConfig {
    type Err = color_eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines().map(str::trim).filter(|line| !line.is_empty());
        let mut next_line = |what: &str| lines.next().ok_or_else(|| eyre!("missing {}", what));

        let table_count = parse_field(next_line("table count")?, "table count")?;
        let variable_count = parse_range(next_line("variable count range")?, "variable count")?;
        let mode_count = parse_range(next_line("mode count range")?, "mode count")?;
        let value_count = parse_range(next_line("value count range")?, "value count")?;
        let level: u8 = parse_field(next_line("merge level")?, "merge level")?;
        let merge_level = MergeLevel::from_level(level)
            .ok_or_else(|| eyre!("merge level must be 1, 2 or 3, found {}", level))?;
        let entries_max = parse_field(next_line("entry limit")?, "entry limit")?;

        if *variable_count.start() == 0 {
            bail!("tables need at least one variable");
        }
        if *mode_count.start() == 0 {
            bail!("tables need at least one mode");
        }
        if *value_count.start() == 0 {
            bail!("variables need at least one value");
        }

        Ok(Self {
            table_count,
            variable_count,
            mode_count,
            value_count,
            merge_level,
            entries_max,
        })
    }
}

fn parse_field<T>(s: &str, what: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    s.parse()
        .wrap_err_with(|| format!("invalid {} `{}`", what, s))
}

fn parse_range<T>(s: &str, what: &str) -> Result<RangeInclusive<T>>
where
    T: FromStr + PartialOrd + fmt::Display,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let (min, max) = s
        .split_whitespace()
        .collect_tuple()
        .ok_or_else(|| eyre!("expected `<min> <max>` for {}, found `{}`", what, s))?;
    let (min, max): (T, T) = (parse_field(min, what)?, parse_field(max, what)?);
    if min > max {
        bail!("{} range is inverted: {} > {}", what, min, max);
    }
    Ok(min..=max)
}

/// Generates random mode tables.
///
/// Value combinations are enumerated in lexicographic order and handed out in runs sharing a
/// mode, so that neighbouring entries can be merged. A twentieth of the entries get a random mode
/// each.
#[derive(Clone, Debug)]
pub struct TableGenerator<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> TableGenerator<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn generate(&self, gen: &mut ValueGenerator) -> GeneratedTable {
        let config = self.config;
        let variable_count = gen.generate(config.variable_count.clone());
        let mode_count = gen.generate(config.mode_count.clone());
        let value_counts: Vec<u32> = gen.generate(proptest::collection::vec(
            config.value_count.clone(),
            variable_count,
        ));

        let entry_count = config.entry_count(&value_counts);
        let structured_count = entry_count * 95 / 100;
        let mut combinations = value_counts
            .iter()
            .map(|&count| 0..count)
            .multi_cartesian_product()
            .map(Term::minterm)
            .take(entry_count);

        let mut rules = Vec::with_capacity(entry_count);
        while rules.len() < structured_count {
            let mode = gen.generate(0..mode_count);
            let run_length = gen.generate(config.merge_level.run_lengths());
            let remaining = structured_count - rules.len();
            rules.extend(
                combinations
                    .by_ref()
                    .take(run_length.min(remaining))
                    .map(|term| Rule { term, mode }),
            );
        }
        for term in combinations {
            let mode = gen.generate(0..mode_count);
            rules.push(Rule { term, mode });
        }

        GeneratedTable {
            value_counts,
            mode_count,
            rules,
        }
    }
}

/// A table produced by [`TableGenerator`]. Its `Display` output is the mode table file format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedTable {
    pub value_counts: Vec<u32>,
    pub mode_count: usize,
    pub rules: Vec<Rule>,
}

impl fmt::Display for GeneratedTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.value_counts.len())?;
        writeln!(f, "{}", self.mode_count)?;
        for count in &self.value_counts {
            writeln!(f, "0 {} 1", count)?;
        }
        write!(f, "{}", RulesDisplay::new(&self.rules))
    }
}

/// Appends `_<number>` to the file stem of `path`: `out.txt` becomes `out_2.txt`.
pub fn numbered_path(path: &Utf8Path, number: usize) -> Utf8PathBuf {
    let stem = path.file_stem().unwrap_or_default();
    let file_name = match path.extension() {
        Some(extension) => format!("{}_{}.{}", stem, number, extension),
        None => format!("{}_{}", stem, number),
    };
    path.with_file_name(file_name)
}

/// The path minimized output for `table` goes to: `table.txt` becomes `table.min.txt`.
pub fn minimized_path(table: &Utf8Path) -> Utf8PathBuf {
    let stem = table.file_stem().unwrap_or_default();
    let file_name = match table.extension() {
        Some(extension) => format!("{}.min.{}", stem, extension),
        None => format!("{}.min", stem),
    };
    table.with_file_name(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use range_min::table::ModeTable;
    use std::collections::HashSet;
    use test_log::test;

    static CONFIG: &str = "2\n2 3\n2 4\n3 5\n2\n200\n";

    #[test]
    fn test_parse_config() {
        let config: GeneratorConfig = CONFIG.parse().unwrap();
        assert_eq!(
            config,
            GeneratorConfig {
                table_count: 2,
                variable_count: 2..=3,
                mode_count: 2..=4,
                value_count: 3..=5,
                merge_level: MergeLevel::Medium,
                entries_max: 200,
            }
        );
        assert_eq!(config.entry_count(&[3, 4]), 12);
        assert_eq!(config.entry_count(&[5, 5, 5, 5]), 200);

        let unlimited: GeneratorConfig = "1\n1 1\n1 1\n2 2\n1\n0\n".parse().unwrap();
        assert_eq!(unlimited.entry_count(&[5, 5, 5, 5]), 625);
    }

    #[test]
    fn test_parse_config_errors() {
        for bad in [
            "",
            "2\n2 3\n",
            "x\n2 3\n2 4\n3 5\n2\n200\n",
            "2\n3 2\n2 4\n3 5\n2\n200\n",
            "2\n2\n2 4\n3 5\n2\n200\n",
            "2\n2 3\n2 4\n3 5\n4\n200\n",
            "2\n0 3\n2 4\n3 5\n2\n200\n",
            "2\n2 3\n0 4\n3 5\n2\n200\n",
            "2\n2 3\n2 4\n0 5\n2\n200\n",
        ] {
            assert!(bad.parse::<GeneratorConfig>().is_err(), "{:?} is rejected", bad);
        }
    }

    #[test]
    fn test_merge_levels() {
        assert_eq!(MergeLevel::from_level(1), Some(MergeLevel::Low));
        assert_eq!(MergeLevel::from_level(3), Some(MergeLevel::High));
        assert_eq!(MergeLevel::from_level(0), None);
        assert_eq!(MergeLevel::Medium.run_lengths(), 6..=9);
    }

    #[test]
    fn test_paths() {
        assert_eq!(numbered_path(Utf8Path::new("out.txt"), 2), Utf8PathBuf::from("out_2.txt"));
        assert_eq!(
            numbered_path(Utf8Path::new("data/table"), 0),
            Utf8PathBuf::from("data/table_0")
        );
        assert_eq!(
            minimized_path(Utf8Path::new("data/table_1.txt")),
            Utf8PathBuf::from("data/table_1.min.txt")
        );
    }

    #[test]
    fn test_generate() {
        let config: GeneratorConfig = CONFIG.parse().unwrap();
        let generator = TableGenerator::new(&config);
        let table = generator.generate(&mut ValueGenerator::from_seed("test_generate"));
        let again = generator.generate(&mut ValueGenerator::from_seed("test_generate"));
        assert_eq!(table, again, "generation is reproducible");

        assert!(config.variable_count.contains(&table.value_counts.len()));
        assert!(config.mode_count.contains(&table.mode_count));
        assert!(table
            .value_counts
            .iter()
            .all(|count| config.value_count.contains(count)));
        assert_eq!(table.rules.len(), config.entry_count(&table.value_counts));
        assert!(table.rules.iter().all(|rule| rule.mode < table.mode_count));

        // Entries are distinct, in lexicographic order.
        let terms: Vec<_> = table.rules.iter().map(|rule| rule.term.clone()).collect();
        let unique: HashSet<_> = terms.iter().collect();
        assert_eq!(unique.len(), terms.len());
        assert!(terms.windows(2).all(|pair| pair[0] < pair[1]));

        // The text form round-trips through the table parser and minimizes.
        let parsed = ModeTable::parse(&table.to_string()).unwrap();
        assert_eq!(parsed.initial_size(), table.rules.len());
        assert_eq!(parsed.mode_count(), table.mode_count);
        let expected_sizes: Vec<u32> = table.value_counts.iter().map(|count| count - 1).collect();
        assert_eq!(parsed.domain().sizes(), expected_sizes.as_slice());

        let minimized = parsed.minimize().unwrap();
        assert!(minimized.final_size() <= minimized.initial_size());
    }

    #[test]
    fn test_high_merging_runs() {
        let config: GeneratorConfig = "1\n1 1\n1 1\n40 40\n3\n0\n".parse().unwrap();
        let table = TableGenerator::new(&config).generate(&mut ValueGenerator::from_seed(42));
        assert_eq!(table.rules.len(), 40);
        // With a single mode, everything merges into one range.
        let minimized = ModeTable::parse(&table.to_string())
            .unwrap()
            .minimize()
            .unwrap();
        assert_eq!(minimized.display().to_string(), "0-39:0\n");
    }
}
