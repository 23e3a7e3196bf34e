// Copyright (c) The range-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mode tables: rules mapping discretized variable values to a controller mode.
//!
//! A table file looks like this:
//!
//! ```text
//! 2               number of variables
//! 3               number of modes
//! 0 4 1           min max step, once per variable
//! 0 3 1
//! 0,0:1           one rule per line: values, then the mode
//! 0,1:1
//! 1,0:2
//! ```
//!
//! Each mode is minimized on its own.

use crate::{
    display::{RulesDisplay, TermsDisplay},
    engine::{minimize, Minimization},
    errors::{InvalidTerm, MinimizeError, TableError},
    term::{Domain, Term},
};
use itertools::Itertools;
use log::{debug, info};
use std::{fmt, fs, io, path::Path, str::FromStr};

/// The `<min> <max> <step>` description of one variable.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VariableRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl VariableRange {
    /// The domain size of this variable: `ceil((max - min) / step - 1)`, or 0 if that is negative.
    ///
    /// # Examples
    ///
    /// ```
    /// use range_min::table::VariableRange;
    ///
    /// let range = VariableRange { min: 0.0, max: 4.0, step: 1.0 };
    /// assert_eq!(range.domain_size(), 3);
    /// let range = VariableRange { min: 0.0, max: 1.0, step: 0.3 };
    /// assert_eq!(range.domain_size(), 3);
    /// ```
    pub fn domain_size(&self) -> u32 {
        let size = self.raw_domain_size();
        if size <= 0.0 {
            0
        } else {
            size as u32
        }
    }

    fn raw_domain_size(&self) -> f64 {
        ((self.max - self.min) / self.step - 1.0).ceil()
    }

    fn parse(line: usize, s: &str) -> Result<Self, TableError> {
        let malformed = |message: String| TableError::MalformedHeader { line, message };
        let fields: Vec<f64> = s
            .split_whitespace()
            .map(|field| {
                field
                    .parse::<f64>()
                    .map_err(|err| malformed(format!("`{}`: {}", field, err)))
            })
            .collect::<Result<_, _>>()?;
        match fields.as_slice() {
            &[min, max, step] => {
                if !(min.is_finite() && max.is_finite() && step.is_finite()) {
                    return Err(malformed(format!("`{}` has a non-finite bound or step", s)));
                }
                if step <= 0.0 {
                    return Err(malformed(format!("step {} must be positive", step)));
                }
                let range = Self { min, max, step };
                let size = range.raw_domain_size();
                if size > f64::from(u32::MAX) {
                    return Err(malformed(format!(
                        "domain size {} is larger than {}",
                        size,
                        u32::MAX
                    )));
                }
                Ok(range)
            }
            _ => Err(malformed(format!(
                "expected `<min> <max> <step>`, found {} fields",
                fields.len()
            ))),
        }
    }
}

/// One table entry: a term and the mode it selects.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rule {
    pub term: Term,
    pub mode: usize,
}

impl Rule {
    fn parse(line: usize, s: &str) -> Result<Self, TableError> {
        let malformed = |message: String| TableError::MalformedRule { line, message };
        let (term, mode) = s
            .split_once(':')
            .ok_or_else(|| malformed(format!("expected `<term>:<mode>`, found `{}`", s)))?;
        let term = term.parse::<Term>().map_err(|err| malformed(err.to_string()))?;
        let mode = mode
            .trim()
            .parse::<usize>()
            .map_err(|err| malformed(format!("mode `{}`: {}", mode.trim(), err)))?;
        Ok(Self { term, mode })
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.term, self.mode)
    }
}

/// A parsed mode table, with its rules bucketed by mode.
#[derive(Clone, Debug, PartialEq)]
pub struct ModeTable {
    variables: Vec<VariableRange>,
    domain: Domain,
    modes: Vec<Vec<Term>>,
    initial_size: usize,
}

impl ModeTable {
    /// Parses a table from its text form.
    ///
    /// Blank lines after the header are skipped. Rules are checked for syntax and mode here;
    /// their values are checked against the domain when the mode is minimized.
    pub fn parse(s: &str) -> Result<Self, TableError> {
        let mut lines = s.lines().enumerate().map(|(ix, line)| (ix + 1, line.trim()));
        let mut next_header = |what: &str| match lines.next() {
            Some((line, "")) => Err(TableError::MalformedHeader {
                line,
                message: format!("expected the {}, found a blank line", what),
            }),
            Some(header) => Ok(header),
            None => Err(TableError::MissingHeader {
                what: what.to_owned(),
            }),
        };

        let (line, variable_count) = next_header("variable count")?;
        let variable_count = parse_count(line, variable_count, "variable count")?;
        let (line, mode_count) = next_header("mode count")?;
        let mode_count = parse_count(line, mode_count, "mode count")?;

        let variables = (0..variable_count)
            .map(|ix| {
                let (line, range) = next_header(&format!("range for variable {}", ix))?;
                VariableRange::parse(line, range)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let domain = Domain::new(variables.iter().map(VariableRange::domain_size));

        let mut modes = vec![Vec::new(); mode_count];
        let mut initial_size = 0;
        for (line, text) in lines.filter(|(_, line)| !line.is_empty()) {
            let rule = Rule::parse(line, text)?;
            let terms = modes
                .get_mut(rule.mode)
                .ok_or(TableError::UnknownMode {
                    line,
                    mode: rule.mode,
                    mode_count,
                })?;
            terms.push(rule.term);
            initial_size += 1;
        }

        debug!(
            "parsed table: {} variables (domain {:?}), {} modes, {} rules",
            variable_count,
            domain.sizes(),
            mode_count,
            initial_size
        );
        Ok(Self {
            variables,
            domain,
            modes,
            initial_size,
        })
    }

    /// Reads and parses the table at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    #[inline]
    pub fn variables(&self) -> &[VariableRange] {
        &self.variables
    }

    #[inline]
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    #[inline]
    pub fn mode_count(&self) -> usize {
        self.modes.len()
    }

    /// The minterms selecting `mode`, in file order.
    #[inline]
    pub fn mode(&self, mode: usize) -> &[Term] {
        &self.modes[mode]
    }

    /// The number of rules in the table.
    #[inline]
    pub fn initial_size(&self) -> usize {
        self.initial_size
    }

    /// Returns the standalone minimization problem for `mode`.
    pub fn mode_input(&self, mode: usize) -> ModeInput {
        ModeInput {
            domain: self.domain.clone(),
            minterms: self.modes[mode].clone(),
        }
    }

    /// Minimizes every mode, in ascending order.
    ///
    /// Modes without rules are skipped. The first mode that fails to minimize aborts the run.
    pub fn minimize(&self) -> Result<MinimizedTable, TableError> {
        let mut rules = Vec::new();
        for (mode, minterms) in self.modes.iter().enumerate() {
            if minterms.is_empty() {
                debug!("mode {}: no rules, skipping", mode);
                continue;
            }

            let minimization = minimize(&self.domain, minterms)
                .map_err(|source| TableError::Minimize { mode, source })?;
            let before = rules.len();
            rules.extend(
                minimization
                    .into_implicants()
                    .map(|term| Rule { term, mode }),
            );
            info!(
                "mode {}: {} rules minimized to {}",
                mode,
                minterms.len(),
                rules.len() - before
            );
        }

        Ok(MinimizedTable {
            rules,
            initial_size: self.initial_size,
        })
    }
}

impl FromStr for ModeTable {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_count(line: usize, s: &str, what: &str) -> Result<usize, TableError> {
    s.parse().map_err(|err| TableError::MalformedHeader {
        line,
        message: format!("{} `{}`: {}", what, s, err),
    })
}

/// The minimized form of a [`ModeTable`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MinimizedTable {
    rules: Vec<Rule>,
    initial_size: usize,
}

impl MinimizedTable {
    /// The minimized rules, grouped by mode in ascending order.
    #[inline]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[inline]
    pub fn initial_size(&self) -> usize {
        self.initial_size
    }

    #[inline]
    pub fn final_size(&self) -> usize {
        self.rules.len()
    }

    /// The number of input rules per output rule, or `None` for an empty output.
    pub fn compression_ratio(&self) -> Option<f64> {
        (self.final_size() > 0).then(|| self.initial_size as f64 / self.final_size() as f64)
    }

    #[inline]
    pub fn display(&self) -> RulesDisplay<'_> {
        RulesDisplay::new(&self.rules)
    }

    /// Writes the rules in output table format, one per line.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        write!(writer, "{}", self.display())?;
        writer.flush()
    }
}

/// The minterms of a single mode together with their domain.
///
/// The text form is three lines: the variable count, the domain sizes and the minterms, each
/// list separated by spaces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModeInput {
    pub domain: Domain,
    pub minterms: Vec<Term>,
}

impl ModeInput {
    pub fn minimize(&self) -> Result<Minimization, MinimizeError> {
        minimize(&self.domain, &self.minterms)
    }
}

impl fmt::Display for ModeInput {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.domain.variable_count())?;
        writeln!(f, "{}", self.domain.sizes().iter().join(" "))?;
        writeln!(
            f,
            "{}",
            TermsDisplay::new(&self.minterms).with_term_separator(" ", false)
        )
    }
}

impl FromStr for ModeInput {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines().enumerate().map(|(ix, line)| (ix + 1, line.trim()));
        let (line, variable_count) = lines.next().ok_or_else(|| TableError::MissingHeader {
            what: "variable count".to_owned(),
        })?;
        let variable_count = parse_count(line, variable_count, "variable count")?;

        let (line, sizes) = lines.next().ok_or_else(|| TableError::MissingHeader {
            what: "domain sizes".to_owned(),
        })?;
        let sizes: Vec<u32> = sizes
            .split_whitespace()
            .map(|size| {
                size.parse().map_err(|err| TableError::MalformedHeader {
                    line,
                    message: format!("domain size `{}`: {}", size, err),
                })
            })
            .collect::<Result<_, _>>()?;
        if sizes.len() != variable_count {
            return Err(TableError::MalformedHeader {
                line,
                message: format!(
                    "expected {} domain sizes, found {}",
                    variable_count,
                    sizes.len()
                ),
            });
        }

        let mut minterms = Vec::new();
        for (line, text) in lines {
            for term in text.split_whitespace() {
                let term = term.parse().map_err(|err: InvalidTerm| {
                    TableError::MalformedRule {
                        line,
                        message: err.to_string(),
                    }
                })?;
                minterms.push(term);
            }
        }

        Ok(Self {
            domain: Domain::new(sizes),
            minterms,
        })
    }
}
