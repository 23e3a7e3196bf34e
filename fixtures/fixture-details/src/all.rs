// Copyright (c) The range-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    details::{minimized_path, numbered_path, GeneratorConfig, TableGenerator},
    value_generator::ValueGenerator,
};
use camino::{Utf8Path, Utf8PathBuf};
use color_eyre::{
    eyre::{bail, WrapErr},
    Result,
};
use log::info;
use once_cell::sync::Lazy;
use range_min::{proptest_helpers::domain_with_minterms, table::ModeTable};
use std::{fs, io::BufWriter};

pub struct AllFixtures {
    data_dir: Utf8PathBuf,
}

static ALL_FIXTURES_STATIC: Lazy<AllFixtures> = Lazy::new(AllFixtures::init);

impl AllFixtures {
    pub fn get() -> &'static Self {
        &*ALL_FIXTURES_STATIC
    }

    fn init() -> Self {
        let dir: Utf8PathBuf = env!("CARGO_MANIFEST_DIR").into();
        let data_dir = match dir.parent() {
            Some(parent) => parent.join("data"),
            None => dir.join("data"),
        };
        Self { data_dir }
    }

    /// The directory holding checked-in fixture files.
    pub fn data_dir(&self) -> &Utf8Path {
        &self.data_dir
    }

    /// The generator config used when none is given.
    pub fn default_config_path(&self) -> Utf8PathBuf {
        self.data_dir.join("gen_table.cfg")
    }

    /// Generates `config.table_count` tables, named after `output` with `_0`, `_1`, ... appended.
    pub fn generate_tables(
        config: &GeneratorConfig,
        output: &Utf8Path,
        seed: &str,
    ) -> Result<Vec<Utf8PathBuf>> {
        let mut value_gen = ValueGenerator::from_seed(seed);
        let generator = TableGenerator::new(config);

        (0..config.table_count)
            .map(|ix| -> Result<Utf8PathBuf> {
                let mut gen = value_gen.partial_clone();
                let table = generator.generate(&mut gen);
                let path = numbered_path(output, ix);
                fs::write(&path, table.to_string())
                    .wrap_err_with(|| format!("failed to write {}", path))?;
                info!(
                    "{}: {} variables, {} modes, {} entries",
                    path,
                    table.value_counts.len(),
                    table.mode_count,
                    table.rules.len()
                );
                Ok(path)
            })
            .collect()
    }

    /// Minimizes each table, writing the result next to it.
    pub fn generate_outputs(tables: &[Utf8PathBuf]) -> Result<Vec<Utf8PathBuf>> {
        tables
            .iter()
            .map(|table_path| -> Result<Utf8PathBuf> {
                let table = ModeTable::from_path(table_path)
                    .wrap_err_with(|| format!("failed to read table at {}", table_path))?;
                let minimized = table
                    .minimize()
                    .wrap_err_with(|| format!("failed to minimize {}", table_path))?;

                let output = minimized_path(table_path);
                let file = fs::File::create(&output)
                    .wrap_err_with(|| format!("failed to create {}", output))?;
                minimized
                    .write_to(BufWriter::new(file))
                    .wrap_err_with(|| format!("failed to write {}", output))?;

                match minimized.compression_ratio() {
                    Some(ratio) => println!(
                        "{}: {} -> {} entries (compression ratio {:.2})",
                        table_path,
                        minimized.initial_size(),
                        minimized.final_size(),
                        ratio
                    ),
                    None => println!("{}: empty table", table_path),
                }
                Ok(output)
            })
            .collect()
    }

    /// Minimizes `count` random mode inputs and checks that every result covers exactly the
    /// input minterms. Fails on the first input that does not minimize cleanly.
    pub fn check_random(count: usize, seed: &str) -> Result<()> {
        let mut value_gen = ValueGenerator::from_seed(seed);

        for ix in 0..count {
            let mut gen = value_gen.partial_clone();
            let (domain, minterms) = gen.generate(domain_with_minterms());
            let minimization = range_min::minimize(&domain, &minterms)
                .wrap_err_with(|| format!("input {}: failed to minimize", ix))?;

            for minterm in &minterms {
                if !minimization.implicants().any(|term| term.contains(minterm)) {
                    bail!("input {}: minterm {} is not in the cover", ix, minterm);
                }
            }
            for implicant in minimization.implicants() {
                if let Some(extra) = implicant.minterms().find(|m| !minterms.contains(m)) {
                    bail!("input {}: {} covers {}, not an input", ix, implicant, extra);
                }
            }
        }

        println!("checked {} random inputs", count);
        Ok(())
    }
}
