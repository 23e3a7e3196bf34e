// Copyright (c) The range-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use camino::Utf8PathBuf;
use clap::Parser;
use color_eyre::Result;
use fixture_details::{AllFixtures, GeneratorConfig};
use log::LevelFilter;

#[derive(Debug, Parser)]
pub struct FixtureManagerApp {
    /// Log level: off, error, warn, info, debug or trace
    #[clap(long, global = true, default_value = "info")]
    log_level: LevelFilter,

    #[clap(subcommand)]
    command: FixtureManagerCommand,
}

#[derive(Debug, Parser)]
pub enum FixtureManagerCommand {
    /// Generate random mode tables
    GenerateTables {
        /// Generator config [default: fixtures/data/gen_table.cfg]
        #[clap(long, short)]
        config: Option<Utf8PathBuf>,

        /// Output path; `_0`, `_1`, ... is appended to the file stem for each table
        #[clap(long, short)]
        output: Utf8PathBuf,

        /// Seed for the random generator
        #[clap(long, default_value = "range-min")]
        seed: String,
    },
    /// Minimize tables, writing `<stem>.min.<ext>` next to each one
    GenerateOutputs {
        #[clap(required = true)]
        tables: Vec<Utf8PathBuf>,
    },
    /// Minimize random inputs and check the results
    CheckRandom {
        #[clap(long, short, default_value_t = 64)]
        count: usize,

        #[clap(long, default_value = "range-min")]
        seed: String,
    },
}

impl FixtureManagerApp {
    #[inline]
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn exec(self) -> Result<()> {
        self.command.exec()
    }
}

impl FixtureManagerCommand {
    pub fn exec(self) -> Result<()> {
        match self {
            Self::GenerateTables {
                config,
                output,
                seed,
            } => {
                let config_path =
                    config.unwrap_or_else(|| AllFixtures::get().default_config_path());
                let config = GeneratorConfig::from_path(&config_path)?;
                let tables = AllFixtures::generate_tables(&config, &output, &seed)?;
                println!("generated {} tables", tables.len());
                Ok(())
            }
            Self::GenerateOutputs { tables } => {
                AllFixtures::generate_outputs(&tables)?;
                Ok(())
            }
            Self::CheckRandom { count, seed } => {
                AllFixtures::check_random(count, &seed)?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        let app = FixtureManagerApp::try_parse_from([
            "fixture-manager",
            "generate-tables",
            "--output",
            "out.txt",
        ])
        .unwrap();
        assert_eq!(app.log_level(), LevelFilter::Info);
        match app.command {
            FixtureManagerCommand::GenerateTables {
                config,
                output,
                seed,
            } => {
                assert_eq!(config, None);
                assert_eq!(output, Utf8PathBuf::from("out.txt"));
                assert_eq!(seed, "range-min");
            }
            other => panic!("unexpected command {:?}", other),
        }

        let app = FixtureManagerApp::try_parse_from([
            "fixture-manager",
            "generate-outputs",
            "a.txt",
            "b.txt",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(app.log_level(), LevelFilter::Debug);
        assert!(matches!(
            app.command,
            FixtureManagerCommand::GenerateOutputs { ref tables } if tables.len() == 2
        ));

        assert!(
            FixtureManagerApp::try_parse_from(["fixture-manager", "generate-outputs"]).is_err()
        );
        assert!(FixtureManagerApp::try_parse_from(["fixture-manager", "generate-tables"]).is_err());
    }
}
