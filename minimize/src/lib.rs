// Copyright (c) The range-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use camino::Utf8PathBuf;
use clap::Parser;
use color_eyre::{eyre::WrapErr, Result};
use log::LevelFilter;
use range_min::table::{MinimizedTable, ModeTable};
use std::{fs::File, io::BufWriter};

/// Minimize a mode table by merging adjacent rules.
#[derive(Debug, Parser)]
#[clap(name = "minimize", version)]
pub struct MinimizeApp {
    /// The table to minimize
    input: Utf8PathBuf,

    /// Where to write the minimized table
    output: Utf8PathBuf,

    /// Log level: off, error, warn, info, debug or trace
    #[clap(long, default_value = "warn")]
    log_level: LevelFilter,
}

impl MinimizeApp {
    #[inline]
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn exec(self) -> Result<MinimizedTable> {
        println!("Minimizing {} by merging adjacent rules", self.input);

        let table = ModeTable::from_path(&self.input)
            .wrap_err_with(|| format!("failed to read table at {}", self.input))?;
        let minimized = table
            .minimize()
            .wrap_err_with(|| format!("failed to minimize {}", self.input))?;

        let file = File::create(&self.output)
            .wrap_err_with(|| format!("failed to create {}", self.output))?;
        minimized
            .write_to(BufWriter::new(file))
            .wrap_err_with(|| format!("failed to write {}", self.output))?;

        println!(
            "initial table size = {} final table size = {}",
            minimized.initial_size(),
            minimized.final_size()
        );
        Ok(minimized)
    }
}
