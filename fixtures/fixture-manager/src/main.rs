// Copyright (c) The range-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::Parser;
use color_eyre::Result;
use fixture_manager::FixtureManagerApp;

fn main() -> Result<()> {
    color_eyre::install()?;

    let app = FixtureManagerApp::parse();
    simplelog::TermLogger::init(
        app.log_level(),
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    app.exec()
}
