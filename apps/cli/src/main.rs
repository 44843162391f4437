// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ARLite command-line tool
//!
//! Regenerates floor plans from exported plane records and rectifies
//! quadrilateral selections of captured stills.
//!
//! Usage:
//!   arlite floorplan <planes.json> [options]
//!   arlite rectify <image> --corners x1,y1,...,x4,y4 [options]

mod args;
mod commands;
mod config;

use anyhow::Result;
use args::{parse_args, Command, USAGE};
use config::Config;
use std::process::ExitCode;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info,arlite=debug".into()))
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("{}\n\n{}", err, USAGE);
            return Err(err);
        }
    };
    let config = Config::from_env()?;
    tracing::debug!(?config, "Loaded configuration");

    match command {
        Command::Help => {
            println!("{}", USAGE);
            Ok(())
        }
        Command::Floorplan { input, corners, output } => {
            commands::floorplan::run(&input, corners.as_deref(), output.as_deref(), &config.floor_plan)
        }
        Command::Rectify {
            input,
            corners,
            output,
            size,
        } => commands::rectify::run(&input, corners, &output, size.or(config.rectify_size)),
    }
}
