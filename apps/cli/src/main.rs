//! `formguard`: validate form fixtures from the command line.

mod cli;
mod commands;
mod settings;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};
use crate::settings::Settings;

/// Exit status for configuration and I/O errors.
const CONFIG_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(CONFIG_ERROR)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let settings = Settings::load(cli)?;
    let _guard = formguard_log::init_with(
        formguard_log::Config::cli().with_level(settings.log_level.clone()),
    )?;
    tracing::debug!(?settings, "settings loaded");

    match &cli.command {
        Command::Validate(args) => commands::validate(args, &settings),
        Command::Audit(args) => commands::audit(args, &settings),
    }
}
