//! Command-line surface

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Debug, Parser)]
#[command(name = "formguard", version)]
#[command(about = "Validate form fixtures against declarative rule sets", long_about = None)]
pub struct Cli {
    /// Settings file (TOML). Defaults to ./formguard.toml when present
    #[arg(long, global = true, env = "FORMGUARD_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Do not print warnings
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Log filter directives, e.g. `debug` or `formguard=trace`
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate a form fixture and print the result
    Validate(ValidateArgs),

    /// Report structural and rule/markup consistency warnings
    Audit(AuditArgs),
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Form fixture (JSON)
    #[arg(long, value_name = "PATH")]
    pub form: PathBuf,

    /// Rule set (JSON or TOML)
    #[arg(long, value_name = "PATH")]
    pub schema: PathBuf,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Args)]
pub struct AuditArgs {
    /// Form fixture (JSON)
    #[arg(long, value_name = "PATH")]
    pub form: PathBuf,

    /// Rule set to check against the markup (JSON or TOML)
    #[arg(long, value_name = "PATH")]
    pub schema: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One line per failing field
    #[default]
    Text,
    /// The full result as JSON
    Json,
}
