//! Layered settings: defaults → settings file → `FORMGUARD_*` env → flags

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use formguard_validator::ValidatorOptions;
use serde::{Deserialize, Serialize};

use crate::cli::{Cli, OutputFormat};

const DEFAULT_FILE: &str = "formguard.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub format: OutputFormat,
    pub log_level: String,
    pub validator: ValidatorOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            log_level: "warn".to_owned(),
            validator: ValidatorOptions::default(),
        }
    }
}

impl Settings {
    /// Loads settings for `cli`, applying its global flags last.
    pub fn load(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) if !path.is_file() => bail!("settings file {} not found", path.display()),
            Some(path) => path.clone(),
            None => PathBuf::from(DEFAULT_FILE),
        };

        let mut settings = Self::figment(&file)
            .extract::<Self>()
            .with_context(|| format!("invalid settings in {}", file.display()))?;

        if cli.quiet {
            settings.validator.suppress_warnings = true;
        }
        if let Some(level) = &cli.log_level {
            settings.log_level.clone_from(level);
        }
        Ok(settings)
    }

    fn figment(file: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed("FORMGUARD_").split("__").ignore(&["config", "log", "log_format"]))
    }
}
