//! # formguard-log
//!
//! Installs a `tracing` subscriber for FormGuard binaries: an `EnvFilter`
//! plus one formatting layer writing to stderr.
//!
//! ```rust,ignore
//! // Filter and format from FORMGUARD_LOG / RUST_LOG / FORMGUARD_LOG_FORMAT
//! let _guard = formguard_log::auto_init()?;
//!
//! // Or explicitly
//! let _guard = formguard_log::init_with(formguard_log::Config::production())?;
//! ```

mod builder;
mod config;
mod error;

pub use builder::{LoggerBuilder, LoggerGuard};
pub use config::{Config, DisplayConfig, Format};
pub use error::{LogError, LogResult};

/// Installs the default configuration.
pub fn init() -> LogResult<LoggerGuard> {
    init_with(Config::default())
}

/// Installs `config`.
pub fn init_with(config: Config) -> LogResult<LoggerGuard> {
    LoggerBuilder::from_config(config).build()
}

/// Picks a configuration from the environment.
///
/// When `FORMGUARD_LOG` or `RUST_LOG` is set, everything comes from
/// [`Config::from_env`]. Otherwise debug builds use
/// [`Config::development`] and release builds [`Config::production`].
pub fn auto_init() -> LogResult<LoggerGuard> {
    init_with(auto_config(|key| std::env::var(key).ok()))
}

fn auto_config(lookup: impl Fn(&str) -> Option<String>) -> Config {
    if lookup("FORMGUARD_LOG").is_some() || lookup("RUST_LOG").is_some() {
        Config::from_env_with(lookup)
    } else if cfg!(debug_assertions) {
        Config::development()
    } else {
        Config::production()
    }
}
