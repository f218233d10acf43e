//! Logging errors

/// Errors raised while installing the global subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// The filter directives could not be parsed.
    #[error("invalid log filter `{directives}`: {reason}")]
    Filter {
        /// The rejected directives.
        directives: String,
        /// Parser message.
        reason: String,
    },

    /// A global subscriber is already installed.
    #[error("logger already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Result alias for logging setup.
pub type LogResult<T> = Result<T, LogError>;
