//! Configuration errors
//!
//! Only registration can fail. Validation failures are data
//! ([`FormResult`](crate::FormResult)) and diagnostics are warnings
//! ([`WarningSink`](crate::WarningSink)).

/// Errors raised while configuring a [`Validator`](crate::Validator).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    /// No control in the form carries the requested name.
    #[error("Field \"{name}\" not found")]
    FieldNotFound {
        /// The name that failed to resolve.
        name: String,
    },
}

impl FormError {
    /// Creates a [`FormError::FieldNotFound`].
    pub fn field_not_found(name: impl Into<String>) -> Self {
        Self::FieldNotFound { name: name.into() }
    }
}
