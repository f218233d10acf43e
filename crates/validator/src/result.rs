//! Validation results
//!
//! [`ValidationOutcome`] is what one field reports; [`FormResult`] folds the
//! outcomes of every registered field. Both are plain data: a failing form
//! is a value, never an error.

use indexmap::IndexMap;
use serde::Serialize;

/// Result of validating one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    /// True iff `errors` is empty.
    pub valid: bool,
    /// Failure messages in evaluation order.
    pub errors: Vec<String>,
}

impl ValidationOutcome {
    /// A passing outcome.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// Builds an outcome from its messages; valid iff there are none.
    #[must_use]
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// The first failure message, if any.
    #[must_use]
    pub fn first_error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }
}

impl Default for ValidationOutcome {
    fn default() -> Self {
        Self::ok()
    }
}

/// Result of validating a whole form.
///
/// `errors` only has entries for fields with at least one message, in
/// registration order. A field missing from it is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormResult {
    /// True iff every field is valid.
    pub valid: bool,
    /// Field name → failure messages.
    pub errors: IndexMap<String, Vec<String>>,
}

impl FormResult {
    /// A result with no fields, which is valid.
    #[must_use]
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: IndexMap::new(),
        }
    }

    /// Folds one field's outcome into the result.
    pub fn record(&mut self, name: &str, outcome: ValidationOutcome) {
        self.valid &= outcome.valid;
        if !outcome.errors.is_empty() {
            self.errors.insert(name.to_owned(), outcome.errors);
        }
    }

    /// Whether every field passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Messages for `name`; empty when the field passed or is unknown.
    #[must_use]
    pub fn errors_for(&self, name: &str) -> &[String] {
        self.errors.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// First message for `name`.
    #[must_use]
    pub fn first_error(&self, name: &str) -> Option<&str> {
        self.errors_for(name).first().map(String::as_str)
    }

    /// Name of the first failing field in registration order.
    #[must_use]
    pub fn first_invalid_field(&self) -> Option<&str> {
        self.errors.keys().next().map(String::as_str)
    }

    /// Names of every failing field, in registration order.
    pub fn invalid_fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    /// Total number of messages across all fields.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }
}

impl Default for FormResult {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<(String, ValidationOutcome)> for FormResult {
    fn from_iter<I: IntoIterator<Item = (String, ValidationOutcome)>>(iter: I) -> Self {
        let mut result = Self::new();
        for (name, outcome) in iter {
            result.record(&name, outcome);
        }
        result
    }
}
