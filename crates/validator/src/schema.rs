//! Declarative rule sets
//!
//! A [`FormSchema`] lists fields and their rules in the same wire shape the
//! rules use individually, so a whole form's configuration can live in a
//! JSON or TOML file:
//!
//! ```json
//! {
//!   "fields": [
//!     { "name": "username", "rules": [{ "rule": "required" }] },
//!     { "name": "roles", "rules": [{ "rule": "minChecked", "value": 2 }] }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::rule::Rule;

/// Rules for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Name the field's controls carry.
    pub name: String,
    /// Rules in evaluation order.
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl FieldSchema {
    /// Creates a field entry.
    pub fn new(name: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }
}

/// Rules for a whole form, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    /// Field entries.
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
}

impl FormSchema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field entry.
    #[must_use = "builder methods must be chained or built"]
    pub fn field(mut self, name: impl Into<String>, rules: Vec<Rule>) -> Self {
        self.fields.push(FieldSchema::new(name, rules));
        self
    }

    /// Parses a JSON schema.
    ///
    /// # Errors
    ///
    /// Returns the parse error, which includes rule decoding failures such
    /// as a `minLength` without a numeric `value`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
