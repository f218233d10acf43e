//! Declarative validation rules
//!
//! A [`Rule`] pairs a [`RuleKind`] (the tagged payload) with an optional
//! override message. Rules are plain data: they carry no behavior of their
//! own and are evaluated by the [`RuleRegistry`](crate::registry::RuleRegistry).
//!
//! # Wire format
//!
//! Rules (de)serialize in the same shape form configurations use:
//!
//! ```json
//! { "rule": "minLength", "value": 3, "message": "Too short" }
//! ```
//!
//! Tags the crate does not know about are kept as [`RuleKind::Unknown`]
//! instead of failing, so rule sets written for a newer engine still load.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// RULE KIND
// ============================================================================

/// The tagged payload of a rule.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleKind {
    /// The value must be present.
    Required,
    /// Minimum number of characters (inclusive).
    MinLength(usize),
    /// Maximum number of characters (inclusive).
    MaxLength(usize),
    /// Minimum numeric value (inclusive).
    Min(f64),
    /// Maximum numeric value (inclusive).
    Max(f64),
    /// Regular-expression source the value must match.
    Pattern(String),
    /// Name of a sibling field whose value must be equal.
    Match(String),
    /// Minimum number of selected options in a group.
    MinChecked(usize),
    /// Surfaces the native email-format check.
    Email,
    /// A tag this engine version does not recognize.
    ///
    /// Kept verbatim so the rule survives a round-trip; never evaluated.
    Unknown {
        /// The original tag.
        kind: String,
        /// The original payload, if any.
        value: Option<Value>,
    },
}

impl RuleKind {
    /// Returns the wire tag of this kind (`"minLength"`, `"email"`, ...).
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::Required => "required",
            Self::MinLength(_) => "minLength",
            Self::MaxLength(_) => "maxLength",
            Self::Min(_) => "min",
            Self::Max(_) => "max",
            Self::Pattern(_) => "pattern",
            Self::Match(_) => "match",
            Self::MinChecked(_) => "minChecked",
            Self::Email => "email",
            Self::Unknown { kind, .. } => kind,
        }
    }

    /// Returns true for kinds that only make sense on a checkbox/radio group.
    #[must_use]
    pub fn is_group_only(&self) -> bool {
        matches!(self, Self::MinChecked(_))
    }

    /// Returns true for kinds that only make sense on a single input.
    #[must_use]
    pub fn is_scalar_only(&self) -> bool {
        matches!(
            self,
            Self::MinLength(_)
                | Self::MaxLength(_)
                | Self::Min(_)
                | Self::Max(_)
                | Self::Pattern(_)
                | Self::Match(_)
                | Self::Email
        )
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinLength(n) | Self::MaxLength(n) | Self::MinChecked(n) => {
                write!(f, "{}({n})", self.tag())
            }
            Self::Min(n) | Self::Max(n) => write!(f, "{}({n})", self.tag()),
            Self::Pattern(s) | Self::Match(s) => write!(f, "{}({s:?})", self.tag()),
            _ => f.write_str(self.tag()),
        }
    }
}

// ============================================================================
// RULE
// ============================================================================

/// A single declared validation rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRule", into = "RawRule")]
pub struct Rule {
    /// What the rule checks.
    pub kind: RuleKind,
    /// Message reported instead of the built-in default.
    pub message: Option<String>,
}

impl Rule {
    /// Creates a rule without an override message.
    #[must_use]
    pub fn new(kind: RuleKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    /// `required` rule.
    #[must_use]
    pub fn required() -> Self {
        Self::new(RuleKind::Required)
    }

    /// `minLength` rule.
    #[must_use]
    pub fn min_length(min: usize) -> Self {
        Self::new(RuleKind::MinLength(min))
    }

    /// `maxLength` rule.
    #[must_use]
    pub fn max_length(max: usize) -> Self {
        Self::new(RuleKind::MaxLength(max))
    }

    /// `min` rule.
    #[must_use]
    pub fn min(min: f64) -> Self {
        Self::new(RuleKind::Min(min))
    }

    /// `max` rule.
    #[must_use]
    pub fn max(max: f64) -> Self {
        Self::new(RuleKind::Max(max))
    }

    /// `pattern` rule. The source is compiled at evaluation time.
    #[must_use]
    pub fn pattern(source: impl Into<String>) -> Self {
        Self::new(RuleKind::Pattern(source.into()))
    }

    /// `match` rule against the field named `other`.
    #[must_use]
    pub fn matches(other: impl Into<String>) -> Self {
        Self::new(RuleKind::Match(other.into()))
    }

    /// `minChecked` rule.
    #[must_use]
    pub fn min_checked(min: usize) -> Self {
        Self::new(RuleKind::MinChecked(min))
    }

    /// `email` rule.
    #[must_use]
    pub fn email() -> Self {
        Self::new(RuleKind::Email)
    }

    /// A rule with a tag unknown to this engine.
    #[must_use]
    pub fn unknown(kind: impl Into<String>) -> Self {
        Self::new(RuleKind::Unknown {
            kind: kind.into(),
            value: None,
        })
    }

    /// Sets the override message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Returns the wire tag of this rule.
    #[must_use]
    pub fn tag(&self) -> &str {
        self.kind.tag()
    }

    /// Returns the override message, or `default` when none (or an empty one)
    /// was declared.
    #[must_use]
    pub fn message_or(&self, default: impl FnOnce() -> String) -> String {
        match self.message.as_deref() {
            Some(message) if !message.is_empty() => message.to_owned(),
            _ => default(),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// Failure to decode a rule from its wire shape.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuleError {
    /// A known rule kind was declared without its `value`.
    #[error("rule `{kind}` requires a `value`")]
    MissingValue {
        /// The rule tag.
        kind: String,
    },

    /// A known rule kind carries a `value` of the wrong shape.
    #[error("rule `{kind}` expects {expected} as `value`, got {found}")]
    InvalidValue {
        /// The rule tag.
        kind: String,
        /// Human description of the accepted shape.
        expected: &'static str,
        /// The offending JSON value.
        found: String,
    },
}

// ============================================================================
// WIRE SHAPE
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawRule {
    rule: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl RawRule {
    fn value(&self) -> Result<&Value, RuleError> {
        self.value.as_ref().ok_or_else(|| RuleError::MissingValue {
            kind: self.rule.clone(),
        })
    }

    fn count(&self) -> Result<usize, RuleError> {
        let value = self.value()?;
        value
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| self.invalid("a non-negative integer", value))
    }

    fn number(&self) -> Result<f64, RuleError> {
        let value = self.value()?;
        value
            .as_f64()
            .ok_or_else(|| self.invalid("a number", value))
    }

    fn string(&self) -> Result<String, RuleError> {
        let value = self.value()?;
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| self.invalid("a string", value))
    }

    fn invalid(&self, expected: &'static str, found: &Value) -> RuleError {
        RuleError::InvalidValue {
            kind: self.rule.clone(),
            expected,
            found: found.to_string(),
        }
    }
}

impl TryFrom<RawRule> for Rule {
    type Error = RuleError;

    fn try_from(raw: RawRule) -> Result<Self, Self::Error> {
        let kind = match raw.rule.as_str() {
            "required" => RuleKind::Required,
            "minLength" => RuleKind::MinLength(raw.count()?),
            "maxLength" => RuleKind::MaxLength(raw.count()?),
            "min" => RuleKind::Min(raw.number()?),
            "max" => RuleKind::Max(raw.number()?),
            "pattern" => RuleKind::Pattern(raw.string()?),
            "match" => RuleKind::Match(raw.string()?),
            "minChecked" => RuleKind::MinChecked(raw.count()?),
            "email" => RuleKind::Email,
            _ => RuleKind::Unknown {
                kind: raw.rule,
                value: raw.value,
            },
        };

        Ok(Self {
            kind,
            message: raw.message,
        })
    }
}

impl From<Rule> for RawRule {
    fn from(rule: Rule) -> Self {
        let (tag, value) = match rule.kind {
            RuleKind::Required => ("required".to_owned(), None),
            RuleKind::MinLength(n) => ("minLength".to_owned(), Some(Value::from(n))),
            RuleKind::MaxLength(n) => ("maxLength".to_owned(), Some(Value::from(n))),
            RuleKind::Min(n) => ("min".to_owned(), Some(Value::from(n))),
            RuleKind::Max(n) => ("max".to_owned(), Some(Value::from(n))),
            RuleKind::Pattern(s) => ("pattern".to_owned(), Some(Value::from(s))),
            RuleKind::Match(s) => ("match".to_owned(), Some(Value::from(s))),
            RuleKind::MinChecked(n) => ("minChecked".to_owned(), Some(Value::from(n))),
            RuleKind::Email => ("email".to_owned(), None),
            RuleKind::Unknown { kind, value } => (kind, value),
        };

        Self {
            rule: tag,
            value,
            message: rule.message,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
