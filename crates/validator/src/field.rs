//! Fields: one logical value, its elements, and its rules
//!
//! A [`Field`] is either *scalar* (one value-bearing input) or a *group*
//! (several checkbox/radio inputs whose value is the set of checked
//! sub-values). The mode is decided when the field is built and never
//! changes afterwards.

use indexmap::IndexSet;

use crate::registry::{RuleContext, RuleRegistry};
use crate::result::ValidationOutcome;
use crate::rule::Rule;
use crate::surface::{ElementId, Form, InputSurface};

/// Message reported when a surface flags a control invalid without saying why.
const FALLBACK_NATIVE_MESSAGE: &str = "Invalid value";

// ============================================================================
// VALUE
// ============================================================================

/// The current value of a field, in the shape its mode produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Text of a single input.
    Scalar(String),
    /// Checked sub-values of a group, in document order.
    Group(IndexSet<String>),
}

impl FieldValue {
    /// Empty text, or nothing selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Scalar(text) => text.is_empty(),
            Self::Group(selected) => selected.is_empty(),
        }
    }

    /// Returns the text of a scalar value.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(text) => Some(text),
            Self::Group(_) => None,
        }
    }

    /// Coerces a scalar value to a number the way form scripts do.
    ///
    /// Blank text is `0`. Decimal literals, `0x`/`0o`/`0b` integers and an
    /// exact `Infinity` (optionally signed) are accepted; anything else is
    /// `None`, so numeric rules skip it.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        coerce_number(self.as_scalar()?)
    }
}

fn coerce_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0.0);
    }

    match text {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    let radix = match text.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return parse_radix(&text[2..], radix);
    }

    // `f64::from_str` also takes `inf`, `infinity` and `nan` in any case.
    if text
        .chars()
        .any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E'))
    {
        return None;
    }
    text.parse::<f64>().ok()
}

fn parse_radix(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|digit| acc.mul_add(f64::from(radix), f64::from(digit)))
    })
}

// ============================================================================
// TARGET
// ============================================================================

/// Which elements a field reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldTarget {
    /// Exactly one value-bearing input.
    Scalar(ElementId),
    /// A non-empty, ordered list of checkbox-like inputs.
    Group(Vec<ElementId>),
}

/// Scalar or group, without the element handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMode {
    /// Backed by one input.
    Scalar,
    /// Backed by a group of inputs.
    Group,
}

// ============================================================================
// FIELD
// ============================================================================

/// A named field with its declared rules.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    target: FieldTarget,
    rules: Vec<Rule>,
}

impl Field {
    /// Creates a field backed by a single input.
    pub fn scalar(name: impl Into<String>, element: ElementId, rules: Vec<Rule>) -> Self {
        Self {
            name: name.into(),
            target: FieldTarget::Scalar(element),
            rules,
        }
    }

    /// Creates a field backed by a group of inputs.
    ///
    /// Returns `None` when `elements` is empty: a group needs at least one
    /// member to anchor its error display.
    pub fn group(
        name: impl Into<String>,
        elements: Vec<ElementId>,
        rules: Vec<Rule>,
    ) -> Option<Self> {
        if elements.is_empty() {
            return None;
        }
        Some(Self {
            name: name.into(),
            target: FieldTarget::Group(elements),
            rules,
        })
    }

    /// The field's registration name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared rules, in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The elements this field reads from.
    #[must_use]
    pub fn target(&self) -> &FieldTarget {
        &self.target
    }

    /// Scalar or group.
    #[must_use]
    pub fn mode(&self) -> FieldMode {
        match self.target {
            FieldTarget::Scalar(_) => FieldMode::Scalar,
            FieldTarget::Group(_) => FieldMode::Group,
        }
    }

    /// Every element of the field, in document order.
    #[must_use]
    pub fn elements(&self) -> &[ElementId] {
        match &self.target {
            FieldTarget::Scalar(element) => std::slice::from_ref(element),
            FieldTarget::Group(elements) => elements,
        }
    }

    /// The element errors are rendered next to: the input itself, or the
    /// first member of a group.
    #[must_use]
    pub fn anchor(&self) -> ElementId {
        self.elements()[0]
    }

    /// Reads the field's current value from `surface`.
    pub fn value<S: InputSurface + ?Sized>(&self, surface: &S) -> FieldValue {
        match &self.target {
            FieldTarget::Scalar(element) => FieldValue::Scalar(surface.value(*element)),
            FieldTarget::Group(elements) => FieldValue::Group(surface.selected_values(elements)),
        }
    }

    /// Evaluates the field without touching the presentation.
    ///
    /// Scalar fields report the native validation message first, then every
    /// failing rule in declaration order. Groups have no native validity.
    pub fn evaluate<F: InputSurface>(&self, form: &F, registry: &RuleRegistry) -> ValidationOutcome {
        let value = self.value(form);
        let mut errors = Vec::new();

        if let FieldTarget::Scalar(element) = self.target {
            if !form.is_natively_valid(element) {
                let message = form.native_validation_message(element);
                errors.push(if message.is_empty() {
                    FALLBACK_NATIVE_MESSAGE.to_owned()
                } else {
                    message
                });
            }
        }

        let ctx = RuleContext::new(form, self.anchor());
        errors.extend(
            self.rules
                .iter()
                .filter_map(|rule| registry.evaluate(rule, &value, &ctx)),
        );

        ValidationOutcome::from_errors(errors)
    }

    /// Validates the field and refreshes its rendered errors.
    ///
    /// Previously rendered messages are cleared first; the new ones (if any)
    /// are shown after evaluation.
    pub fn validate<F: Form>(&self, form: &F, registry: &RuleRegistry) -> ValidationOutcome {
        let anchor = self.anchor();
        form.clear_errors(anchor);

        let outcome = self.evaluate(form, registry);
        if !outcome.valid {
            form.show_errors(anchor, &outcome.errors);
        }

        tracing::debug!(
            field = %self.name,
            valid = outcome.valid,
            errors = outcome.errors.len(),
            "field validated"
        );
        outcome
    }
}

// ============================================================================
// TESTS
// ============================================================================
