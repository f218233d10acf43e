//! Prelude module for convenient imports.
//!
//! `use formguard_validator::prelude::*;` brings in the validator, rules,
//! results and the traits a form implementation needs.

// ============================================================================
// ENGINE
// ============================================================================

pub use crate::{FormError, Validator, ValidatorBuilder, ValidatorOptions};

// ============================================================================
// RULES & RESULTS
// ============================================================================

pub use crate::{
    FieldSchema, FieldValue, FormResult, FormSchema, Rule, RuleContext, RuleKind, RuleRegistry,
    ValidationOutcome,
};

// ============================================================================
// SURFACE & DIAGNOSTICS
// ============================================================================

pub use crate::{
    CollectingSink, ElementId, Form, InputSurface, Presentation, TracingSink, Warning,
    WarningSink,
};
