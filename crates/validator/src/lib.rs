//! # formguard-validator
//!
//! Declarative, rule-based validation for HTML-style forms.
//!
//! A [`Validator`] borrows a form through the [`InputSurface`] and
//! [`Presentation`] traits, audits its markup once, and then validates the
//! fields registered on it. Each field declares an ordered list of
//! [`Rule`]s; failures are collected per field into a [`FormResult`] and
//! rendered next to the field's controls.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use formguard_validator::prelude::*;
//! use formguard_validator::memory::{Control, MemoryForm};
//!
//! let form = MemoryForm::builder()
//!     .wrapper(|w| {
//!         w.control(Control::input("text").name("username").id("username").required())
//!             .error_region()
//!     })
//!     .label_for("username")
//!     .build();
//!
//! let mut validator = Validator::new(&form);
//! validator.add_field("username", vec![Rule::required().with_message("Enter a name")])?;
//!
//! let result = validator.validate();
//! assert!(!result.valid);
//! assert_eq!(result.first_error("username"), Some("Please fill out this field."));
//! ```
//!
//! ## Rules
//!
//! `required`, `minLength`, `maxLength`, `min`, `max`, `pattern`, `match`,
//! `minChecked` and `email`. Rule kinds this version does not know are kept
//! and ignored. Custom kinds can be added per [`RuleRegistry`].
//!
//! ## Diagnostics
//!
//! Markup problems (missing names, labels or error regions, rules that
//! disagree with attributes) are reported to a [`WarningSink`]. The default
//! sink logs through `tracing`.

pub mod audit;
pub mod consistency;
mod error;
mod field;
pub mod memory;
pub mod prelude;
mod registry;
mod result;
mod rule;
mod schema;
mod surface;
mod validator;
mod warning;

pub use error::FormError;
pub use field::{Field, FieldMode, FieldTarget, FieldValue};
pub use registry::{RuleContext, RuleHandler, RuleRegistry};
pub use result::{FormResult, ValidationOutcome};
pub use rule::{Rule, RuleError, RuleKind};
pub use schema::{FieldSchema, FormSchema};
pub use surface::{ElementId, Form, InputSurface, Presentation};
pub use validator::{Validator, ValidatorBuilder, ValidatorOptions};
pub use warning::{CollectingSink, FnSink, NoopSink, TracingSink, Warning, WarningSink};
