//! The validator: field registry and form-level validation
//!
//! A [`Validator`] borrows a [`Form`] for its whole life. Construction runs
//! the structural audit; [`add_field`](Validator::add_field) resolves a
//! name to its controls, checks the rules against the markup and stores the
//! field; [`validate`](Validator::validate) evaluates every field in
//! registration order.
//!
//! # Examples
//!
//! ```rust,ignore
//! use formguard_validator::prelude::*;
//!
//! let mut validator = Validator::new(&form);
//! validator
//!     .add_field("username", vec![Rule::required()])?
//!     .add_field("roles", vec![Rule::min_checked(2).with_message("Pick two")])?;
//!
//! let result = validator.validate();
//! if !result.valid {
//!     println!("{:?}", result.errors);
//! }
//! ```

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::audit::check_form_structure;
use crate::consistency;
use crate::error::FormError;
use crate::field::Field;
use crate::registry::RuleRegistry;
use crate::result::{FormResult, ValidationOutcome};
use crate::rule::Rule;
use crate::schema::FormSchema;
use crate::surface::{ElementId, Form, is_group_type};
use crate::warning::{NoopSink, TracingSink, Warning, WarningSink};

// ============================================================================
// OPTIONS
// ============================================================================

/// Knobs for a [`Validator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorOptions {
    /// Drop every warning instead of forwarding it to the sink.
    pub suppress_warnings: bool,
    /// Run the structural audit at construction.
    pub audit_structure: bool,
    /// Run the consistency checker when a field is registered.
    pub check_consistency: bool,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            suppress_warnings: false,
            audit_structure: true,
            check_consistency: true,
        }
    }
}

impl ValidatorOptions {
    /// Default options: every check on, warnings forwarded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets [`suppress_warnings`](Self::suppress_warnings).
    #[must_use = "builder methods must be chained or built"]
    pub fn suppress_warnings(mut self, suppress: bool) -> Self {
        self.suppress_warnings = suppress;
        self
    }

    /// Sets [`audit_structure`](Self::audit_structure).
    #[must_use = "builder methods must be chained or built"]
    pub fn audit_structure(mut self, enabled: bool) -> Self {
        self.audit_structure = enabled;
        self
    }

    /// Sets [`check_consistency`](Self::check_consistency).
    #[must_use = "builder methods must be chained or built"]
    pub fn check_consistency(mut self, enabled: bool) -> Self {
        self.check_consistency = enabled;
        self
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Configures a [`Validator`] before the construction-time audit runs.
#[must_use = "builder methods must be chained or built"]
pub struct ValidatorBuilder<'f, F: Form> {
    form: &'f F,
    sink: Box<dyn WarningSink + 'f>,
    registry: Cow<'static, RuleRegistry>,
    options: ValidatorOptions,
}

impl<'f, F: Form> ValidatorBuilder<'f, F> {
    fn new(form: &'f F) -> Self {
        Self {
            form,
            sink: Box::new(TracingSink),
            registry: Cow::Borrowed(RuleRegistry::standard()),
            options: ValidatorOptions::default(),
        }
    }

    /// Sends warnings to `sink` instead of the `tracing` log.
    pub fn sink(mut self, sink: impl WarningSink + 'f) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Evaluates rules with `registry` instead of the built-in table.
    pub fn registry(mut self, registry: RuleRegistry) -> Self {
        self.registry = Cow::Owned(registry);
        self
    }

    /// Replaces all options.
    pub fn options(mut self, options: ValidatorOptions) -> Self {
        self.options = options;
        self
    }

    /// Shorthand for toggling [`ValidatorOptions::suppress_warnings`].
    pub fn suppress_warnings(mut self, suppress: bool) -> Self {
        self.options.suppress_warnings = suppress;
        self
    }

    /// Creates the validator and audits the form's structure.
    pub fn build(self) -> Validator<'f, F> {
        let validator = Validator {
            form: self.form,
            fields: IndexMap::new(),
            registry: self.registry,
            sink: self.sink,
            options: self.options,
        };
        if validator.options.audit_structure {
            check_form_structure(validator.form, validator.sink());
        }
        validator
    }
}

impl<F: Form> fmt::Debug for ValidatorBuilder<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorBuilder")
            .field("registry", &self.registry)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// VALIDATOR
// ============================================================================

/// Validates a form against the rules registered per field.
pub struct Validator<'f, F: Form> {
    form: &'f F,
    fields: IndexMap<String, Field>,
    registry: Cow<'static, RuleRegistry>,
    sink: Box<dyn WarningSink + 'f>,
    options: ValidatorOptions,
}

impl<'f, F: Form> Validator<'f, F> {
    /// Creates a validator with default options, logging warnings through
    /// `tracing`.
    pub fn new(form: &'f F) -> Self {
        Self::builder(form).build()
    }

    /// Creates a validator with the given options.
    pub fn with_options(form: &'f F, options: ValidatorOptions) -> Self {
        Self::builder(form).options(options).build()
    }

    /// Starts configuring a validator.
    pub fn builder(form: &'f F) -> ValidatorBuilder<'f, F> {
        ValidatorBuilder::new(form)
    }

    /// Registers a field by name.
    ///
    /// When every control carrying `name` is a checkbox or radio, the field
    /// is a group over all of them. Otherwise it is a scalar field on the
    /// first such control. Registering a name again replaces the earlier
    /// field and keeps its position.
    ///
    /// # Errors
    ///
    /// [`FormError::FieldNotFound`] when no control carries `name`; nothing
    /// is registered in that case.
    pub fn add_field(&mut self, name: &str, rules: Vec<Rule>) -> Result<&mut Self, FormError> {
        let elements = self.form.find_fields_by_name(name);
        let Some(&first) = elements.first() else {
            return Err(FormError::field_not_found(name));
        };

        let all_grouped = elements
            .iter()
            .all(|&element| is_group_type(&self.form.native_type(element)));

        let field = if all_grouped {
            Field::group(name, elements, rules).ok_or_else(|| FormError::field_not_found(name))?
        } else {
            if elements.len() > 1 {
                self.warn(Warning::at(
                    format!(
                        "Field \"{name}\": {} controls share this name, validating the first",
                        elements.len()
                    ),
                    first,
                ));
            }
            Field::scalar(name, first, rules)
        };

        Ok(self.register(field))
    }

    /// Registers a group field over explicitly chosen elements.
    ///
    /// # Errors
    ///
    /// [`FormError::FieldNotFound`] when `elements` is empty.
    pub fn add_group(
        &mut self,
        name: &str,
        rules: Vec<Rule>,
        elements: Vec<ElementId>,
    ) -> Result<&mut Self, FormError> {
        let field =
            Field::group(name, elements, rules).ok_or_else(|| FormError::field_not_found(name))?;
        Ok(self.register(field))
    }

    /// Registers every field of `schema`, in order.
    ///
    /// # Errors
    ///
    /// Stops at the first field that cannot be resolved. Fields before it
    /// stay registered.
    pub fn register_schema(&mut self, schema: &FormSchema) -> Result<&mut Self, FormError> {
        for entry in &schema.fields {
            self.add_field(&entry.name, entry.rules.clone())?;
        }
        Ok(self)
    }

    /// Unregisters a field, returning it.
    pub fn remove_field(&mut self, name: &str) -> Option<Field> {
        self.fields.shift_remove(name)
    }

    /// Validates every registered field, in registration order.
    ///
    /// Each field's rendered errors are refreshed as a side effect.
    pub fn validate(&self) -> FormResult {
        let result: FormResult = self
            .fields
            .iter()
            .map(|(name, field)| (name.clone(), field.validate(self.form, &self.registry)))
            .collect();

        tracing::debug!(
            fields = self.fields.len(),
            valid = result.valid,
            errors = result.error_count(),
            "form validated"
        );
        result
    }

    /// Validates a single registered field, e.g. when its input loses focus.
    ///
    /// Returns `None` for a name that was never registered.
    pub fn validate_field(&self, name: &str) -> Option<ValidationOutcome> {
        let field = self.fields.get(name)?;
        Some(field.validate(self.form, &self.registry))
    }

    /// The registered field called `name`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Registered fields, in registration order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    /// Number of registered fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The form being validated.
    #[must_use]
    pub fn form(&self) -> &'f F {
        self.form
    }

    /// The active options.
    #[must_use]
    pub fn options(&self) -> ValidatorOptions {
        self.options
    }

    /// The registry rules are evaluated with.
    #[must_use]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    fn register(&mut self, field: Field) -> &mut Self {
        if self.options.check_consistency {
            consistency::check(&field, self.form, &self.registry, self.sink());
        }
        tracing::debug!(
            field = field.name(),
            mode = ?field.mode(),
            rules = field.rules().len(),
            "field registered"
        );
        self.fields.insert(field.name().to_owned(), field);
        self
    }

    fn sink(&self) -> &dyn WarningSink {
        if self.options.suppress_warnings {
            &NoopSink
        } else {
            &*self.sink
        }
    }

    fn warn(&self, warning: Warning) {
        self.sink().warn(warning);
    }
}

impl<F: Form> fmt::Debug for Validator<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .field("registry", &self.registry)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// TESTS
// ============================================================================
