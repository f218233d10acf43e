//! In-memory form
//!
//! [`MemoryForm`] is a small virtual document: controls grouped into
//! wrappers (the parent element of a control, which may own an error
//! region), plus the set of ids targeted by `label[for]`. It implements
//! both [`InputSurface`] and [`Presentation`], models HTML constraint
//! validation closely enough for the engine's purposes, and can be built in
//! code or loaded from a JSON fixture.
//!
//! All mutation goes through `&self`, so a form can change between
//! validations while a [`Validator`](crate::Validator) borrows it.
//!
//! # Examples
//!
//! ```rust,ignore
//! use formguard_validator::memory::{Control, MemoryForm};
//!
//! let form = MemoryForm::builder()
//!     .wrapper(|w| {
//!         w.control(Control::input("email").name("email").id("email"))
//!             .error_region()
//!     })
//!     .label_for("email")
//!     .build();
//!
//! let email = form.find_field_by_name("email").unwrap();
//! form.set_value(email, "not-an-email");
//! assert!(!form.is_natively_valid(email));
//! ```

use std::cell::RefCell;
use std::fmt::Write as _;
use std::sync::LazyLock;

use indexmap::{IndexMap, IndexSet};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::surface::{ElementId, InputSurface, Presentation};

/// WHATWG "valid e-mail address" production.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email regex is valid")
});

/// Absolute URL with a scheme and no whitespace.
static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*:[^\s]+$").expect("url regex is valid")
});

/// Input types that never take part in constraint validation.
const BARRED_TYPES: &[&str] = &["hidden", "submit", "reset", "button", "image"];

// ============================================================================
// DOCUMENT MODEL
// ============================================================================

/// Element kind of a form control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlTag {
    /// `<input>`; its `type` attribute picks the behavior.
    #[default]
    Input,
    /// `<textarea>`.
    Textarea,
    /// `<select>`.
    Select,
}

/// A form control as declared in a fixture or built in code.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Control {
    /// Element kind.
    pub tag: ControlTag,
    /// Markup attributes (`type`, `name`, `id`, `required`, ...). Boolean
    /// attributes are present with an empty value.
    pub attributes: IndexMap<String, String>,
    /// Current value. For checkboxes and radios this is the submitted value.
    pub value: String,
    /// Checkedness of a checkbox or radio.
    pub checked: bool,
}

impl Control {
    /// An `<input>` of the given type.
    pub fn input(input_type: impl Into<String>) -> Self {
        Self::default().attr("type", input_type)
    }

    /// A `<textarea>`.
    #[must_use]
    pub fn textarea() -> Self {
        Self {
            tag: ControlTag::Textarea,
            ..Self::default()
        }
    }

    /// A `<select>`.
    #[must_use]
    pub fn select() -> Self {
        Self {
            tag: ControlTag::Select,
            ..Self::default()
        }
    }

    /// A checkbox submitting `value` under `name`.
    pub fn checkbox(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::input("checkbox").name(name).value(value)
    }

    /// A radio button submitting `value` under `name`.
    pub fn radio(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::input("radio").name(name).value(value)
    }

    /// Sets an attribute.
    #[must_use = "builder methods must be chained or built"]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Sets a boolean attribute.
    #[must_use = "builder methods must be chained or built"]
    pub fn flag(self, name: impl Into<String>) -> Self {
        self.attr(name, "")
    }

    /// Sets the `name` attribute.
    #[must_use = "builder methods must be chained or built"]
    pub fn name(self, name: impl Into<String>) -> Self {
        self.attr("name", name)
    }

    /// Sets the `id` attribute.
    #[must_use = "builder methods must be chained or built"]
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Sets the `required` attribute.
    #[must_use = "builder methods must be chained or built"]
    pub fn required(self) -> Self {
        self.flag("required")
    }

    /// Sets the initial value.
    #[must_use = "builder methods must be chained or built"]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Sets the initial checkedness.
    #[must_use = "builder methods must be chained or built"]
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }
}

fn native_type_of(tag: ControlTag, attributes: &IndexMap<String, String>) -> String {
    match tag {
        ControlTag::Input => attributes
            .get("type")
            .map_or_else(|| "text".to_owned(), |t| t.to_ascii_lowercase()),
        ControlTag::Textarea => "textarea".to_owned(),
        ControlTag::Select if attributes.contains_key("multiple") => "select-multiple".to_owned(),
        ControlTag::Select => "select-one".to_owned(),
    }
}

/// Parent element of one or more controls.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Wrapper {
    /// Controls inside the wrapper, in document order.
    pub controls: Vec<Control>,
    /// Whether the wrapper contains an error-display region.
    pub error_region: bool,
}

/// Serializable description of a whole form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormDocument {
    /// Wrappers in document order.
    pub wrappers: Vec<Wrapper>,
    /// Ids targeted by `label[for]` elements.
    pub labels: Vec<String>,
}

// ============================================================================
// BUILDERS
// ============================================================================

/// Builds one [`Wrapper`].
#[derive(Debug, Default)]
pub struct WrapperBuilder {
    wrapper: Wrapper,
}

impl WrapperBuilder {
    /// Appends a control.
    #[must_use = "builder methods must be chained or built"]
    pub fn control(mut self, control: Control) -> Self {
        self.wrapper.controls.push(control);
        self
    }

    /// Gives the wrapper an error-display region.
    #[must_use = "builder methods must be chained or built"]
    pub fn error_region(mut self) -> Self {
        self.wrapper.error_region = true;
        self
    }
}

/// Builds a [`MemoryForm`].
#[derive(Debug, Default)]
pub struct MemoryFormBuilder {
    document: FormDocument,
}

impl MemoryFormBuilder {
    /// Appends a wrapper configured by `configure`.
    #[must_use = "builder methods must be chained or built"]
    pub fn wrapper(mut self, configure: impl FnOnce(WrapperBuilder) -> WrapperBuilder) -> Self {
        let built = configure(WrapperBuilder::default());
        self.document.wrappers.push(built.wrapper);
        self
    }

    /// Appends a control in a wrapper of its own, without an error region.
    #[must_use = "builder methods must be chained or built"]
    pub fn control(self, control: Control) -> Self {
        self.wrapper(|w| w.control(control))
    }

    /// Adds a `label[for=id]`.
    #[must_use = "builder methods must be chained or built"]
    pub fn label_for(mut self, id: impl Into<String>) -> Self {
        self.document.labels.push(id.into());
        self
    }

    /// Finishes the form.
    #[must_use]
    pub fn build(self) -> MemoryForm {
        MemoryForm::from_document(self.document)
    }
}

// ============================================================================
// NATIVE VALIDITY
// ============================================================================

/// The first constraint a control violates.
#[derive(Debug, Clone, PartialEq)]
enum Violation {
    Custom(String),
    ValueMissing(&'static str),
    TypeMismatch(&'static str),
    BadInput,
    PatternMismatch,
    TooLong { max: usize, len: usize },
    TooShort { min: usize, len: usize },
    RangeUnderflow(String),
    RangeOverflow(String),
}

impl Violation {
    fn message(&self) -> String {
        match self {
            Self::Custom(message) => message.clone(),
            Self::ValueMissing(message) | Self::TypeMismatch(message) => (*message).to_owned(),
            Self::BadInput => "Please enter a number.".to_owned(),
            Self::PatternMismatch => "Please match the requested format.".to_owned(),
            Self::TooLong { max, len } => format!(
                "Please shorten this text to {max} characters or less (you are currently using {len} characters)."
            ),
            Self::TooShort { min, len } => format!(
                "Please lengthen this text to {min} characters or more (you are currently using {len} characters)."
            ),
            Self::RangeUnderflow(min) => format!("Value must be greater than or equal to {min}."),
            Self::RangeOverflow(max) => format!("Value must be less than or equal to {max}."),
        }
    }
}

// ============================================================================
// FORM
// ============================================================================

#[derive(Debug, Default)]
struct ControlState {
    value: String,
    checked: bool,
    custom_validity: String,
}

#[derive(Debug)]
struct ControlEntry {
    tag: ControlTag,
    attributes: IndexMap<String, String>,
    wrapper: usize,
    state: RefCell<ControlState>,
}

impl ControlEntry {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    fn name(&self) -> Option<&str> {
        self.attribute("name")
    }

    fn native_type(&self) -> String {
        native_type_of(self.tag, &self.attributes)
    }
}

#[derive(Debug)]
struct WrapperEntry {
    error_region: bool,
    errors: RefCell<Vec<String>>,
}

/// A virtual form document.
#[derive(Debug)]
pub struct MemoryForm {
    controls: Vec<ControlEntry>,
    wrappers: Vec<WrapperEntry>,
    labels: IndexSet<String>,
}

impl MemoryForm {
    /// Starts building a form.
    #[must_use]
    pub fn builder() -> MemoryFormBuilder {
        MemoryFormBuilder::default()
    }

    /// Creates a form from its description.
    #[must_use]
    pub fn from_document(document: FormDocument) -> Self {
        let mut controls = Vec::new();
        let mut wrappers = Vec::with_capacity(document.wrappers.len());

        for (index, wrapper) in document.wrappers.into_iter().enumerate() {
            wrappers.push(WrapperEntry {
                error_region: wrapper.error_region,
                errors: RefCell::new(Vec::new()),
            });
            controls.extend(wrapper.controls.into_iter().map(|control| ControlEntry {
                tag: control.tag,
                attributes: control.attributes,
                wrapper: index,
                state: RefCell::new(ControlState {
                    value: control.value,
                    checked: control.checked,
                    custom_validity: String::new(),
                }),
            }));
        }

        Self {
            controls,
            wrappers,
            labels: document.labels.into_iter().collect(),
        }
    }

    /// Parses a JSON [`FormDocument`].
    ///
    /// # Errors
    ///
    /// Returns the parse error when `json` is not a valid document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<FormDocument>(json).map(Self::from_document)
    }

    /// Number of controls in the form.
    #[must_use]
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    /// Whether the form has no controls.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Replaces the current value of a control.
    pub fn set_value(&self, element: ElementId, value: impl Into<String>) {
        if let Some(entry) = self.entry(element) {
            entry.state.borrow_mut().value = value.into();
        }
    }

    /// Checks or unchecks a checkbox or radio.
    ///
    /// Checking a radio unchecks every other radio with the same name.
    pub fn set_checked(&self, element: ElementId, checked: bool) {
        let Some(entry) = self.entry(element) else {
            return;
        };
        if checked && entry.native_type() == "radio" {
            if let Some(name) = entry.name() {
                for other in self.controls.iter().filter(|c| c.name() == Some(name)) {
                    other.state.borrow_mut().checked = false;
                }
            }
        }
        entry.state.borrow_mut().checked = checked;
    }

    /// Sets a custom validity message; an empty message clears it.
    pub fn set_custom_validity(&self, element: ElementId, message: impl Into<String>) {
        if let Some(entry) = self.entry(element) {
            entry.state.borrow_mut().custom_validity = message.into();
        }
    }

    /// Whether a checkbox or radio is checked.
    #[must_use]
    pub fn is_checked(&self, element: ElementId) -> bool {
        self.entry(element)
            .is_some_and(|entry| entry.state.borrow().checked)
    }

    /// Messages currently rendered in the error region next to `element`.
    #[must_use]
    pub fn rendered_errors(&self, element: ElementId) -> Vec<String> {
        self.wrapper_of(element)
            .map(|wrapper| wrapper.errors.borrow().clone())
            .unwrap_or_default()
    }

    fn entry(&self, element: ElementId) -> Option<&ControlEntry> {
        self.controls.get(element.index())
    }

    fn wrapper_of(&self, element: ElementId) -> Option<&WrapperEntry> {
        self.entry(element)
            .and_then(|entry| self.wrappers.get(entry.wrapper))
    }

    fn violation(&self, entry: &ControlEntry) -> Option<Violation> {
        let native_type = entry.native_type();
        if BARRED_TYPES.contains(&native_type.as_str()) || entry.attribute("disabled").is_some() {
            return None;
        }

        let state = entry.state.borrow();
        if !state.custom_validity.is_empty() {
            return Some(Violation::Custom(state.custom_validity.clone()));
        }

        let required = entry.attribute("required").is_some();
        match native_type.as_str() {
            "checkbox" => {
                return (required && !state.checked).then_some(Violation::ValueMissing(
                    "Please check this box if you want to proceed.",
                ));
            }
            "radio" => {
                let group_required_unchecked = entry.name().is_some_and(|name| {
                    let group = self.controls.iter().filter(|c| c.name() == Some(name));
                    let mut any_required = false;
                    let mut any_checked = false;
                    for radio in group {
                        any_required |= radio.attribute("required").is_some();
                        any_checked |= radio.state.borrow().checked;
                    }
                    any_required && !any_checked
                });
                return group_required_unchecked
                    .then_some(Violation::ValueMissing("Please select one of these options."));
            }
            _ => {}
        }

        let value = state.value.as_str();
        if value.is_empty() {
            return required.then_some(Violation::ValueMissing(match entry.tag {
                ControlTag::Select => "Please select an item in the list.",
                _ => "Please fill out this field.",
            }));
        }

        match native_type.as_str() {
            "email" if !EMAIL.is_match(value) => {
                return Some(Violation::TypeMismatch("Please enter an email address."));
            }
            "url" if !URL.is_match(value) => {
                return Some(Violation::TypeMismatch("Please enter a URL."));
            }
            "number" | "range" => return number_violation(entry, value),
            _ => {}
        }

        if let Some(source) = entry.attribute("pattern") {
            if let Ok(regex) = Regex::new(&format!("^(?:{source})$")) {
                if !regex.is_match(value) {
                    return Some(Violation::PatternMismatch);
                }
            }
        }

        let len = value.chars().count();
        if let Some(max) = entry.attribute("maxlength").and_then(|m| m.parse().ok()) {
            if len > max {
                return Some(Violation::TooLong { max, len });
            }
        }
        if let Some(min) = entry.attribute("minlength").and_then(|m| m.parse().ok()) {
            if len < min {
                return Some(Violation::TooShort { min, len });
            }
        }
        None
    }
}

fn number_violation(entry: &ControlEntry, value: &str) -> Option<Violation> {
    let Ok(number) = value.trim().parse::<f64>() else {
        return Some(Violation::BadInput);
    };
    if number.is_nan() {
        return Some(Violation::BadInput);
    }
    let bound = |name: &str| {
        entry
            .attribute(name)
            .and_then(|raw| raw.parse::<f64>().ok().map(|n| (raw, n)))
    };
    if let Some((raw, min)) = bound("min") {
        if number < min {
            return Some(Violation::RangeUnderflow(raw.to_owned()));
        }
    }
    if let Some((raw, max)) = bound("max") {
        if number > max {
            return Some(Violation::RangeOverflow(raw.to_owned()));
        }
    }
    None
}

impl From<FormDocument> for MemoryForm {
    fn from(document: FormDocument) -> Self {
        Self::from_document(document)
    }
}

impl InputSurface for MemoryForm {
    fn value(&self, element: ElementId) -> String {
        self.entry(element)
            .map(|entry| entry.state.borrow().value.clone())
            .unwrap_or_default()
    }

    fn selected_values(&self, group: &[ElementId]) -> IndexSet<String> {
        group
            .iter()
            .filter_map(|element| self.entry(*element))
            .filter_map(|entry| {
                let state = entry.state.borrow();
                state.checked.then(|| state.value.clone())
            })
            .collect()
    }

    fn is_natively_valid(&self, element: ElementId) -> bool {
        self.entry(element)
            .is_none_or(|entry| self.violation(entry).is_none())
    }

    fn native_validation_message(&self, element: ElementId) -> String {
        self.entry(element)
            .and_then(|entry| self.violation(entry))
            .map(|violation| violation.message())
            .unwrap_or_default()
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.entry(element)?.attribute(name).map(str::to_owned)
    }

    fn native_type(&self, element: ElementId) -> String {
        self.entry(element)
            .map(ControlEntry::native_type)
            .unwrap_or_default()
    }

    fn find_fields_by_name(&self, name: &str) -> Vec<ElementId> {
        self.controls
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.name() == Some(name))
            .map(|(index, _)| ElementId(index))
            .collect()
    }

    fn find_label_for(&self, element_id: &str) -> bool {
        self.labels.contains(element_id)
    }

    fn form_controls(&self) -> Vec<ElementId> {
        (0..self.controls.len()).map(ElementId).collect()
    }

    fn has_error_region(&self, element: ElementId) -> bool {
        self.wrapper_of(element)
            .is_some_and(|wrapper| wrapper.error_region)
    }

    fn describe(&self, element: ElementId) -> String {
        let Some(entry) = self.entry(element) else {
            return element.to_string();
        };
        let mut out = match entry.tag {
            ControlTag::Input => format!("input[type={}]", entry.native_type()),
            ControlTag::Textarea => "textarea".to_owned(),
            ControlTag::Select => "select".to_owned(),
        };
        if let Some(id) = entry.attribute("id") {
            let _ = write!(out, "#{id}");
        }
        if let Some(name) = entry.name() {
            let _ = write!(out, "[name={name}]");
        }
        out
    }
}

impl Presentation for MemoryForm {
    fn clear_errors(&self, element: ElementId) {
        if let Some(wrapper) = self.wrapper_of(element) {
            wrapper.errors.borrow_mut().clear();
        }
    }

    fn show_errors(&self, element: ElementId, messages: &[String]) {
        if let Some(wrapper) = self.wrapper_of(element) {
            if wrapper.error_region {
                *wrapper.errors.borrow_mut() = messages.to_vec();
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn single(control: Control) -> (MemoryForm, ElementId) {
        let form = MemoryForm::builder().control(control).build();
        (form, ElementId(0))
    }

    #[rstest]
    #[case::required_empty(Control::input("text").required(), "", Some("Please fill out this field."))]
    #[case::required_filled(Control::input("text").required(), "x", None)]
    #[case::optional_empty(Control::input("text"), "", None)]
    #[case::bad_email(Control::input("email"), "not-an-email", Some("Please enter an email address."))]
    #[case::good_email(Control::input("email"), "ivan@example.com", None)]
    #[case::bad_url(Control::input("url"), "example", Some("Please enter a URL."))]
    #[case::good_url(Control::input("url"), "https://example.com", None)]
    #[case::not_a_number(Control::input("number"), "12px", Some("Please enter a number."))]
    #[case::underflow(Control::input("number").attr("min", "18"), "17", Some("Value must be greater than or equal to 18."))]
    #[case::overflow(Control::input("number").attr("max", "99"), "100", Some("Value must be less than or equal to 99."))]
    #[case::anchored_pattern(Control::input("text").attr("pattern", r"\d+"), "12a", Some("Please match the requested format."))]
    #[case::pattern_ok(Control::input("text").attr("pattern", r"\d+"), "123", None)]
    #[case::too_short(
        Control::input("text").attr("minlength", "3"),
        "ab",
        Some("Please lengthen this text to 3 characters or more (you are currently using 2 characters).")
    )]
    #[case::too_long(
        Control::textarea().attr("maxlength", "2"),
        "abc",
        Some("Please shorten this text to 2 characters or less (you are currently using 3 characters).")
    )]
    #[case::hidden_is_barred(Control::input("hidden").required(), "", None)]
    #[case::disabled_is_barred(Control::input("text").required().flag("disabled"), "", None)]
    #[case::select_missing(Control::select().required(), "", Some("Please select an item in the list."))]
    fn native_validity(
        #[case] control: Control,
        #[case] value: &str,
        #[case] expected: Option<&str>,
    ) {
        let (form, element) = single(control);
        form.set_value(element, value);

        assert_eq!(form.is_natively_valid(element), expected.is_none());
        assert_eq!(
            form.native_validation_message(element),
            expected.unwrap_or_default()
        );
    }

    #[test]
    fn custom_validity_wins() {
        let (form, element) = single(Control::input("text").required());
        form.set_custom_validity(element, "Taken");
        assert_eq!(form.native_validation_message(element), "Taken");

        form.set_custom_validity(element, "");
        assert_eq!(
            form.native_validation_message(element),
            "Please fill out this field."
        );
    }

    #[test]
    fn required_checkbox_and_radio_group() {
        let form = MemoryForm::builder()
            .control(Control::checkbox("terms", "yes").required())
            .control(Control::radio("plan", "free").required())
            .control(Control::radio("plan", "pro"))
            .build();
        let (terms, free, pro) = (ElementId(0), ElementId(1), ElementId(2));

        assert!(!form.is_natively_valid(terms));
        assert!(!form.is_natively_valid(pro));

        form.set_checked(terms, true);
        form.set_checked(pro, true);
        assert!(form.is_natively_valid(terms));
        assert!(form.is_natively_valid(free));

        form.set_checked(free, true);
        assert!(!form.is_checked(pro));
    }

    #[test]
    fn selected_values_follow_document_order() {
        let form = MemoryForm::builder()
            .control(Control::checkbox("roles", "admin"))
            .control(Control::checkbox("roles", "user").checked(true))
            .control(Control::checkbox("roles", "guest").checked(true))
            .build();
        let group = form.find_fields_by_name("roles");

        form.set_checked(group[0], true);
        assert_eq!(
            form.selected_values(&group).into_iter().collect::<Vec<_>>(),
            vec!["admin", "user", "guest"]
        );
    }

    #[test]
    fn native_types() {
        let form = MemoryForm::builder()
            .control(Control::input("EMAIL"))
            .control(Control::default())
            .control(Control::textarea())
            .control(Control::select().flag("multiple"))
            .build();
        let types: Vec<String> = form
            .form_controls()
            .into_iter()
            .map(|el| form.native_type(el))
            .collect();
        assert_eq!(types, vec!["email", "text", "textarea", "select-multiple"]);
    }

    #[test]
    fn errors_render_only_where_a_region_exists() {
        let form = MemoryForm::builder()
            .wrapper(|w| w.control(Control::input("text").name("a")).error_region())
            .control(Control::input("text").name("b"))
            .build();
        let messages = vec!["bad".to_owned()];

        form.show_errors(ElementId(0), &messages);
        form.show_errors(ElementId(1), &messages);
        assert_eq!(form.rendered_errors(ElementId(0)), messages);
        assert!(form.rendered_errors(ElementId(1)).is_empty());
        assert!(form.has_error_region(ElementId(0)));
        assert!(!form.has_error_region(ElementId(1)));

        form.clear_errors(ElementId(0));
        assert!(form.rendered_errors(ElementId(0)).is_empty());
    }

    #[test]
    fn loads_from_json() {
        let form = MemoryForm::from_json(
            r#"{
                "labels": ["username"],
                "wrappers": [
                    {
                        "errorRegion": true,
                        "controls": [
                            {"attributes": {"type": "text", "name": "username", "id": "username", "required": ""}}
                        ]
                    },
                    {
                        "controls": [
                            {"tag": "textarea", "attributes": {"name": "bio"}, "value": "hi"}
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();

        let username = form.find_field_by_name("username").unwrap();
        assert!(form.has_attribute(username, "required"));
        assert!(form.has_error_region(username));
        assert!(form.find_label_for("username"));
        assert_eq!(form.value(form.find_field_by_name("bio").unwrap()), "hi");
        assert_eq!(form.describe(username), "input[type=text]#username[name=username]");
    }

    #[test]
    fn unknown_handles_are_harmless() {
        let form = MemoryForm::builder().build();
        let ghost = ElementId(7);
        form.set_value(ghost, "x");
        assert!(form.is_empty());
        assert_eq!(form.value(ghost), "");
        assert!(form.is_natively_valid(ghost));
        assert_eq!(form.describe(ghost), "#7");
    }
}
