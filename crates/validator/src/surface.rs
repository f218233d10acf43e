//! Abstractions over the rendered form
//!
//! The engine never touches a document directly. Everything it needs to know
//! about inputs goes through [`InputSurface`], and the only thing it ever
//! writes (error text) goes through [`Presentation`]. A real document, a
//! virtual one, or the in-memory [`MemoryForm`](crate::memory::MemoryForm)
//! can back both.
//!
//! Elements are addressed by [`ElementId`] handles. A handle is a non-owning
//! reference: the surface owns the elements, fields only remember which ones
//! they were resolved to.

use std::fmt;

use indexmap::IndexSet;

/// Opaque handle to a form control owned by an [`InputSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

impl ElementId {
    /// Returns the raw index of this handle.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Read-only view of the form controls a validator works against.
///
/// Implementations answer with the *current* state on every call; the
/// engine never caches anything it reads here.
pub trait InputSurface {
    /// Current value of a single control.
    fn value(&self, element: ElementId) -> String;

    /// Values of the checked controls in `group`, in document order.
    fn selected_values(&self, group: &[ElementId]) -> IndexSet<String>;

    /// Whether the control passes its native constraint validation.
    fn is_natively_valid(&self, element: ElementId) -> bool;

    /// The native validation message; empty when the control is valid.
    fn native_validation_message(&self, element: ElementId) -> String;

    /// Value of a markup attribute, if present.
    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;

    /// Whether a markup attribute is present.
    fn has_attribute(&self, element: ElementId, name: &str) -> bool {
        self.attribute(element, name).is_some()
    }

    /// Native control type, lowercased (`"text"`, `"email"`, `"checkbox"`,
    /// `"textarea"`, `"select-one"`, ...).
    fn native_type(&self, element: ElementId) -> String;

    /// First control whose `name` attribute equals `name`.
    fn find_field_by_name(&self, name: &str) -> Option<ElementId> {
        self.find_fields_by_name(name).into_iter().next()
    }

    /// Every control whose `name` attribute equals `name`, in document order.
    fn find_fields_by_name(&self, name: &str) -> Vec<ElementId>;

    /// Whether the form contains a `label` whose `for` targets `element_id`.
    fn find_label_for(&self, element_id: &str) -> bool;

    /// Every input, textarea and select in the form, in document order.
    fn form_controls(&self) -> Vec<ElementId>;

    /// Whether the control has an error-display region next to it.
    fn has_error_region(&self, element: ElementId) -> bool;

    /// Short human-readable description used in diagnostics.
    fn describe(&self, element: ElementId) -> String {
        element.to_string()
    }
}

/// Renders validation messages next to a control.
///
/// Methods take `&self`: the presentation is part of an externally owned
/// document that other parties hold references to as well.
pub trait Presentation {
    /// Removes any previously rendered messages for `element`.
    fn clear_errors(&self, element: ElementId);

    /// Renders `messages` in the error region associated with `element`.
    fn show_errors(&self, element: ElementId, messages: &[String]);
}

/// A surface that can both be read and display errors.
pub trait Form: InputSurface + Presentation {}

impl<T: InputSurface + Presentation + ?Sized> Form for T {}

/// Controls that form a multi-value group when they share a name.
pub(crate) fn is_group_type(native_type: &str) -> bool {
    matches!(native_type, "checkbox" | "radio")
}
