//! Structural audit of a form's markup
//!
//! Run once when a [`Validator`](crate::Validator) is constructed. Flags
//! controls that the engine (or a screen reader) will have trouble with.

use crate::surface::InputSurface;
use crate::warning::{Warning, WarningSink};

/// Walks every control of `surface` and reports structural problems:
///
/// - a control without a `name` attribute;
/// - a control whose `id` no `label[for]` points at;
/// - a control with no error-display region next to it.
///
/// Controls without a name are referred to by their description.
pub fn check_form_structure<S, W>(surface: &S, sink: &W)
where
    S: InputSurface + ?Sized,
    W: WarningSink + ?Sized,
{
    let controls = surface.form_controls();
    for &element in &controls {
        let name = surface
            .attribute(element, "name")
            .filter(|name| !name.is_empty());
        if name.is_none() {
            sink.warn(Warning::at("Input without name attribute", element));
        }
        let label = name.unwrap_or_else(|| surface.describe(element));

        if let Some(id) = surface.attribute(element, "id").filter(|id| !id.is_empty()) {
            if !surface.find_label_for(&id) {
                sink.warn(Warning::at(format!("Missing label for {label}"), element));
            }
        }

        if !surface.has_error_region(element) {
            sink.warn(Warning::at(
                format!("Missing error container for {label}"),
                element,
            ));
        }
    }
    tracing::debug!(controls = controls.len(), "form structure audited");
}
