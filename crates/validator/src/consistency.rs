//! Registration-time consistency checks
//!
//! Compares a field's declared rules with the markup of its elements and
//! reports disagreements to a [`WarningSink`]. Nothing here affects
//! validation: a field with warnings still registers and validates exactly
//! as declared.
//!
//! Attribute comparisons (`required`, `minlength`, `maxlength`, input type)
//! only run on scalar fields. On a checkbox or radio group the native
//! `required` attribute constrains each box on its own, not the group, so
//! it cannot be compared with a group-level `required` rule.
//!
//! Rule kinds the registry has no handler for are inert. They are logged at
//! `debug` level and never reach the sink.

use crate::field::{Field, FieldMode};
use crate::registry::RuleRegistry;
use crate::rule::RuleKind;
use crate::surface::InputSurface;
use crate::warning::{Warning, WarningSink};

/// Reports every mismatch between `field`'s rules and its markup.
///
/// Rules that are inert in the field's mode are reported as well.
pub fn check<S, W>(field: &Field, surface: &S, registry: &RuleRegistry, sink: &W)
where
    S: InputSurface + ?Sized,
    W: WarningSink + ?Sized,
{
    let name = field.name();
    let anchor = field.anchor();
    let mode = field.mode();
    let warn = |message: String| sink.warn(Warning::at(message, anchor));

    for rule in field.rules() {
        let kind = &rule.kind;

        if !registry.knows(kind.tag()) {
            tracing::debug!(field = name, rule = kind.tag(), "unknown rule ignored");
            continue;
        }

        let inert = match mode {
            FieldMode::Scalar => kind.is_group_only(),
            FieldMode::Group => kind.is_scalar_only(),
        };
        if inert {
            let mode = match mode {
                FieldMode::Scalar => "single input",
                FieldMode::Group => "group",
            };
            warn(format!(
                "Field \"{name}\": rule \"{}\" has no effect on a {mode}",
                kind.tag()
            ));
            continue;
        }

        match kind {
            RuleKind::Pattern(source) => {
                if let Err(error) = fancy_regex::Regex::new(source) {
                    warn(format!(
                        "Field \"{name}\": pattern {source:?} is not a valid expression ({error})"
                    ));
                }
            }
            RuleKind::Match(other) => {
                if surface.find_field_by_name(other).is_none() {
                    warn(format!("Field \"{name}\": match target \"{other}\" not found"));
                }
            }
            _ => {}
        }

        if mode == FieldMode::Scalar {
            if let Some(message) = attribute_mismatch(name, kind, surface, field) {
                warn(message);
            }
        }
    }
}

fn attribute_mismatch<S: InputSurface + ?Sized>(
    name: &str,
    kind: &RuleKind,
    surface: &S,
    field: &Field,
) -> Option<String> {
    let element = field.anchor();
    match kind {
        RuleKind::Required => (!surface.has_attribute(element, "required")).then(|| {
            format!("Field \"{name}\" has a \"required\" rule but no required attribute")
        }),
        RuleKind::MinLength(bound) => {
            length_mismatch(name, "minLength", "minlength", *bound, surface, field)
        }
        RuleKind::MaxLength(bound) => {
            length_mismatch(name, "maxLength", "maxlength", *bound, surface, field)
        }
        RuleKind::Email => {
            let native_type = surface.native_type(element);
            (native_type != "email").then(|| {
                format!(
                    "Field \"{name}\" has an \"email\" rule but its input type is \"{native_type}\""
                )
            })
        }
        _ => None,
    }
}

fn length_mismatch<S: InputSurface + ?Sized>(
    name: &str,
    rule: &str,
    attribute: &str,
    bound: usize,
    surface: &S,
    field: &Field,
) -> Option<String> {
    let declared = surface.attribute(field.anchor(), attribute)?;
    (declared.trim().parse::<usize>().ok() != Some(bound)).then(|| {
        format!(
            "Field \"{name}\": {rule} rule ({bound}) differs from {attribute} attribute ({declared})"
        )
    })
}
