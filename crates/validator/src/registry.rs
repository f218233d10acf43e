//! Rule registry: tag → evaluator lookup
//!
//! Every rule kind is evaluated by a plain function looked up by its wire
//! tag. A tag with no handler is inert: [`RuleRegistry::evaluate`] returns
//! `None` for it, which keeps rule sets written for other engine versions
//! loadable without special-casing them anywhere else.
//!
//! # Examples
//!
//! ```rust,ignore
//! use formguard_validator::prelude::*;
//!
//! let registry = RuleRegistry::standard();
//! let value = FieldValue::Scalar(String::new());
//! let message = registry.evaluate(&Rule::required(), &value, &ctx);
//! assert_eq!(message.as_deref(), Some("Field is required"));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use crate::field::FieldValue;
use crate::rule::{Rule, RuleKind};
use crate::surface::{ElementId, InputSurface};

/// What an evaluator may look at besides the value itself.
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    surface: &'a dyn InputSurface,
    element: ElementId,
}

impl<'a> RuleContext<'a> {
    /// Creates a context for the field anchored at `element`.
    pub fn new(surface: &'a dyn InputSurface, element: ElementId) -> Self {
        Self { surface, element }
    }

    /// The surface the field lives on.
    #[must_use]
    pub fn surface(&self) -> &'a dyn InputSurface {
        self.surface
    }

    /// The field's anchor element (the input, or the first input of a group).
    #[must_use]
    pub fn element(&self) -> ElementId {
        self.element
    }
}

impl fmt::Debug for RuleContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleContext")
            .field("element", &self.element)
            .finish_non_exhaustive()
    }
}

/// Evaluates one rule; returns the error message when the rule fails.
pub type RuleHandler = fn(&FieldValue, &Rule, &RuleContext<'_>) -> Option<String>;

static STANDARD: LazyLock<RuleRegistry> = LazyLock::new(RuleRegistry::with_builtins);

// ============================================================================
// REGISTRY
// ============================================================================

/// Maps rule tags to their evaluators.
#[derive(Clone)]
pub struct RuleRegistry {
    handlers: HashMap<String, RuleHandler>,
}

impl RuleRegistry {
    /// The shared registry with every built-in rule.
    #[must_use]
    pub fn standard() -> &'static RuleRegistry {
        &STANDARD
    }

    /// Creates a registry with every built-in rule.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register("required", required);
        registry.register("minLength", min_length);
        registry.register("maxLength", max_length);
        registry.register("min", min);
        registry.register("max", max);
        registry.register("pattern", pattern);
        registry.register("match", matches);
        registry.register("minChecked", min_checked);
        registry.register("email", email);
        registry
    }

    /// Creates a registry that knows no rules at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Installs (or replaces) the handler for `tag`.
    pub fn register(&mut self, tag: impl Into<String>, handler: RuleHandler) -> &mut Self {
        self.handlers.insert(tag.into(), handler);
        self
    }

    /// Whether a handler is installed for `tag`.
    #[must_use]
    pub fn knows(&self, tag: &str) -> bool {
        self.handlers.contains_key(tag)
    }

    /// Evaluates `rule` against `value`.
    ///
    /// Returns `None` when the rule passes, does not apply to this kind of
    /// value, or has no handler.
    pub fn evaluate(
        &self,
        rule: &Rule,
        value: &FieldValue,
        ctx: &RuleContext<'_>,
    ) -> Option<String> {
        let handler = self.handlers.get(rule.tag())?;
        let message = handler(value, rule, ctx)?;
        tracing::trace!(rule = rule.tag(), element = ctx.element().index(), %message, "rule failed");
        Some(message)
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        tags.sort_unstable();
        f.debug_struct("RuleRegistry").field("rules", &tags).finish()
    }
}

// ============================================================================
// BUILT-IN EVALUATORS
// ============================================================================

fn required(value: &FieldValue, rule: &Rule, _ctx: &RuleContext<'_>) -> Option<String> {
    value
        .is_empty()
        .then(|| rule.message_or(|| "Field is required".to_owned()))
}

fn min_length(value: &FieldValue, rule: &Rule, _ctx: &RuleContext<'_>) -> Option<String> {
    let (RuleKind::MinLength(bound), FieldValue::Scalar(text)) = (&rule.kind, value) else {
        return None;
    };
    (text.chars().count() < *bound)
        .then(|| rule.message_or(|| format!("Minimum length is {bound} characters")))
}

fn max_length(value: &FieldValue, rule: &Rule, _ctx: &RuleContext<'_>) -> Option<String> {
    let (RuleKind::MaxLength(bound), FieldValue::Scalar(text)) = (&rule.kind, value) else {
        return None;
    };
    (text.chars().count() > *bound)
        .then(|| rule.message_or(|| format!("Maximum length is {bound} characters")))
}

fn min(value: &FieldValue, rule: &Rule, _ctx: &RuleContext<'_>) -> Option<String> {
    let RuleKind::Min(bound) = rule.kind else {
        return None;
    };
    let number = value.as_number()?;
    (number < bound).then(|| rule.message_or(|| format!("Minimum value is {bound}")))
}

fn max(value: &FieldValue, rule: &Rule, _ctx: &RuleContext<'_>) -> Option<String> {
    let RuleKind::Max(bound) = rule.kind else {
        return None;
    };
    let number = value.as_number()?;
    (number > bound).then(|| rule.message_or(|| format!("Maximum value is {bound}")))
}

fn pattern(value: &FieldValue, rule: &Rule, ctx: &RuleContext<'_>) -> Option<String> {
    let (RuleKind::Pattern(source), FieldValue::Scalar(text)) = (&rule.kind, value) else {
        return None;
    };
    let regex = match fancy_regex::Regex::new(source) {
        Ok(regex) => regex,
        Err(error) => {
            tracing::warn!(
                target: "formguard",
                pattern = %source,
                element = ctx.element().index(),
                %error,
                "skipping pattern rule with an invalid expression"
            );
            return None;
        }
    };
    // A search that gives up (backtrack limit) counts as a mismatch.
    let matched = regex.is_match(text).unwrap_or_else(|error| {
        tracing::warn!(
            target: "formguard",
            pattern = %source,
            element = ctx.element().index(),
            %error,
            "pattern search aborted"
        );
        false
    });
    (!matched)
        .then(|| rule.message_or(|| "Value does not match the required pattern".to_owned()))
}

fn matches(value: &FieldValue, rule: &Rule, ctx: &RuleContext<'_>) -> Option<String> {
    let (RuleKind::Match(other), FieldValue::Scalar(text)) = (&rule.kind, value) else {
        return None;
    };
    let sibling = ctx.surface().find_field_by_name(other)?;
    (ctx.surface().value(sibling) != *text)
        .then(|| rule.message_or(|| "Values do not match".to_owned()))
}

fn min_checked(value: &FieldValue, rule: &Rule, _ctx: &RuleContext<'_>) -> Option<String> {
    let (RuleKind::MinChecked(bound), FieldValue::Group(selected)) = (&rule.kind, value) else {
        return None;
    };
    (selected.len() < *bound)
        .then(|| rule.message_or(|| format!("Select at least {bound} options")))
}

fn email(value: &FieldValue, rule: &Rule, ctx: &RuleContext<'_>) -> Option<String> {
    if !matches!((&rule.kind, value), (RuleKind::Email, FieldValue::Scalar(_))) {
        return None;
    }
    let surface = ctx.surface();
    if surface.native_type(ctx.element()) != "email" {
        return None;
    }
    (!surface.is_natively_valid(ctx.element()))
        .then(|| rule.message_or(|| "Invalid email".to_owned()))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{Control, MemoryForm};
    use indexmap::IndexSet;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn scalar(value: &str) -> FieldValue {
        FieldValue::Scalar(value.to_owned())
    }

    fn group(values: &[&str]) -> FieldValue {
        FieldValue::Group(values.iter().map(|v| (*v).to_owned()).collect::<IndexSet<_>>())
    }

    fn single(control: Control) -> (MemoryForm, ElementId) {
        let form = MemoryForm::builder().wrapper(|w| w.control(control)).build();
        let element = form.form_controls()[0];
        (form, element)
    }

    fn eval(rule: &Rule, value: &FieldValue) -> Option<String> {
        let (form, element) = single(Control::input("text").name("field"));
        RuleRegistry::standard().evaluate(rule, value, &RuleContext::new(&form, element))
    }

    #[rstest]
    #[case::empty_scalar(scalar(""), true)]
    #[case::whitespace_counts_as_value(scalar(" "), false)]
    #[case::filled_scalar(scalar("x"), false)]
    #[case::empty_group(group(&[]), true)]
    #[case::selected_group(group(&["a"]), false)]
    fn required_rule(#[case] value: FieldValue, #[case] fails: bool) {
        assert_eq!(eval(&Rule::required(), &value).is_some(), fails);
    }

    #[rstest]
    #[case("ab", Some("Minimum length is 3 characters"))]
    #[case("abc", None)]
    #[case("абв", None)]
    fn min_length_rule(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(eval(&Rule::min_length(3), &scalar(input)).as_deref(), expected);
    }

    #[rstest]
    #[case("abcd", None)]
    #[case("abcde", Some("Maximum length is 4 characters"))]
    fn max_length_rule(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(eval(&Rule::max_length(4), &scalar(input)).as_deref(), expected);
    }

    #[rstest]
    #[case("4", Some("Minimum value is 5"))]
    #[case("5", None)]
    #[case(" 7.5 ", None)]
    #[case("abc", None)]
    #[case("", Some("Minimum value is 5"))]
    #[case("  ", Some("Minimum value is 5"))]
    #[case("0x10", None)]
    #[case("0b11", Some("Minimum value is 5"))]
    #[case("NaN", None)]
    fn min_rule(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(eval(&Rule::min(5.0), &scalar(input)).as_deref(), expected);
    }

    #[rstest]
    #[case("10", None)]
    #[case("10.5", Some("Maximum value is 10"))]
    #[case("-3", None)]
    #[case("0xFF", Some("Maximum value is 10"))]
    #[case("Infinity", Some("Maximum value is 10"))]
    #[case("inf", None)]
    #[case("+inf", None)]
    #[case("INFINITY", None)]
    fn max_rule(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(eval(&Rule::max(10.0), &scalar(input)).as_deref(), expected);
    }

    #[test]
    fn pattern_rule_searches_unanchored() {
        let rule = Rule::pattern(r"\d{3}");
        assert_eq!(eval(&rule, &scalar("abc123def")), None);
        assert_eq!(
            eval(&rule, &scalar("abc")).as_deref(),
            Some("Value does not match the required pattern")
        );
    }

    #[rstest]
    #[case::lookahead_without_digit(r"^(?=.*\d).{8,}$", "abcdefgh", false)]
    #[case::lookahead_with_digit(r"^(?=.*\d).{8,}$", "abcdefg1", true)]
    #[case::negative_lookahead(r"^(?!admin$)", "admin", false)]
    #[case::backreference(r"^(\w)\1$", "aa", true)]
    #[case::backreference_mismatch(r"^(\w)\1$", "ab", false)]
    fn pattern_rule_supports_lookaround(
        #[case] source: &str,
        #[case] input: &str,
        #[case] passes: bool,
    ) {
        assert_eq!(eval(&Rule::pattern(source), &scalar(input)).is_none(), passes);
    }

    #[test]
    fn invalid_pattern_is_skipped() {
        assert_eq!(eval(&Rule::pattern("(unclosed"), &scalar("anything")), None);
    }

    #[test]
    fn min_checked_rule_crossing() {
        let rule = Rule::min_checked(2).with_message("Pick two");
        assert_eq!(eval(&rule, &group(&["a"])).as_deref(), Some("Pick two"));
        assert_eq!(eval(&rule, &group(&["a", "b"])), None);
    }

    #[test]
    fn wrong_mode_rules_are_inert() {
        assert_eq!(eval(&Rule::min_checked(5), &scalar("")), None);
        assert_eq!(eval(&Rule::min_length(5), &group(&[])), None);
        assert_eq!(eval(&Rule::min(5.0), &group(&["1"])), None);
        assert_eq!(eval(&Rule::pattern("x"), &group(&["y"])), None);
    }

    #[test]
    fn unknown_rules_are_inert() {
        assert_eq!(eval(&Rule::unknown("luhn"), &scalar("")), None);
        assert!(!RuleRegistry::standard().knows("luhn"));
    }

    #[test]
    fn email_rule_defers_to_native_check() {
        let (form, element) = single(Control::input("email").name("email"));
        let ctx = RuleContext::new(&form, element);
        let rule = Rule::email().with_message("Invalid email");

        form.set_value(element, "not-an-email");
        assert_eq!(
            RuleRegistry::standard()
                .evaluate(&rule, &scalar("not-an-email"), &ctx)
                .as_deref(),
            Some("Invalid email")
        );

        form.set_value(element, "ivan@example.com");
        assert_eq!(
            RuleRegistry::standard().evaluate(&rule, &scalar("ivan@example.com"), &ctx),
            None
        );
    }

    #[test]
    fn email_rule_ignores_non_email_inputs() {
        let (form, element) = single(Control::input("text").name("email"));
        form.set_custom_validity(element, "broken");
        let ctx = RuleContext::new(&form, element);
        assert_eq!(
            RuleRegistry::standard().evaluate(&Rule::email(), &scalar("x"), &ctx),
            None
        );
    }

    #[test]
    fn match_rule_compares_sibling_value() {
        let form = MemoryForm::builder()
            .wrapper(|w| w.control(Control::input("password").name("password").value("s3cret")))
            .wrapper(|w| w.control(Control::input("password").name("confirm")))
            .build();
        let confirm = form.find_field_by_name("confirm").unwrap();
        let ctx = RuleContext::new(&form, confirm);
        let registry = RuleRegistry::standard();

        assert_eq!(
            registry
                .evaluate(&Rule::matches("password"), &scalar("other"), &ctx)
                .as_deref(),
            Some("Values do not match")
        );
        assert_eq!(
            registry.evaluate(&Rule::matches("password"), &scalar("s3cret"), &ctx),
            None
        );
        assert_eq!(
            registry.evaluate(&Rule::matches("missing"), &scalar("other"), &ctx),
            None
        );
    }

    #[test]
    fn custom_handlers_can_be_registered() {
        fn never_empty(value: &FieldValue, rule: &Rule, _: &RuleContext<'_>) -> Option<String> {
            value.is_empty().then(|| rule.message_or(|| "custom".to_owned()))
        }

        let mut registry = RuleRegistry::with_builtins();
        registry.register("notBlank", never_empty);
        let (form, element) = single(Control::input("text").name("field"));
        let ctx = RuleContext::new(&form, element);

        assert_eq!(
            registry
                .evaluate(&Rule::unknown("notBlank"), &scalar(""), &ctx)
                .as_deref(),
            Some("custom")
        );
    }
}
