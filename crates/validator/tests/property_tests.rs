//! Property-based tests for formguard-validator.

use formguard_validator::memory::{Control, MemoryForm};
use formguard_validator::prelude::*;
use proptest::prelude::*;

fn text_form() -> MemoryForm {
    MemoryForm::builder()
        .wrapper(|w| w.control(Control::input("text").name("field")).error_region())
        .build()
}

fn checkbox_form(count: usize) -> MemoryForm {
    MemoryForm::builder()
        .wrapper(|mut w| {
            for i in 0..count {
                w = w.control(Control::checkbox("options", format!("o{i}")));
            }
            w.error_region()
        })
        .build()
}

fn validate_text(value: &str, rules: Vec<Rule>) -> ValidationOutcome {
    let form = text_form();
    form.set_value(form.find_field_by_name("field").unwrap(), value);
    let mut validator = Validator::builder(&form).sink(CollectingSink::new()).build();
    validator.add_field("field", rules).unwrap();
    validator.validate_field("field").unwrap()
}

// ============================================================================
// LENGTH BOUNDS ARE INCLUSIVE
// ============================================================================

proptest! {
    #[test]
    fn min_length_fails_iff_shorter(s in "\\PC{0,12}", bound in 0usize..10) {
        let outcome = validate_text(&s, vec![Rule::min_length(bound)]);
        prop_assert_eq!(outcome.valid, s.chars().count() >= bound);
    }

    #[test]
    fn max_length_fails_iff_longer(s in "\\PC{0,12}", bound in 0usize..10) {
        let outcome = validate_text(&s, vec![Rule::max_length(bound)]);
        prop_assert_eq!(outcome.valid, s.chars().count() <= bound);
    }

    #[test]
    fn required_fails_iff_empty(s in "\\PC{0,4}") {
        let outcome = validate_text(&s, vec![Rule::required()]);
        prop_assert_eq!(outcome.valid, !s.is_empty());
    }
}

// ============================================================================
// NUMERIC BOUNDS
// ============================================================================

proptest! {
    #[test]
    fn min_max_bounds_are_inclusive(n in -1000i32..1000, lo in -500i32..0, hi in 0i32..500) {
        let outcome = validate_text(
            &n.to_string(),
            vec![Rule::min(f64::from(lo)), Rule::max(f64::from(hi))],
        );
        prop_assert_eq!(outcome.valid, (lo..=hi).contains(&n));
    }

    #[test]
    fn non_numeric_values_skip_numeric_rules(s in "[a-z]{1,8}") {
        let outcome = validate_text(&s, vec![Rule::min(0.0), Rule::max(0.0)]);
        prop_assert!(outcome.valid);
    }

    #[test]
    fn blank_values_count_as_zero(s in "[ \t]{0,4}", bound in -5i32..5) {
        let outcome = validate_text(&s, vec![Rule::min(f64::from(bound))]);
        prop_assert_eq!(outcome.valid, bound <= 0);
    }
}

// ============================================================================
// GROUPS: EXACT CROSSING
// ============================================================================

proptest! {
    #[test]
    fn min_checked_crosses_at_bound(total in 1usize..6, k in 1usize..6) {
        prop_assume!(k <= total);
        let form = checkbox_form(total);
        let options = form.find_fields_by_name("options");
        let mut validator = Validator::builder(&form).sink(CollectingSink::new()).build();
        validator.add_field("options", vec![Rule::min_checked(k)]).unwrap();

        for element in options.iter().take(k - 1) {
            form.set_checked(*element, true);
        }
        prop_assert!(!validator.validate().valid);

        form.set_checked(options[k - 1], true);
        prop_assert!(validator.validate().valid);
    }
}

// ============================================================================
// UNKNOWN KINDS AND IDEMPOTENCE
// ============================================================================

proptest! {
    #[test]
    fn unknown_kinds_never_fail(kind in "[a-z]{3,10}", s in "\\PC{0,8}") {
        prop_assume!(!RuleRegistry::standard().knows(&kind));
        let outcome = validate_text(&s, vec![Rule::unknown(kind)]);
        prop_assert!(outcome.valid);
    }

    #[test]
    fn validate_is_idempotent(s in "\\PC{0,8}", bound in 0usize..6) {
        let form = text_form();
        form.set_value(form.find_field_by_name("field").unwrap(), &s);
        let mut validator = Validator::builder(&form).sink(CollectingSink::new()).build();
        validator
            .add_field("field", vec![Rule::required(), Rule::min_length(bound)])
            .unwrap();

        prop_assert_eq!(validator.validate(), validator.validate());
    }

    #[test]
    fn native_message_leads(msg in "[A-Za-z ]{1,20}") {
        let form = text_form();
        let field = form.find_field_by_name("field").unwrap();
        form.set_custom_validity(field, msg.clone());
        let mut validator = Validator::builder(&form).sink(CollectingSink::new()).build();
        validator.add_field("field", vec![Rule::required()]).unwrap();

        let outcome = validator.validate_field("field").unwrap();
        prop_assert_eq!(outcome.errors.first(), Some(&msg));
        prop_assert_eq!(outcome.errors.len(), 2);
    }
}
