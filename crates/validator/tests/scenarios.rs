//! End-to-end scenarios against the in-memory form.

use formguard_validator::memory::{Control, MemoryForm};
use formguard_validator::prelude::*;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

// ============================================================================
// FIXTURES
// ============================================================================

/// username (required), email (type=email), and a two-checkbox role group,
/// each in a wrapper with an error region.
#[fixture]
fn signup() -> MemoryForm {
    MemoryForm::builder()
        .wrapper(|w| {
            w.control(Control::input("text").name("username").id("username").required())
                .error_region()
        })
        .wrapper(|w| {
            w.control(Control::input("email").name("email").id("email"))
                .error_region()
        })
        .wrapper(|w| {
            w.control(Control::checkbox("roles", "admin"))
                .control(Control::checkbox("roles", "user"))
                .error_region()
        })
        .label_for("username")
        .label_for("email")
        .build()
}

fn element(form: &MemoryForm, name: &str) -> ElementId {
    form.find_field_by_name(name).unwrap()
}

fn quiet(form: &MemoryForm) -> Validator<'_, MemoryForm> {
    Validator::builder(form).sink(CollectingSink::new()).build()
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[rstest]
fn happy_path(signup: MemoryForm) {
    let mut validator = quiet(&signup);
    validator
        .add_field("username", vec![Rule::required()])
        .unwrap()
        .add_field("email", vec![Rule::email()])
        .unwrap();

    signup.set_value(element(&signup, "username"), "Ivan");
    signup.set_value(element(&signup, "email"), "ivan@example.com");

    let result = validator.validate();
    assert!(result.valid);
    assert!(result.errors.is_empty());
}

#[rstest]
fn empty_required_field(signup: MemoryForm) {
    let mut validator = quiet(&signup);
    validator.add_field("username", vec![Rule::required()]).unwrap();

    let result = validator.validate();

    assert!(!result.valid);
    assert!(result.errors_for("username").contains(&"Field is required".to_owned()));
    let username = element(&signup, "username");
    assert!(signup.rendered_errors(username).contains(&"Field is required".to_owned()));
}

#[rstest]
fn invalid_email(signup: MemoryForm) {
    let mut validator = quiet(&signup);
    validator
        .add_field("email", vec![Rule::email().with_message("Invalid email")])
        .unwrap();
    signup.set_value(element(&signup, "email"), "not-an-email");

    let result = validator.validate();

    assert!(!result.valid);
    assert!(result.errors_for("email").contains(&"Invalid email".to_owned()));
}

#[rstest]
fn checkbox_group_min_checked(signup: MemoryForm) {
    let mut validator = quiet(&signup);
    validator
        .add_field(
            "roles",
            vec![Rule::min_checked(2).with_message("Select at least 2 options")],
        )
        .unwrap();
    let roles = signup.find_fields_by_name("roles");

    signup.set_checked(roles[0], true);
    let result = validator.validate();
    assert!(!result.valid);
    assert_eq!(result.errors_for("roles"), ["Select at least 2 options"]);
    assert_eq!(signup.rendered_errors(roles[0]), ["Select at least 2 options"]);

    signup.set_checked(roles[1], true);
    let result = validator.validate();
    assert!(result.valid);
    assert!(signup.rendered_errors(roles[0]).is_empty());
}

#[test]
fn password_confirmation() {
    let form = MemoryForm::builder()
        .wrapper(|w| w.control(Control::input("password").name("password")).error_region())
        .wrapper(|w| {
            w.control(Control::input("password").name("confirmPassword"))
                .error_region()
        })
        .build();
    let mut validator = quiet(&form);
    validator
        .add_field("confirmPassword", vec![Rule::matches("password")])
        .unwrap();

    form.set_value(element(&form, "password"), "hunter22");
    form.set_value(element(&form, "confirmPassword"), "hunter2");
    assert_eq!(
        validator.validate().errors_for("confirmPassword"),
        ["Values do not match"]
    );

    form.set_value(element(&form, "confirmPassword"), "hunter22");
    assert!(validator.validate().valid);
}

#[test]
fn required_rule_without_attribute_warns_once() {
    let form = MemoryForm::builder()
        .wrapper(|w| w.control(Control::input("text").name("nickname")).error_region())
        .build();
    let sink = CollectingSink::new();
    let mut validator = Validator::builder(&form).sink(&sink).build();
    assert!(sink.is_empty(), "audit should be silent: {:?}", sink.messages());

    validator.add_field("nickname", vec![Rule::required()]).unwrap();
    assert_eq!(sink.len(), 1);

    let result = validator.validate();
    assert_eq!(result.errors_for("nickname"), ["Field is required"]);
    assert_eq!(sink.len(), 1);
}

#[rstest]
fn validation_is_idempotent(signup: MemoryForm) {
    let mut validator = quiet(&signup);
    validator
        .add_field("username", vec![Rule::required(), Rule::min_length(3)])
        .unwrap()
        .add_field("roles", vec![Rule::min_checked(1)])
        .unwrap();
    signup.set_value(element(&signup, "username"), "Al");

    let first = validator.validate();
    let second = validator.validate();

    assert_eq!(first, second);
    assert_eq!(
        signup.rendered_errors(element(&signup, "username")),
        first.errors_for("username")
    );
}

#[rstest]
fn native_failure_precedes_rule_failures(signup: MemoryForm) {
    let mut validator = quiet(&signup);
    validator
        .add_field("username", vec![Rule::min_length(3), Rule::required()])
        .unwrap();

    let result = validator.validate();

    assert_eq!(
        result.errors_for("username"),
        [
            "Please fill out this field.",
            "Minimum length is 3 characters",
            "Field is required",
        ]
    );
}

#[rstest]
fn results_follow_registration_order(signup: MemoryForm) {
    let mut validator = quiet(&signup);
    validator
        .add_field("roles", vec![Rule::required()])
        .unwrap()
        .add_field("username", vec![Rule::required()])
        .unwrap();

    let result = validator.validate();
    assert_eq!(result.invalid_fields().collect::<Vec<_>>(), vec!["roles", "username"]);
    assert_eq!(result.first_invalid_field(), Some("roles"));
}

#[rstest]
fn schema_from_json(signup: MemoryForm) {
    let schema = FormSchema::from_json(
        r#"{
            "fields": [
                {"name": "username", "rules": [{"rule": "required"}, {"rule": "minLength", "value": 3}]},
                {"name": "email", "rules": [{"rule": "email", "message": "Invalid email"}]},
                {"name": "roles", "rules": [{"rule": "minChecked", "value": 2, "message": ""}]},
                {"name": "username", "rules": [{"rule": "luhn", "value": true}]}
            ]
        }"#,
    )
    .unwrap();
    let mut validator = quiet(&signup);
    validator.register_schema(&schema).unwrap();

    assert_eq!(validator.len(), 3);
    signup.set_value(element(&signup, "username"), "x");
    let result = validator.validate();

    assert!(result.errors_for("username").is_empty(), "unknown rule replaced the field");
    assert_eq!(result.errors_for("roles"), ["Select at least 2 options"]);
}
