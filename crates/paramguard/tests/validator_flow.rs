//! End-to-end validation flows.

use paramguard::prelude::*;
use paramguard::Errors;
use serde_json::json;
use std::collections::HashMap;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn registration_rules() -> RuleSet {
    RuleSet::new()
        .field("username", all_of().not_empty().length(3, 12).alnum())
        .field(
            "email",
            FieldOptions::new()
                .rule(all_of().not_empty().email())
                .messages([("email", "{field} is not an email address")]),
        )
        .field(
            "age",
            FieldOptions::new()
                .rule(all_of().int_val().between(18, 65))
                .message("You must be an adult under 66"),
        )
        .field("website", optional(url()))
}

#[test]
fn registration_with_valid_input() {
    init_tracing();
    let body = json!({
        "username": "ada",
        "email": "ada@example.com",
        "age": 36,
    });

    let mut validator = Validator::new();
    validator.validate(&body, &registration_rules()).unwrap();

    assert!(validator.is_valid());
    assert_eq!(validator.value("age"), "36");
    assert_eq!(validator.value("website"), "");
    assert_eq!(validator.data().len(), 4);
    assert!(validator.report().is_empty());
}

#[test]
fn registration_with_invalid_input() {
    init_tracing();
    let body = json!({
        "username": "a!",
        "email": "not-mail",
        "age": "17",
        "website": "nope",
    });

    let mut validator = Validator::new();
    validator.validate(&body, &registration_rules()).unwrap();

    assert!(!validator.is_valid());
    assert_eq!(validator.errors().len(), 4);

    assert_eq!(
        validator.param_errors("username"),
        vec![
            "Value must have a length between 3 and 12",
            "Value must contain only letters (a-z) and digits (0-9)"
        ]
    );
    assert_eq!(
        validator.param_rule_error("email", "email"),
        "{field} is not an email address"
    );
    assert_eq!(
        validator.field_errors("age"),
        Some(&FieldErrors::List(vec![
            "You must be an adult under 66".to_string()
        ]))
    );
    assert_eq!(validator.first_error("website"), "Value must be a valid URL");

    // values are kept for failed fields too
    assert_eq!(validator.value("username"), "a!");
    assert_eq!(validator.value("age"), "17");
}

#[test]
fn list_mode_drops_rule_names() {
    let config = ValidatorConfig::new().store_errors_with_rules(false);
    let mut keyed = Validator::new();
    let mut listed = Validator::with_config(config);
    let rules = RuleSet::new().field("code", all_of().not_empty().length(4, 4).int_val());
    let params: HashMap<&str, &str> = [("code", "")].into_iter().collect();

    keyed.validate(&params, &rules).unwrap();
    listed.validate(&params, &rules).unwrap();

    let keyed_errors = keyed.field_errors("code").unwrap();
    let listed_errors = listed.field_errors("code").unwrap();
    assert!(matches!(keyed_errors, FieldErrors::Rules(_)));
    assert!(matches!(listed_errors, FieldErrors::List(_)));
    assert_eq!(keyed_errors.messages(), listed_errors.messages());
    assert_eq!(listed.param_rule_error("code", "notEmpty"), "");
}

#[test]
fn errors_accumulate_across_calls_until_cleared() {
    let mut validator = Validator::new();
    let first_phase = RuleSet::new().field("token", not_empty());
    let second_phase = RuleSet::new().field("page", int_val());

    let params: HashMap<&str, &str> = [("page", "2")].into_iter().collect();

    validator.validate(&params, &first_phase).unwrap();
    assert!(!validator.is_valid());

    // the second phase passes, yet the first phase's failure still counts
    validator.validate(&params, &second_phase).unwrap();
    assert!(!validator.is_valid());
    assert_eq!(validator.value("page"), "2");

    validator.clear_errors();
    validator.validate(&params, &second_phase).unwrap();
    assert!(validator.is_valid());
    assert!(validator.data().contains_key("token"));
}

#[test]
fn later_call_overwrites_same_field_errors() {
    let mut validator = Validator::new();
    let strict = RuleSet::new().field("name", length(5, 10));
    let loose = RuleSet::new().field("name", not_empty());

    let short: HashMap<&str, &str> = [("name", "abc")].into_iter().collect();
    let empty: HashMap<&str, &str> = [("name", "")].into_iter().collect();

    validator.validate(&short, &strict).unwrap();
    assert_eq!(validator.param_errors("name").len(), 1);
    assert!(validator.param_rule_error("name", "length").starts_with("Value must have"));

    validator.validate(&empty, &loose).unwrap();
    assert_eq!(validator.param_rule_error("name", "length"), "");
    assert_eq!(validator.first_error("name"), "Value must not be empty");
    assert_eq!(validator.value("name"), "");

    // passing later does not remove the earlier entry
    validator.validate(&short, &loose).unwrap();
    assert_eq!(validator.first_error("name"), "Value must not be empty");
    assert_eq!(validator.value("name"), "abc");
}

#[test]
fn duplicate_field_in_one_call_last_wins() {
    let rules = RuleSet::new()
        .field("q", FieldOptions::new().rule(not_empty()).message("first"))
        .field("q", FieldOptions::new().rule(not_empty()).message("second"));
    let mut validator = Validator::new();
    validator.validate(&HashMap::<String, String>::new(), &rules).unwrap();

    assert_eq!(validator.param_errors("q"), vec!["second"]);
}

#[test]
fn all_messages_elided_still_invalid() {
    let config = ValidatorConfig::new().default_message("notEmpty", "");
    let mut validator = Validator::with_config(config);
    let rules = RuleSet::new().field("name", not_empty());
    validator
        .validate(&HashMap::<String, String>::new(), &rules)
        .unwrap();

    assert!(!validator.is_valid());
    assert!(validator.param_errors("name").is_empty());
    assert_eq!(validator.first_error("name"), "");
}

#[test]
fn set_errors_overwrites_state() {
    let mut validator = Validator::new();
    validator.add_error("a", "bad");

    let mut errors = Errors::new();
    errors.insert("b".to_string(), FieldErrors::from(vec!["worse".to_string()]));
    validator.set_errors(errors);
    assert!(validator.field_errors("a").is_none());
    assert_eq!(validator.first_error("b"), "worse");

    validator.set_errors(Errors::new());
    assert!(validator.is_valid());
}

#[test]
fn rules_and_config_from_json() {
    init_tracing();
    let rules = RuleSet::from_json(
        r#"{
            "name": {"rules": [{"type": "not_empty"}], "message": "Name required"},
            "age": {
                "rules": [{"type": "int_val"}, {"type": "between", "min": 18, "max": 65}],
                "messages": {"between": "Age must be between {min} and {max}"}
            },
            "color": [{"type": "in", "choices": ["red", "green"]}]
        }"#,
    )
    .unwrap();
    let config = ValidatorConfig::from_json(
        r#"{"default_messages": {"in": "Pick one of: {choices}"}}"#,
    )
    .unwrap();

    let query = QueryParams::parse("name=&age=70&color=blue").unwrap();
    let mut validator = Validator::with_config(config);
    validator.validate(&query, &rules).unwrap();

    assert_eq!(validator.param_errors("name"), vec!["Name required"]);
    assert_eq!(
        validator.param_rule_error("age", "between"),
        "Age must be between 18 and 65"
    );
    assert_eq!(validator.first_error("color"), "Pick one of: red, green");

    let report = serde_json::to_value(validator.report()).unwrap();
    assert_eq!(report["error"]["type"], "validation_error");
    assert_eq!(report["error"]["fields"]["name"][0], "Name required");
    assert_eq!(
        report["error"]["fields"]["age"]["between"],
        "Age must be between 18 and 65"
    );
}

#[test]
fn spec_without_rule_from_json_fails_validation() {
    let rules = RuleSet::from_json(r#"{"nick": {"message": "Nick required"}}"#).unwrap();
    let mut validator = Validator::new();
    let err = validator
        .validate(&QueryParams::default(), &rules)
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "invalid configuration for `nick`: validation rules are missing"
    );
}

#[cfg(feature = "http")]
#[test]
fn validates_request_query() {
    let req = http::Request::builder()
        .uri("/search?q=rust&limit=500")
        .body(())
        .unwrap();
    let query = QueryParams::from_request(&req).unwrap();

    let rules = RuleSet::new()
        .field("q", all_of().not_empty().max_length(64))
        .field("limit", all_of().int_val().between(1, 100));

    let mut validator = Validator::new();
    validator.validate(&query, &rules).unwrap();

    assert!(validator.field_errors("q").is_none());
    assert_eq!(
        validator.param_rule_error("limit", "between"),
        "Value must be between 1 and 100"
    );
}
