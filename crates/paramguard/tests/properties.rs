//! Property-based tests for message resolution and value recording.

use paramguard::prelude::*;
use proptest::prelude::*;
use std::collections::HashMap;

fn message_strategy() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[a-zA-Z ]{0,12}")
}

fn tier(rule: &str, message: &Option<String>) -> RuleMessages {
    message
        .iter()
        .map(|message| (rule.to_string(), message.clone()))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The highest tier that names the rule decides its message.
    #[test]
    fn prop_highest_tier_wins(
        default in message_strategy(),
        global in message_strategy(),
        field in message_strategy(),
    ) {
        let config = ValidatorConfig::new().default_messages(tier("notEmpty", &default));
        let rules = RuleSet::new().field(
            "name",
            FieldOptions::new()
                .rule(not_empty())
                .messages(tier("notEmpty", &field)),
        );

        let mut validator = Validator::with_config(config);
        validator
            .validate_with(&HashMap::<String, String>::new(), &rules, &tier("notEmpty", &global))
            .unwrap();

        let expected = field
            .or(global)
            .or(default)
            .unwrap_or_else(|| "Value must not be empty".to_string());

        prop_assert!(!validator.is_valid());
        if expected.is_empty() {
            prop_assert!(validator.param_errors("name").is_empty());
        } else {
            prop_assert_eq!(validator.param_rule_error("name", "notEmpty"), expected.as_str());
        }
    }

    /// A single field message always yields exactly that message.
    #[test]
    fn prop_single_message_is_the_only_entry(
        message in "[a-z]{1,20}",
        value in prop::option::of("[a-z0-9!]{0,6}"),
        store_with_rules in any::<bool>(),
    ) {
        let config = ValidatorConfig::new().store_errors_with_rules(store_with_rules);
        let rules = RuleSet::new().field(
            "code",
            FieldOptions::new()
                .rule(all_of().not_empty().length(4, 4).int_val())
                .message(message.clone()),
        );
        let params: HashMap<String, String> = value
            .iter()
            .map(|value| ("code".to_string(), value.clone()))
            .collect();

        let mut validator = Validator::with_config(config);
        validator.validate(&params, &rules).unwrap();

        if let Some(errors) = validator.field_errors("code") {
            prop_assert_eq!(errors, &FieldErrors::List(vec![message]));
        } else {
            prop_assert!(validator.is_valid());
        }
    }

    /// Every requested field has its value recorded, pass or fail.
    #[test]
    fn prop_values_always_recorded(
        params in prop::collection::hash_map("[a-c]", "[a-z0-9 ]{0,8}", 0..3),
    ) {
        let rules = ["a", "b", "c"]
            .into_iter()
            .fold(RuleSet::new(), |rules, field| {
                rules.field(field, all_of().not_empty().alnum())
            });

        let mut validator = Validator::new();
        validator.validate(&params, &rules).unwrap();

        prop_assert_eq!(validator.data().len(), 3);
        for field in ["a", "b", "c"] {
            let expected = params.get(field).map(String::as_str).unwrap_or("");
            prop_assert_eq!(validator.value(field), expected);
        }
    }

    /// List mode stores the keyed messages without their rule names.
    #[test]
    fn prop_list_mode_matches_keyed_messages(value in prop::option::of("[a-z0-9 @.]{0,16}")) {
        let rules = RuleSet::new().field(
            "contact",
            all_of().not_empty().length(6, 12).email().no_whitespace(),
        );
        let params: HashMap<String, String> = value
            .iter()
            .map(|value| ("contact".to_string(), value.clone()))
            .collect();

        let mut keyed = Validator::new();
        let mut listed = Validator::with_config(ValidatorConfig::new().store_errors_with_rules(false));
        keyed.validate(&params, &rules).unwrap();
        listed.validate(&params, &rules).unwrap();

        prop_assert_eq!(keyed.is_valid(), listed.is_valid());
        prop_assert_eq!(keyed.param_errors("contact"), listed.param_errors("contact"));
    }

    /// A field has an errors entry iff its rule failed.
    #[test]
    fn prop_error_entry_iff_rule_failed(value in prop::option::of("-?[0-9]{0,4}")) {
        let rule = all_of().int_val().between(-100, 100);
        let failed = rule.check(value.as_deref()).is_err();

        let params: HashMap<String, String> = value
            .iter()
            .map(|value| ("n".to_string(), value.clone()))
            .collect();
        let mut validator = Validator::new();
        validator.validate(&params, &RuleSet::new().field("n", rule)).unwrap();

        prop_assert_eq!(validator.field_errors("n").is_some(), failed);
        prop_assert_eq!(validator.is_valid(), !failed);
    }
}
