//! Message resolution for failed fields.
//!
//! Sources, from lowest to highest precedence:
//!
//! 1. the rule engine's default message of each failed sub-rule
//! 2. the validator's `default_messages`
//! 3. the `messages` passed to one `validate` call
//! 4. the field's own `messages`
//!
//! A field-level `message` short-circuits all of them. Overlay messages may
//! use the `{param}` placeholders of the sub-rule they replace.

use crate::messages::{FieldErrors, RuleMessages};
use paramguard_rules::RuleFailure;

/// Per-field overrides taken from a [`RuleSpec`](crate::RuleSpec).
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldOverrides<'a> {
    /// Replaces every other source when set.
    pub message: Option<&'a str>,
    /// Highest precedence per-rule messages.
    pub messages: Option<&'a RuleMessages>,
}

/// Resolves the error collection stored for a failed field.
#[derive(Debug, Clone, Copy)]
pub struct MessageResolver<'a> {
    default_messages: &'a RuleMessages,
    store_errors_with_rules: bool,
}

impl<'a> MessageResolver<'a> {
    pub fn new(default_messages: &'a RuleMessages, store_errors_with_rules: bool) -> Self {
        Self {
            default_messages,
            store_errors_with_rules,
        }
    }

    /// Resolve the messages of `failure`.
    ///
    /// Only keys naming a failed sub-rule are taken from the overlays. Entries
    /// left with a blank message (`""` or `"0"`) are dropped, so the result
    /// may be empty.
    pub fn resolve(
        &self,
        failure: &RuleFailure,
        global_messages: &RuleMessages,
        overrides: FieldOverrides<'_>,
    ) -> FieldErrors {
        if let Some(message) = overrides.message {
            return FieldErrors::List(vec![message.to_string()]);
        }

        let failed = failure.failed_rule_names();
        let mut resolved: RuleMessages = failure.default_messages().into_iter().collect();

        let tiers = [Some(self.default_messages), Some(global_messages), overrides.messages];
        for tier in tiers.into_iter().flatten() {
            for rule in &failed {
                if let Some(template) = tier.get(rule) {
                    let message = match failure.find(rule) {
                        Some(error) => error.interpolate(template),
                        None => template.to_string(),
                    };
                    resolved.insert(*rule, message);
                }
            }
        }

        resolved.retain(|_, message| !is_blank(message));

        if self.store_errors_with_rules {
            FieldErrors::Rules(resolved)
        } else {
            FieldErrors::List(resolved.into_values())
        }
    }
}

fn is_blank(message: &str) -> bool {
    message.is_empty() || message == "0"
}
