//! Validator configuration.

use crate::error::Result;
use crate::messages::RuleMessages;
use serde::{Deserialize, Serialize};

/// Settings fixed for the lifetime of a [`Validator`](crate::Validator).
///
/// ```json
/// {
///   "store_errors_with_rules": false,
///   "default_messages": {"notEmpty": "This field is required"}
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Keep the rule identifier next to each error message.
    pub store_errors_with_rules: bool,
    /// Messages applied to every validated field, keyed by rule identifier.
    pub default_messages: RuleMessages,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            store_errors_with_rules: true,
            default_messages: RuleMessages::new(),
        }
    }
}

impl ValidatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON, missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn store_errors_with_rules(mut self, enabled: bool) -> Self {
        self.store_errors_with_rules = enabled;
        self
    }

    pub fn default_messages(mut self, messages: impl Into<RuleMessages>) -> Self {
        self.default_messages = messages.into();
        self
    }

    /// Set the default message of one rule.
    pub fn default_message(mut self, rule: impl Into<String>, message: impl Into<String>) -> Self {
        self.default_messages.insert(rule, message);
        self
    }
}
