//! Failure types reported by rules.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Error from a single failed rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RuleError {
    /// Identifier of the rule that failed (e.g. "notEmpty", "length")
    pub rule: String,
    /// Default message, may contain `{param}` placeholders
    pub message: String,
    /// Parameters available to message templates
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub params: HashMap<String, serde_json::Value>,
}

impl RuleError {
    /// Create a new rule error.
    pub fn new(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            message: message.into(),
            params: HashMap::new(),
        }
    }

    /// Add a parameter to the error.
    pub fn param(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.params.insert(key.into(), v);
        }
        self
    }

    /// Fill `{param_name}` placeholders of `template` with this error's parameters.
    ///
    /// The template is scanned once, left to right, so substituted values are
    /// never expanded again. Placeholders without a matching parameter are
    /// left untouched.
    pub fn interpolate(&self, template: &str) -> String {
        let mut result = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            result.push_str(&rest[..open]);
            let tail = &rest[open..];
            let param = tail[1..]
                .find(['{', '}'])
                .filter(|&end| tail.as_bytes()[end + 1] == b'}')
                .and_then(|end| {
                    let key = &tail[1..end + 1];
                    self.params.get(key).map(|value| (end + 2, value))
                });

            match param {
                Some((consumed, value)) => {
                    result.push_str(&render_param(value));
                    rest = &tail[consumed..];
                }
                None => {
                    result.push('{');
                    rest = &tail[1..];
                }
            }
        }

        result.push_str(rest);
        result
    }

    /// The default message with parameters filled in.
    pub fn interpolate_message(&self) -> String {
        self.interpolate(&self.message)
    }
}

fn render_param(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Null => String::new(),
        _ => value.to_string(),
    }
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.rule, self.interpolate_message())
    }
}

impl std::error::Error for RuleError {}

/// Outcome of a failed [`Rule::check`](crate::Rule::check).
///
/// Holds one [`RuleError`] per failed sub-rule, in evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleFailure {
    errors: Vec<RuleError>,
}

impl RuleFailure {
    /// Create an empty failure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a failure for a single sub-rule.
    pub fn single(error: RuleError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    /// Record a failed sub-rule.
    pub fn push(&mut self, error: RuleError) {
        self.errors.push(error);
    }

    /// Append every failed sub-rule of `other`.
    pub fn merge(&mut self, other: RuleFailure) {
        self.errors.extend(other.errors);
    }

    /// Failed sub-rules in evaluation order.
    pub fn errors(&self) -> &[RuleError] {
        &self.errors
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Identifiers of the failed sub-rules, in evaluation order.
    ///
    /// A sub-rule that failed more than once is listed at its first position.
    pub fn failed_rule_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::with_capacity(self.errors.len());
        for error in &self.errors {
            if !names.contains(&error.rule.as_str()) {
                names.push(error.rule.as_str());
            }
        }
        names
    }

    /// The last recorded error for `rule`.
    pub fn find(&self, rule: &str) -> Option<&RuleError> {
        self.errors.iter().rev().find(|e| e.rule == rule)
    }

    /// Interpolated default message for each failed sub-rule, keyed by
    /// identifier and ordered like [`failed_rule_names`](Self::failed_rule_names).
    pub fn default_messages(&self) -> Vec<(&str, String)> {
        self.failed_rule_names()
            .into_iter()
            .filter_map(|name| {
                self.find(name)
                    .map(|error| (name, error.interpolate_message()))
            })
            .collect()
    }

    /// Convert to Result - Ok if nothing failed, Err otherwise.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<RuleError> for RuleFailure {
    fn from(error: RuleError) -> Self {
        Self::single(error)
    }
}

impl fmt::Display for RuleFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rule(s) failed: {}",
            self.errors.len(),
            self.failed_rule_names().join(", ")
        )
    }
}

impl std::error::Error for RuleFailure {}

/// Error raised while building a rule from its definition.
#[derive(Debug, thiserror::Error)]
pub enum RuleBuildError {
    /// The pattern of a `regex` rule does not compile.
    #[error("invalid regex pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A lower bound is greater than its upper bound.
    #[error("invalid bounds for `{rule}`: min {min} is greater than max {max}")]
    InvalidBounds {
        rule: &'static str,
        min: String,
        max: String,
    },
}
