//! Rules over the textual form of a value.

use crate::error::{RuleBuildError, RuleError, RuleFailure};
use crate::rule::Rule;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static URL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| {
        // RFC 5322 simplified email regex
        Regex::new(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
        ).unwrap()
    })
}

fn url_regex() -> &'static Regex {
    URL_REGEX.get_or_init(|| Regex::new(r"^(https?|ftp)://[^\s/$.?#].[^\s]*$").unwrap())
}

/// Fails on absent, empty or whitespace-only values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotEmptyRule;

impl NotEmptyRule {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for NotEmptyRule {
    fn name(&self) -> &str {
        "notEmpty"
    }

    fn check(&self, value: Option<&str>) -> Result<(), RuleFailure> {
        match value {
            Some(v) if !v.trim().is_empty() => Ok(()),
            _ => Err(RuleError::new("notEmpty", "Value must not be empty").into()),
        }
    }
}

/// String length validation rule.
///
/// Length is counted in characters, both bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthRule {
    /// Minimum length (inclusive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<usize>,
    /// Maximum length (inclusive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<usize>,
}

impl LengthRule {
    /// Create a length rule with min and max bounds.
    pub fn new(min: usize, max: usize) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Create a length rule with only a minimum.
    pub fn min(min: usize) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// Create a length rule with only a maximum.
    pub fn max(max: usize) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    fn message(&self) -> &'static str {
        match (self.min, self.max) {
            (Some(_), Some(_)) => "Value must have a length between {min} and {max}",
            (Some(_), None) => "Value must have a length greater than or equal to {min}",
            (None, Some(_)) => "Value must have a length lower than or equal to {max}",
            (None, None) => "Value must have a length",
        }
    }
}

impl Rule for LengthRule {
    fn name(&self) -> &str {
        "length"
    }

    fn check(&self, value: Option<&str>) -> Result<(), RuleFailure> {
        let len = value.map(|v| v.chars().count());
        let within = match len {
            Some(len) => {
                self.min.map_or(true, |min| len >= min) && self.max.map_or(true, |max| len <= max)
            }
            None => false,
        };

        if within {
            return Ok(());
        }

        Err(RuleError::new("length", self.message())
            .param("min", self.min)
            .param("max", self.max)
            .param("length", len)
            .into())
    }
}

/// Email format validation rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRule;

impl EmailRule {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for EmailRule {
    fn name(&self) -> &str {
        "email"
    }

    fn check(&self, value: Option<&str>) -> Result<(), RuleFailure> {
        match value {
            Some(v) if email_regex().is_match(v) => Ok(()),
            _ => Err(RuleError::new("email", "Value must be a valid email").into()),
        }
    }
}

/// URL format validation rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRule;

impl UrlRule {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for UrlRule {
    fn name(&self) -> &str {
        "url"
    }

    fn check(&self, value: Option<&str>) -> Result<(), RuleFailure> {
        match value {
            Some(v) if url_regex().is_match(v) => Ok(()),
            _ => Err(RuleError::new("url", "Value must be a valid URL").into()),
        }
    }
}

/// Regex pattern validation rule.
///
/// The pattern is compiled once, when the rule is built.
#[derive(Debug, Clone)]
pub struct RegexRule {
    pattern: String,
    compiled: Regex,
}

impl RegexRule {
    /// Compile `pattern` into a rule.
    pub fn new(pattern: impl Into<String>) -> Result<Self, RuleBuildError> {
        let pattern = pattern.into();
        let compiled = Regex::new(&pattern).map_err(|source| RuleBuildError::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;
        Ok(Self { pattern, compiled })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl PartialEq for RegexRule {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Rule for RegexRule {
    fn name(&self) -> &str {
        "regex"
    }

    fn check(&self, value: Option<&str>) -> Result<(), RuleFailure> {
        match value {
            Some(v) if self.compiled.is_match(v) => Ok(()),
            _ => Err(RuleError::new("regex", "Value must validate against {pattern}")
                .param("pattern", &self.pattern)
                .into()),
        }
    }
}

/// Accepts only one of a fixed set of values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InRule {
    pub choices: Vec<String>,
}

impl InRule {
    pub fn new<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }
}

impl Rule for InRule {
    fn name(&self) -> &str {
        "in"
    }

    fn check(&self, value: Option<&str>) -> Result<(), RuleFailure> {
        match value {
            Some(v) if self.choices.iter().any(|c| c == v) => Ok(()),
            _ => Err(RuleError::new("in", "Value must be in {choices}")
                .param("choices", self.choices.join(", "))
                .into()),
        }
    }
}

/// Accepts non-empty values made of ASCII letters and digits only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlnumRule;

impl AlnumRule {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for AlnumRule {
    fn name(&self) -> &str {
        "alnum"
    }

    fn check(&self, value: Option<&str>) -> Result<(), RuleFailure> {
        match value {
            Some(v) if !v.is_empty() && v.chars().all(|c| c.is_ascii_alphanumeric()) => Ok(()),
            _ => Err(RuleError::new(
                "alnum",
                "Value must contain only letters (a-z) and digits (0-9)",
            )
            .into()),
        }
    }
}

/// Rejects values containing any whitespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoWhitespaceRule;

impl NoWhitespaceRule {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for NoWhitespaceRule {
    fn name(&self) -> &str {
        "noWhitespace"
    }

    fn check(&self, value: Option<&str>) -> Result<(), RuleFailure> {
        match value {
            Some(v) if !v.chars().any(char::is_whitespace) => Ok(()),
            _ => Err(RuleError::new("noWhitespace", "Value must not contain whitespace").into()),
        }
    }
}
