//! Rules over the numeric reading of a value.

use crate::error::{RuleError, RuleFailure};
use crate::rule::Rule;
use serde::{Deserialize, Serialize};

fn parse_number(value: Option<&str>) -> Option<f64> {
    value
        .map(str::trim)
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

/// Whole bounds are rendered without a fractional part in messages.
fn number_param(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        serde_json::Value::from(n as i64)
    } else {
        serde_json::Value::from(n)
    }
}

/// Numeric range validation rule, both bounds inclusive.
///
/// Values that do not parse as a number fail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BetweenRule {
    pub min: f64,
    pub max: f64,
}

impl BetweenRule {
    pub fn new(min: impl Into<f64>, max: impl Into<f64>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }
}

impl Rule for BetweenRule {
    fn name(&self) -> &str {
        "between"
    }

    fn check(&self, value: Option<&str>) -> Result<(), RuleFailure> {
        match parse_number(value) {
            Some(n) if n >= self.min && n <= self.max => Ok(()),
            _ => Err(RuleError::new("between", "Value must be between {min} and {max}")
                .param("min", number_param(self.min))
                .param("max", number_param(self.max))
                .into()),
        }
    }
}

/// Accepts values that parse as a signed integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntValRule;

impl IntValRule {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for IntValRule {
    fn name(&self) -> &str {
        "intVal"
    }

    fn check(&self, value: Option<&str>) -> Result<(), RuleFailure> {
        match value.map(str::trim) {
            Some(v) if v.parse::<i64>().is_ok() => Ok(()),
            _ => Err(RuleError::new("intVal", "Value must be an integer number").into()),
        }
    }
}

/// Accepts any finite number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericRule;

impl NumericRule {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for NumericRule {
    fn name(&self) -> &str {
        "numeric"
    }

    fn check(&self, value: Option<&str>) -> Result<(), RuleFailure> {
        match parse_number(value) {
            Some(_) => Ok(()),
            None => Err(RuleError::new("numeric", "Value must be numeric").into()),
        }
    }
}
