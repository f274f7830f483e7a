//! The core rule trait.

use crate::error::RuleFailure;
use std::fmt::Debug;
use std::sync::Arc;

/// A validation rule applied to one raw parameter value.
///
/// `check` receives `None` when the parameter was absent from its source.
/// A failing rule reports every failed sub-rule instead of stopping at the
/// first one, so callers can pick messages per sub-rule.
///
/// ## Example
///
/// ```rust
/// use paramguard_rules::{Rule, RuleError, RuleFailure};
///
/// #[derive(Debug)]
/// struct Even;
///
/// impl Rule for Even {
///     fn name(&self) -> &str {
///         "even"
///     }
///
///     fn check(&self, value: Option<&str>) -> Result<(), RuleFailure> {
///         match value.and_then(|v| v.trim().parse::<i64>().ok()) {
///             Some(n) if n % 2 == 0 => Ok(()),
///             _ => Err(RuleError::new("even", "Value must be an even number").into()),
///         }
///     }
/// }
///
/// assert!(Even.check(Some("4")).is_ok());
/// assert!(Even.check(Some("5")).is_err());
/// ```
pub trait Rule: Debug + Send + Sync {
    /// Identifier of this rule, used as the key for its messages.
    fn name(&self) -> &str;

    /// Identifiers of the sub-rules composing this rule, in evaluation order.
    fn rule_names(&self) -> Vec<&str> {
        vec![self.name()]
    }

    /// Check a raw value.
    fn check(&self, value: Option<&str>) -> Result<(), RuleFailure>;

    fn is_valid(&self, value: Option<&str>) -> bool {
        self.check(value).is_ok()
    }
}

impl<R: Rule + ?Sized> Rule for Box<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn rule_names(&self) -> Vec<&str> {
        (**self).rule_names()
    }

    fn check(&self, value: Option<&str>) -> Result<(), RuleFailure> {
        (**self).check(value)
    }
}

impl<R: Rule + ?Sized> Rule for Arc<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn rule_names(&self) -> Vec<&str> {
        (**self).rule_names()
    }

    fn check(&self, value: Option<&str>) -> Result<(), RuleFailure> {
        (**self).check(value)
    }
}
