//! Rules built from other rules.

use crate::error::{RuleBuildError, RuleError, RuleFailure};
use crate::rule::Rule;
use crate::rules::{
    AlnumRule, BetweenRule, EmailRule, InRule, IntValRule, LengthRule, NoWhitespaceRule,
    NotEmptyRule, NumericRule, RegexRule, UrlRule,
};
use std::fmt;

/// Runs every child rule and collects all of their failures.
///
/// Sub-rule identifiers of nested composites are flattened, so
/// `all_of().not_empty().rule(all_of().length(3, 20))` reports
/// `["notEmpty", "length"]`.
///
/// ## Example
///
/// ```rust
/// use paramguard_rules::{all_of, Rule};
///
/// let username = all_of().not_empty().length(3, 20).alnum();
///
/// let failure = username.check(Some("a!")).unwrap_err();
/// assert_eq!(failure.failed_rule_names(), vec!["length", "alnum"]);
/// ```
#[derive(Debug, Default)]
pub struct AllOfRule {
    rules: Vec<Box<dyn Rule>>,
}

impl AllOfRule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append any rule.
    pub fn rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Append an already boxed rule.
    pub fn boxed(mut self, rule: Box<dyn Rule>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn not_empty(self) -> Self {
        self.rule(NotEmptyRule)
    }

    pub fn length(self, min: usize, max: usize) -> Self {
        self.rule(LengthRule::new(min, max))
    }

    pub fn min_length(self, min: usize) -> Self {
        self.rule(LengthRule::min(min))
    }

    pub fn max_length(self, max: usize) -> Self {
        self.rule(LengthRule::max(max))
    }

    pub fn between(self, min: impl Into<f64>, max: impl Into<f64>) -> Self {
        self.rule(BetweenRule::new(min, max))
    }

    pub fn int_val(self) -> Self {
        self.rule(IntValRule)
    }

    pub fn numeric(self) -> Self {
        self.rule(NumericRule)
    }

    pub fn email(self) -> Self {
        self.rule(EmailRule)
    }

    pub fn url(self) -> Self {
        self.rule(UrlRule)
    }

    pub fn alnum(self) -> Self {
        self.rule(AlnumRule)
    }

    pub fn no_whitespace(self) -> Self {
        self.rule(NoWhitespaceRule)
    }

    pub fn one_of<I, S>(self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rule(InRule::new(choices))
    }

    /// Append a [`RegexRule`]; fails if `pattern` does not compile.
    pub fn matches(self, pattern: impl Into<String>) -> Result<Self, RuleBuildError> {
        Ok(self.rule(RegexRule::new(pattern)?))
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }
}

impl Rule for AllOfRule {
    fn name(&self) -> &str {
        "allOf"
    }

    fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().flat_map(|r| r.rule_names()).collect()
    }

    fn check(&self, value: Option<&str>) -> Result<(), RuleFailure> {
        let mut failure = RuleFailure::new();
        for rule in &self.rules {
            if let Err(child) = rule.check(value) {
                failure.merge(child);
            }
        }
        failure.into_result()
    }
}

/// Lets absent or empty values through, checks everything else with the
/// wrapped rule.
#[derive(Debug)]
pub struct OptionalRule<R> {
    inner: R,
}

impl<R: Rule> OptionalRule<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: Rule> Rule for OptionalRule<R> {
    fn name(&self) -> &str {
        "optional"
    }

    fn rule_names(&self) -> Vec<&str> {
        self.inner.rule_names()
    }

    fn check(&self, value: Option<&str>) -> Result<(), RuleFailure> {
        match value {
            None | Some("") => Ok(()),
            Some(_) => self.inner.check(value),
        }
    }
}

type Predicate = dyn Fn(&str) -> bool + Send + Sync;

/// A named rule backed by a closure.
///
/// Absent values fail without calling the closure.
pub struct CallbackRule {
    name: String,
    message: String,
    predicate: Box<Predicate>,
}

impl CallbackRule {
    pub fn new<F>(name: impl Into<String>, message: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            message: message.into(),
            predicate: Box::new(predicate),
        }
    }
}

impl fmt::Debug for CallbackRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackRule")
            .field("name", &self.name)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

impl Rule for CallbackRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self, value: Option<&str>) -> Result<(), RuleFailure> {
        match value {
            Some(v) if (self.predicate)(v) => Ok(()),
            _ => Err(RuleError::new(self.name.clone(), self.message.clone()).into()),
        }
    }
}
