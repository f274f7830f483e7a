//! The validator and its accumulated state.

use crate::config::ValidatorConfig;
use crate::error::{Error, Result};
use crate::messages::{FieldErrors, RuleMessages};
use crate::report::ErrorReport;
use crate::resolver::{FieldOverrides, MessageResolver};
use crate::source::ParamSource;
use crate::spec::RuleSet;
use std::collections::HashMap;

/// Raw values by field. `None` marks a field requested but absent from its source.
pub type Values = HashMap<String, Option<String>>;

/// Error collections by field. A field has an entry only if it failed.
pub type Errors = HashMap<String, FieldErrors>;

/// Validates named parameters and accumulates values and errors.
///
/// State is never reset implicitly: each `validate` call adds to what
/// earlier calls recorded, and [`is_valid`](Self::is_valid) reflects all
/// of them. Call [`clear_errors`](Self::clear_errors) between phases that
/// need their own verdict.
///
/// ## Example
///
/// ```rust
/// use paramguard::prelude::*;
/// use std::collections::HashMap;
///
/// let params: HashMap<&str, &str> = [("age", "10"), ("name", "")].into_iter().collect();
///
/// let rules = RuleSet::new()
///     .field("age", all_of().int_val().between(18, 65))
///     .field("name", FieldOptions::new().rule(not_empty()).message("Name required"));
///
/// let mut validator = Validator::new();
/// validator.validate(&params, &rules)?;
///
/// assert!(!validator.is_valid());
/// assert_eq!(validator.value("age"), "10");
/// assert_eq!(validator.first_error("age"), "Value must be between 18 and 65");
/// assert_eq!(validator.param_errors("name"), vec!["Name required"]);
/// # Ok::<(), paramguard::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    errors: Errors,
    values: Values,
    default_messages: RuleMessages,
    store_errors_with_rules: bool,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Create a validator with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ValidatorConfig::default())
    }

    pub fn with_config(config: ValidatorConfig) -> Self {
        Self {
            errors: Errors::new(),
            values: Values::new(),
            default_messages: config.default_messages,
            store_errors_with_rules: config.store_errors_with_rules,
        }
    }

    pub fn stores_errors_with_rules(&self) -> bool {
        self.store_errors_with_rules
    }

    pub fn default_messages(&self) -> &RuleMessages {
        &self.default_messages
    }

    /// Validate the fields of `rules` against `source`.
    ///
    /// Shorthand for [`validate_with`](Self::validate_with) without
    /// call-scoped messages.
    pub fn validate<S>(&mut self, source: &S, rules: &RuleSet) -> Result<&mut Self>
    where
        S: ParamSource + ?Sized,
    {
        self.validate_with(source, rules, &RuleMessages::new())
    }

    /// Validate the fields of `rules` against `source`, with `messages`
    /// overriding the validator defaults for this call only.
    ///
    /// Every requested field gets its raw value recorded, pass or fail.
    /// Failing fields get their error collection (over)written, passing
    /// fields are left untouched. Only a spec without a rule is an error;
    /// fields processed before it keep their recorded state.
    pub fn validate_with<S>(
        &mut self,
        source: &S,
        rules: &RuleSet,
        messages: &RuleMessages,
    ) -> Result<&mut Self>
    where
        S: ParamSource + ?Sized,
    {
        let resolver = MessageResolver::new(&self.default_messages, self.store_errors_with_rules);

        for (field, spec) in rules.iter() {
            let value = source.param(field);
            tracing::trace!(field, present = value.is_some(), "Validating parameter");
            self.values.insert(field.to_string(), value.clone());

            let rule = spec.rule().ok_or_else(|| {
                tracing::warn!(field, "Validation rules are missing");
                Error::invalid_configuration(field, "validation rules are missing")
            })?;

            if let Err(failure) = rule.check(value.as_deref()) {
                tracing::debug!(
                    field,
                    rules = ?failure.failed_rule_names(),
                    "Parameter failed validation"
                );
                let overrides = FieldOverrides {
                    message: spec.message(),
                    messages: spec.messages(),
                };
                let errors = resolver.resolve(&failure, messages, overrides);
                self.errors.insert(field.to_string(), errors);
            }
        }

        Ok(self)
    }

    /// Add an error for a field, for checks made outside the rules.
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) -> &mut Self {
        self.errors.entry(field.into()).or_default().push(message);
        self
    }

    /// Add several errors for a field.
    pub fn add_errors<I, M>(&mut self, field: impl Into<String>, messages: I) -> &mut Self
    where
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        let errors = self.errors.entry(field.into()).or_default();
        for message in messages {
            errors.push(message);
        }
        self
    }

    pub fn errors(&self) -> &Errors {
        &self.errors
    }

    /// Replace all errors.
    pub fn set_errors(&mut self, errors: Errors) -> &mut Self {
        self.errors = errors;
        self
    }

    /// Drop all errors, keeping recorded values.
    pub fn clear_errors(&mut self) -> &mut Self {
        self.errors.clear();
        self
    }

    /// Drop all errors and values.
    pub fn reset(&mut self) -> &mut Self {
        self.errors.clear();
        self.values.clear();
        self
    }

    /// Messages of a field in order, empty if the field has no errors.
    pub fn param_errors(&self, field: &str) -> Vec<&str> {
        self.errors
            .get(field)
            .map(FieldErrors::messages)
            .unwrap_or_default()
    }

    /// The structured error collection of a field.
    pub fn field_errors(&self, field: &str) -> Option<&FieldErrors> {
        self.errors.get(field)
    }

    /// Message of one rule for a field, empty if absent.
    ///
    /// Only errors stored with their rule identifiers can match.
    pub fn param_rule_error(&self, field: &str, rule: &str) -> &str {
        self.errors
            .get(field)
            .and_then(|errors| errors.get(rule))
            .unwrap_or("")
    }

    /// Replace the error collection of one field.
    pub fn set_param_errors(&mut self, field: impl Into<String>, errors: impl Into<FieldErrors>) -> &mut Self {
        self.errors.insert(field.into(), errors.into());
        self
    }

    /// First message of a field, empty if none.
    pub fn first_error(&self, field: &str) -> &str {
        self.errors
            .get(field)
            .and_then(FieldErrors::first)
            .unwrap_or("")
    }

    /// Last recorded value of a field, empty if never recorded or absent.
    pub fn value(&self, field: &str) -> &str {
        self.values
            .get(field)
            .and_then(Option::as_deref)
            .unwrap_or("")
    }

    /// Merge values into the recorded ones.
    pub fn set_values<I, K>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, Option<String>)>,
        K: Into<String>,
    {
        self.values
            .extend(values.into_iter().map(|(field, value)| (field.into(), value)));
        self
    }

    /// Replace all recorded values.
    pub fn set_data(&mut self, values: Values) -> &mut Self {
        self.values = values;
        self
    }

    pub fn data(&self) -> &Values {
        &self.values
    }

    /// True when no field has an error entry, even an empty one.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Snapshot of the current errors in the response envelope.
    pub fn report(&self) -> ErrorReport {
        ErrorReport::new(&self.errors)
    }
}
