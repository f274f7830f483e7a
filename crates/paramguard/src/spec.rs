//! Per-field rule specifications.

use crate::error::{Error, Result};
use crate::messages::RuleMessages;
use paramguard_rules::{Rule, RuleBuildError, RuleDefinition};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// How one field is validated.
#[derive(Debug)]
pub enum RuleSpec {
    /// A ready-made rule, messages come from the shared sources only.
    Bare(Box<dyn Rule>),
    /// A rule plus per-field message overrides.
    Options(FieldOptions),
}

impl RuleSpec {
    /// The rule to execute, if the spec has one.
    pub fn rule(&self) -> Option<&dyn Rule> {
        match self {
            RuleSpec::Bare(rule) => Some(rule.as_ref()),
            RuleSpec::Options(options) => options.rule.as_deref(),
        }
    }

    /// Single message replacing every other message source.
    pub fn message(&self) -> Option<&str> {
        match self {
            RuleSpec::Bare(_) => None,
            RuleSpec::Options(options) => options.message.as_deref(),
        }
    }

    /// Field-scoped messages keyed by rule identifier.
    pub fn messages(&self) -> Option<&RuleMessages> {
        match self {
            RuleSpec::Bare(_) => None,
            RuleSpec::Options(options) => Some(&options.messages),
        }
    }
}

impl<R: Rule + 'static> From<R> for RuleSpec {
    fn from(rule: R) -> Self {
        RuleSpec::Bare(Box::new(rule))
    }
}

impl From<FieldOptions> for RuleSpec {
    fn from(options: FieldOptions) -> Self {
        RuleSpec::Options(options)
    }
}

/// A rule with per-field message overrides.
///
/// ## Example
///
/// ```rust
/// use paramguard::prelude::*;
///
/// let options = FieldOptions::new()
///     .rule(all_of().not_empty().length(3, 20))
///     .messages([("length", "Between 3 and 20 characters")]);
/// ```
#[derive(Debug, Default)]
pub struct FieldOptions {
    rule: Option<Box<dyn Rule>>,
    message: Option<String>,
    messages: RuleMessages,
}

impl FieldOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rule for the field.
    pub fn rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rule = Some(Box::new(rule));
        self
    }

    pub fn boxed_rule(mut self, rule: Box<dyn Rule>) -> Self {
        self.rule = Some(rule);
        self
    }

    /// Use exactly this message whenever the field fails.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Override messages of specific rules for this field.
    pub fn messages(mut self, messages: impl Into<RuleMessages>) -> Self {
        self.messages = messages.into();
        self
    }
}

/// Ordered list of fields and their specs.
///
/// Fields are validated in insertion order. The same field may appear more
/// than once; the later entry then overwrites the earlier one's results.
///
/// ## Example
///
/// ```rust
/// use paramguard::prelude::*;
///
/// let rules = RuleSet::new()
///     .field("age", between(18, 65))
///     .field("name", FieldOptions::new().rule(not_empty()).message("Name required"));
///
/// assert_eq!(rules.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct RuleSet {
    specs: Vec<(String, RuleSpec)>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field and its spec.
    pub fn field(mut self, name: impl Into<String>, spec: impl Into<RuleSpec>) -> Self {
        self.insert(name, spec);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, spec: impl Into<RuleSpec>) {
        self.specs.push((name.into(), spec.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleSpec)> {
        self.specs.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Build a rule set from JSON.
    ///
    /// Each field maps either to a list of [`RuleDefinition`]s or to an
    /// object with `rules`, `message` and `messages` keys. An object without
    /// `rules` is kept as a spec without a rule and rejected when validated.
    ///
    /// ```json
    /// {
    ///   "age": [{"type": "int_val"}, {"type": "between", "min": 18, "max": 65}],
    ///   "name": {"rules": [{"type": "not_empty"}], "message": "Name required"}
    /// }
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let fields: FieldDefinitions = serde_json::from_str(json)?;
        fields
            .0
            .into_iter()
            .try_fold(RuleSet::new(), |set, (name, definition)| -> Result<RuleSet> {
                let spec = definition.build(&name)?;
                Ok(set.field(name, spec))
            })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FieldDefinition {
    Rules(Vec<RuleDefinition>),
    Single(RuleDefinition),
    Options {
        #[serde(default)]
        rules: Option<Vec<RuleDefinition>>,
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        messages: RuleMessages,
    },
}

impl FieldDefinition {
    fn build(self, field: &str) -> Result<RuleSpec> {
        let build_error = |source: RuleBuildError| Error::RuleBuild {
            field: field.to_string(),
            source,
        };

        match self {
            FieldDefinition::Rules(definitions) => {
                let rule = RuleDefinition::build_all(&definitions).map_err(build_error)?;
                Ok(RuleSpec::from(rule))
            }
            FieldDefinition::Single(definition) => {
                Ok(RuleSpec::Bare(definition.build().map_err(build_error)?))
            }
            FieldDefinition::Options {
                rules,
                message,
                messages,
            } => {
                let rule = match rules {
                    Some(definitions) => Some(Box::new(
                        RuleDefinition::build_all(&definitions).map_err(build_error)?,
                    ) as Box<dyn Rule>),
                    None => None,
                };
                Ok(RuleSpec::Options(FieldOptions {
                    rule,
                    message,
                    messages,
                }))
            }
        }
    }
}

/// Field definitions in document order.
struct FieldDefinitions(Vec<(String, FieldDefinition)>);

impl<'de> Deserialize<'de> for FieldDefinitions {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FieldsVisitor;

        impl<'de> Visitor<'de> for FieldsVisitor {
            type Value = FieldDefinitions;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to rule definitions")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut fields = Vec::new();
                while let Some(entry) = map.next_entry::<String, FieldDefinition>()? {
                    fields.push(entry);
                }
                Ok(FieldDefinitions(fields))
            }
        }

        deserializer.deserialize_map(FieldsVisitor)
    }
}
