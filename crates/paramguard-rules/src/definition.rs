//! Serializable descriptions of the built-in rules.

use crate::error::RuleBuildError;
use crate::rule::Rule;
use crate::rules::{
    AllOfRule, AlnumRule, BetweenRule, EmailRule, InRule, IntValRule, LengthRule,
    NoWhitespaceRule, NotEmptyRule, NumericRule, OptionalRule, RegexRule, UrlRule,
};
use serde::{Deserialize, Serialize};

/// A built-in rule as data.
///
/// Lets rule sets live in configuration files:
///
/// ```json
/// [{"type": "not_empty"}, {"type": "length", "min": 3, "max": 20}]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleDefinition {
    NotEmpty,
    Length {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<usize>,
    },
    Between {
        min: f64,
        max: f64,
    },
    IntVal,
    Numeric,
    Email,
    Url,
    Regex {
        pattern: String,
    },
    In {
        choices: Vec<String>,
    },
    Alnum,
    NoWhitespace,
    Optional {
        rule: Box<RuleDefinition>,
    },
    AllOf {
        rules: Vec<RuleDefinition>,
    },
}

impl RuleDefinition {
    /// Build the rule this definition describes.
    pub fn build(&self) -> Result<Box<dyn Rule>, RuleBuildError> {
        let rule: Box<dyn Rule> = match self {
            RuleDefinition::NotEmpty => Box::new(NotEmptyRule),
            RuleDefinition::Length { min, max } => {
                if let (Some(min), Some(max)) = (min, max) {
                    if min > max {
                        return Err(RuleBuildError::InvalidBounds {
                            rule: "length",
                            min: min.to_string(),
                            max: max.to_string(),
                        });
                    }
                }
                Box::new(LengthRule {
                    min: *min,
                    max: *max,
                })
            }
            RuleDefinition::Between { min, max } => {
                if min > max {
                    return Err(RuleBuildError::InvalidBounds {
                        rule: "between",
                        min: min.to_string(),
                        max: max.to_string(),
                    });
                }
                Box::new(BetweenRule::new(*min, *max))
            }
            RuleDefinition::IntVal => Box::new(IntValRule),
            RuleDefinition::Numeric => Box::new(NumericRule),
            RuleDefinition::Email => Box::new(EmailRule),
            RuleDefinition::Url => Box::new(UrlRule),
            RuleDefinition::Regex { pattern } => Box::new(RegexRule::new(pattern.clone())?),
            RuleDefinition::In { choices } => Box::new(InRule::new(choices.iter().cloned())),
            RuleDefinition::Alnum => Box::new(AlnumRule),
            RuleDefinition::NoWhitespace => Box::new(NoWhitespaceRule),
            RuleDefinition::Optional { rule } => Box::new(OptionalRule::new(rule.build()?)),
            RuleDefinition::AllOf { rules } => Box::new(Self::build_all(rules)?),
        };
        Ok(rule)
    }

    /// Build a list of definitions into one [`AllOfRule`].
    pub fn build_all(definitions: &[RuleDefinition]) -> Result<AllOfRule, RuleBuildError> {
        definitions
            .iter()
            .try_fold(AllOfRule::new(), |all, def| Ok(all.boxed(def.build()?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definitions_deserialize_from_tagged_json() {
        let json = r#"[
            {"type": "not_empty"},
            {"type": "length", "min": 3},
            {"type": "between", "min": 18, "max": 65},
            {"type": "optional", "rule": {"type": "email"}}
        ]"#;
        let defs: Vec<RuleDefinition> = serde_json::from_str(json).unwrap();

        assert_eq!(defs[0], RuleDefinition::NotEmpty);
        assert_eq!(
            defs[1],
            RuleDefinition::Length {
                min: Some(3),
                max: None
            }
        );
        assert_eq!(
            defs[2],
            RuleDefinition::Between {
                min: 18.0,
                max: 65.0
            }
        );
        assert_eq!(
            defs[3],
            RuleDefinition::Optional {
                rule: Box::new(RuleDefinition::Email)
            }
        );
    }

    #[test]
    fn build_all_keeps_definition_order() {
        let defs = vec![
            RuleDefinition::NotEmpty,
            RuleDefinition::IntVal,
            RuleDefinition::Between { min: 1.0, max: 9.0 },
        ];
        let rule = RuleDefinition::build_all(&defs).unwrap();
        assert_eq!(rule.rule_names(), vec!["notEmpty", "intVal", "between"]);

        let failure = rule.check(Some("")).unwrap_err();
        assert_eq!(
            failure.failed_rule_names(),
            vec!["notEmpty", "intVal", "between"]
        );
    }

    #[test]
    fn build_rejects_inverted_bounds() {
        let err = RuleDefinition::Between { min: 5.0, max: 1.0 }
            .build()
            .unwrap_err();
        assert!(matches!(err, RuleBuildError::InvalidBounds { rule: "between", .. }));

        let err = RuleDefinition::Length {
            min: Some(9),
            max: Some(2),
        }
        .build()
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid bounds for `length`: min 9 is greater than max 2"
        );
    }

    #[test]
    fn build_rejects_bad_pattern() {
        let err = RuleDefinition::Regex {
            pattern: "(".to_string(),
        }
        .build()
        .unwrap_err();
        assert!(matches!(err, RuleBuildError::InvalidPattern { .. }));
    }

    #[test]
    fn definition_roundtrip() {
        let def = RuleDefinition::AllOf {
            rules: vec![
                RuleDefinition::In {
                    choices: vec!["a".to_string(), "b".to_string()],
                },
                RuleDefinition::NoWhitespace,
            ],
        };
        let json = serde_json::to_string(&def).unwrap();
        let parsed: RuleDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(def, parsed);
    }
}
