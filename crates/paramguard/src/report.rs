//! Serializable error report.

use crate::messages::FieldErrors;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Error state in the standard response envelope.
///
/// ```json
/// {
///   "error": {
///     "type": "validation_error",
///     "message": "Validation failed",
///     "fields": {
///       "age": {"between": "Value must be between 18 and 65"},
///       "name": ["Name required"]
///     }
///   }
/// }
/// ```
///
/// Fields are sorted by name so reports are stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub error: ReportBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportBody {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
    pub fields: BTreeMap<String, FieldErrors>,
}

impl ErrorReport {
    pub fn new(errors: &HashMap<String, FieldErrors>) -> Self {
        Self {
            error: ReportBody {
                error_type: "validation_error".to_string(),
                message: "Validation failed".to_string(),
                fields: errors
                    .iter()
                    .map(|(field, errors)| (field.clone(), errors.clone()))
                    .collect(),
            },
        }
    }

    /// Replace the top-level message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.error.message = message.into();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.error.fields.is_empty()
    }

    /// Number of fields with errors.
    pub fn len(&self) -> usize {
        self.error.fields.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::RuleMessages;

    #[test]
    fn report_serialization() {
        let mut errors = HashMap::new();
        errors.insert(
            "name".to_string(),
            FieldErrors::List(vec!["Name required".to_string()]),
        );
        errors.insert(
            "age".to_string(),
            FieldErrors::Rules(RuleMessages::from([("between", "Too young")])),
        );

        let report = ErrorReport::new(&errors);
        assert_eq!(report.len(), 2);

        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(
            json,
            r#"{"error":{"type":"validation_error","message":"Validation failed","fields":{"age":{"between":"Too young"},"name":["Name required"]}}}"#
        );

        let parsed: ErrorReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn empty_report() {
        let report = ErrorReport::new(&HashMap::new()).with_message("Nothing to see");
        assert!(report.is_empty());
        assert_eq!(report.error.message, "Nothing to see");
    }
}
