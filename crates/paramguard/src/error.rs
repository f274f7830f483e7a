//! Error types for paramguard.
//!
//! Only malformed configuration is an error. A value failing its rules is
//! recorded on the [`Validator`](crate::Validator) and never returned as `Err`.

use paramguard_rules::RuleBuildError;

/// Result type alias for paramguard operations
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Configuration error raised while building or applying rule specs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A field's spec cannot be turned into a rule.
    #[error("invalid configuration for `{field}`: {reason}")]
    InvalidConfiguration { field: String, reason: String },

    /// A rule definition for a field failed to build.
    #[error("invalid rule definition for `{field}`: {source}")]
    RuleBuild {
        field: String,
        #[source]
        source: RuleBuildError,
    },

    /// Configuration JSON could not be parsed.
    #[error("malformed configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid configuration error for `field`.
    pub fn invalid_configuration(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
