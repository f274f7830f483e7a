//! # paramguard
//!
//! Validates named input values, such as request parameters, against
//! per-field rules and collects human-readable error messages.
//!
//! ## Example
//!
//! ```rust
//! use paramguard::prelude::*;
//!
//! let query = QueryParams::parse("username=a!&age=30")?;
//!
//! let rules = RuleSet::new()
//!     .field("username", all_of().not_empty().length(3, 20).alnum())
//!     .field("age", all_of().int_val().between(18, 65));
//!
//! let config = ValidatorConfig::new()
//!     .default_message("length", "Must be {min} to {max} characters long");
//!
//! let mut validator = Validator::with_config(config);
//! validator.validate_with(
//!     &query,
//!     &rules,
//!     &RuleMessages::from([("alnum", "Only letters and digits, please")]),
//! )?;
//!
//! assert!(!validator.is_valid());
//! assert_eq!(
//!     validator.param_errors("username"),
//!     vec!["Must be 3 to 20 characters long", "Only letters and digits, please"]
//! );
//! assert_eq!(validator.value("age"), "30");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Message precedence
//!
//! For each failed rule the message comes from, lowest to highest:
//!
//! - the rule's own default message
//! - [`ValidatorConfig::default_messages`]
//! - the messages passed to [`Validator::validate_with`]
//! - the field's [`FieldOptions::messages`]
//!
//! [`FieldOptions::message`] replaces all of them with a single message.
//!
//! ## Error Format
//!
//! [`Validator::report`] produces:
//!
//! ```json
//! {
//!   "error": {
//!     "type": "validation_error",
//!     "message": "Validation failed",
//!     "fields": {"username": {"length": "Must be 3 to 20 characters long"}}
//!   }
//! }
//! ```

mod config;
mod error;
mod messages;
mod report;
mod resolver;
mod source;
mod spec;
mod validator;

pub use config::ValidatorConfig;
pub use error::{Error, Result};
pub use messages::{FieldErrors, RuleMessages};
pub use report::{ErrorReport, ReportBody};
pub use resolver::{FieldOverrides, MessageResolver};
pub use source::{ParamSource, QueryParams};
pub use spec::{FieldOptions, RuleSet, RuleSpec};
pub use validator::{Errors, Validator, Values};

/// The rule engine.
pub use paramguard_rules as rules;

/// Prelude module for validation
pub mod prelude {
    pub use crate::config::ValidatorConfig;
    pub use crate::error::Error;
    pub use crate::messages::{FieldErrors, RuleMessages};
    pub use crate::source::{ParamSource, QueryParams};
    pub use crate::spec::{FieldOptions, RuleSet, RuleSpec};
    pub use crate::validator::Validator;
    pub use paramguard_rules::prelude::*;
}
