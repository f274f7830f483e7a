//! # paramguard rules
//!
//! The rule engine behind paramguard. A [`Rule`] checks one raw parameter
//! value and, on failure, returns a [`RuleFailure`] naming every failed
//! sub-rule together with its default message.
//!
//! ## Example
//!
//! ```rust
//! use paramguard_rules::prelude::*;
//!
//! let age = all_of().not_empty().int_val().between(18, 65);
//!
//! assert!(age.check(Some("30")).is_ok());
//!
//! let failure = age.check(Some("10")).unwrap_err();
//! assert_eq!(failure.failed_rule_names(), vec!["between"]);
//! assert_eq!(
//!     failure.default_messages()[0].1,
//!     "Value must be between 18 and 65"
//! );
//! ```
//!
//! ## Rules
//!
//! | identifier | rule |
//! |---|---|
//! | `notEmpty` | [`NotEmptyRule`] |
//! | `length` | [`LengthRule`] |
//! | `between` | [`BetweenRule`] |
//! | `intVal` | [`IntValRule`] |
//! | `numeric` | [`NumericRule`] |
//! | `email` | [`EmailRule`] |
//! | `url` | [`UrlRule`] |
//! | `regex` | [`RegexRule`] |
//! | `in` | [`InRule`] |
//! | `alnum` | [`AlnumRule`] |
//! | `noWhitespace` | [`NoWhitespaceRule`] |

mod definition;
mod error;
mod rule;
pub mod rules;

pub use definition::RuleDefinition;
pub use error::{RuleBuildError, RuleError, RuleFailure};
pub use rule::Rule;
pub use rules::*;

/// Prelude module for rules
pub mod prelude {
    pub use crate::definition::RuleDefinition;
    pub use crate::error::{RuleBuildError, RuleError, RuleFailure};
    pub use crate::rule::Rule;
    pub use crate::rules::*;
}
