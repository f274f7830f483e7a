//! Built-in rules.
//!
//! Leaf rules fail on absent values; wrap them in [`OptionalRule`] to
//! accept a missing parameter.

mod composite;
mod numeric;
mod string;

pub use composite::*;
pub use numeric::*;
pub use string::*;

/// Start an empty [`AllOfRule`] chain.
pub fn all_of() -> AllOfRule {
    AllOfRule::new()
}

pub fn not_empty() -> NotEmptyRule {
    NotEmptyRule
}

pub fn length(min: usize, max: usize) -> LengthRule {
    LengthRule::new(min, max)
}

pub fn between(min: impl Into<f64>, max: impl Into<f64>) -> BetweenRule {
    BetweenRule::new(min, max)
}

pub fn int_val() -> IntValRule {
    IntValRule
}

pub fn numeric() -> NumericRule {
    NumericRule
}

pub fn email() -> EmailRule {
    EmailRule
}

pub fn url() -> UrlRule {
    UrlRule
}

pub fn optional<R: crate::Rule>(rule: R) -> OptionalRule<R> {
    OptionalRule::new(rule)
}
