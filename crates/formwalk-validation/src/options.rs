//! # Validation Options
//!
//! One record configures every factory; each factory reads the fields it
//! understands and ignores the rest. The record deserializes with every
//! field defaulted, so declarative form files can spell only what they use
//! (`{rule: length, minimum: 3}`).

use serde::{Deserialize, Serialize};

use formwalk_core::ErrorIndicator;

/// Configuration recognised by the validator factories.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Pass immediately when the value is the empty string.
    pub optional: bool,
    /// Replaces the default error indicator on failure.
    pub message: Option<ErrorIndicator>,
    /// Exact length, in characters.
    pub is: Option<usize>,
    /// Inclusive lower length bound.
    #[serde(alias = "min")]
    pub minimum: Option<usize>,
    /// Inclusive upper length bound.
    #[serde(alias = "max")]
    pub maximum: Option<usize>,
    /// Require an integer rather than any number.
    pub only_integer: bool,
    /// Require an even number.
    pub even: bool,
    /// Require an odd number.
    pub odd: bool,
    /// Numeric equality bound.
    pub equal_to: Option<f64>,
    /// Strict numeric upper bound.
    pub less_than: Option<f64>,
    /// Inclusive numeric upper bound.
    pub less_than_or_equal_to: Option<f64>,
    /// Strict numeric lower bound.
    pub greater_than: Option<f64>,
    /// Inclusive numeric lower bound.
    pub greater_than_or_equal_to: Option<f64>,
    /// The exact value `acceptance` expects.
    pub accept: Option<String>,
}

impl ValidationOptions {
    /// All defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn message(mut self, message: impl Into<ErrorIndicator>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn is(mut self, length: usize) -> Self {
        self.is = Some(length);
        self
    }

    pub fn minimum(mut self, length: usize) -> Self {
        self.minimum = Some(length);
        self
    }

    pub fn maximum(mut self, length: usize) -> Self {
        self.maximum = Some(length);
        self
    }

    pub fn only_integer(mut self) -> Self {
        self.only_integer = true;
        self
    }

    pub fn even(mut self) -> Self {
        self.even = true;
        self
    }

    pub fn odd(mut self) -> Self {
        self.odd = true;
        self
    }

    pub fn equal_to(mut self, bound: f64) -> Self {
        self.equal_to = Some(bound);
        self
    }

    pub fn less_than(mut self, bound: f64) -> Self {
        self.less_than = Some(bound);
        self
    }

    pub fn less_than_or_equal_to(mut self, bound: f64) -> Self {
        self.less_than_or_equal_to = Some(bound);
        self
    }

    pub fn greater_than(mut self, bound: f64) -> Self {
        self.greater_than = Some(bound);
        self
    }

    pub fn greater_than_or_equal_to(mut self, bound: f64) -> Self {
        self.greater_than_or_equal_to = Some(bound);
        self
    }

    pub fn accept(mut self, token: impl Into<String>) -> Self {
        self.accept = Some(token.into());
        self
    }
}
