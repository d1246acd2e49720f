//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout formwalk. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - A field that fails a check is not an error here. It is an
//!   [`ErrorIndicator`](crate::ErrorIndicator) recorded in the error map.
//! - Schema misconfiguration is fatal and surfaces at construction time
//!   (or when a declarative form file is built), naming the field path
//!   where possible.
//! - Input that cannot be decoded into a form submission is rejected
//!   before any validation runs.

use thiserror::Error;

/// Top-level error type for formwalk.
#[derive(Error, Debug)]
pub enum FormwalkError {
    /// The schema could not be constructed.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// The submission could not be turned into a form input map.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A form definition or submission file could not be loaded.
    #[error("load error for '{path}': {reason}")]
    Load {
        /// Path of the file that failed to load.
        path: String,
        /// Reason the file could not be loaded.
        reason: String,
    },
}

/// A schema that cannot be built as written.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// A `format` pattern failed to compile.
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern as supplied.
        pattern: String,
        /// Compiler diagnostic.
        reason: String,
    },

    /// Options that contradict each other or are out of range.
    #[error("invalid options for {validator}: {reason}")]
    InvalidOption {
        /// Validator the options were given to.
        validator: String,
        /// What is wrong with them.
        reason: String,
    },

    /// A rule that needs a parameter was declared without it.
    #[error("rule '{rule}' requires parameter '{parameter}'")]
    MissingParameter {
        /// Rule name.
        rule: String,
        /// Name of the missing parameter.
        parameter: String,
    },

    /// A declarative rule name that no factory answers to.
    #[error("unknown rule '{0}'")]
    UnknownRule(String),

    /// The structure of a form definition is unusable.
    #[error("malformed form definition: {0}")]
    Malformed(String),

    /// Wraps another schema error with the field path it occurred at.
    #[error("field '{path}': {source}")]
    AtField {
        /// Bracket-notation path of the offending field.
        path: String,
        /// The underlying error.
        #[source]
        source: Box<SchemaError>,
    },
}

impl SchemaError {
    /// Attach a field path to this error.
    pub fn at_field(self, path: impl Into<String>) -> Self {
        SchemaError::AtField {
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// Construct an [`SchemaError::InvalidOption`] for the named validator.
    pub fn invalid_option(validator: &str, reason: impl Into<String>) -> Self {
        SchemaError::InvalidOption {
            validator: validator.to_string(),
            reason: reason.into(),
        }
    }

    /// Construct a [`SchemaError::MissingParameter`].
    pub fn missing_parameter(rule: &str, parameter: &str) -> Self {
        SchemaError::MissingParameter {
            rule: rule.to_string(),
            parameter: parameter.to_string(),
        }
    }
}
