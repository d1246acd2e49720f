//! # Error Indicators
//!
//! What a failed check reports. Callers pick the shape that suits their
//! rendering layer: numeric codes for lookup tables, short tokens for
//! translation keys, or ready-to-show messages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A semantic validation failure.
///
/// Serializes as a bare number (`Code`) or string (`Token`, `Message`).
/// Strings deserialize as `Message`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorIndicator {
    /// Numeric error code.
    Code(i64),
    /// Human-readable message.
    Message(String),
    /// Machine token, e.g. a translation key.
    Token(String),
}

impl ErrorIndicator {
    /// A human-readable message.
    pub fn message(message: impl Into<String>) -> Self {
        ErrorIndicator::Message(message.into())
    }

    /// A machine token.
    pub fn token(token: impl Into<String>) -> Self {
        ErrorIndicator::Token(token.into())
    }

    /// The textual form of a token or message.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ErrorIndicator::Code(_) => None,
            ErrorIndicator::Message(s) | ErrorIndicator::Token(s) => Some(s),
        }
    }
}

impl fmt::Display for ErrorIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorIndicator::Code(code) => write!(f, "{code}"),
            ErrorIndicator::Message(s) | ErrorIndicator::Token(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ErrorIndicator {
    fn from(message: &str) -> Self {
        ErrorIndicator::message(message)
    }
}

impl From<String> for ErrorIndicator {
    fn from(message: String) -> Self {
        ErrorIndicator::Message(message)
    }
}

impl From<i64> for ErrorIndicator {
    fn from(code: i64) -> Self {
        ErrorIndicator::Code(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_bare() {
        let list = vec![
            ErrorIndicator::Code(-12),
            ErrorIndicator::token("notemail"),
            ErrorIndicator::message("is invalid"),
        ];
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, r#"[-12,"notemail","is invalid"]"#);
    }

    #[test]
    fn strings_deserialize_as_messages() {
        let back: Vec<ErrorIndicator> = serde_json::from_str(r#"[3,"oops"]"#).unwrap();
        assert_eq!(back, vec![ErrorIndicator::Code(3), ErrorIndicator::message("oops")]);
    }

    #[test]
    fn display_is_plain() {
        assert_eq!(ErrorIndicator::Code(7).to_string(), "7");
        assert_eq!(ErrorIndicator::token("blank").to_string(), "blank");
    }
}
