//! # Pattern Validators
//!
//! URL, email and regular-expression checks.

use once_cell::sync::Lazy;
use regex::Regex;

use formwalk_core::{ErrorIndicator, SchemaError};

use crate::messages;
use crate::options::ValidationOptions;
use crate::validator::{Guard, Validator};

/// `local@domain.tld`: dot-atom local part, at least one dot in the
/// domain, labels of letters, digits and inner hyphens.
static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?$",
    )
    .expect("email pattern is a valid regex")
});

/// Absolute URL with a non-empty host.
pub fn url(options: ValidationOptions) -> Validator {
    Guard::new(&options).wrap("url", |value, _| {
        let well_formed = ::url::Url::parse(value)
            .map(|u| u.host_str().is_some_and(|host| !host.is_empty()))
            .unwrap_or(false);
        if well_formed {
            Ok(())
        } else {
            Err(ErrorIndicator::message(messages::NOT_A_URL))
        }
    })
}

/// A single email address.
pub fn email(options: ValidationOptions) -> Validator {
    Guard::new(&options).wrap("email", |value, _| {
        if value.len() <= 254 && EMAIL.is_match(value) {
            Ok(())
        } else {
            Err(ErrorIndicator::message(messages::NOT_AN_EMAIL))
        }
    })
}

/// The value must contain a match for `pattern` (unanchored, like a
/// search). Anchor the pattern with `^…$` to require a full match.
///
/// # Errors
///
/// Returns [`SchemaError::InvalidPattern`] if `pattern` does not compile.
pub fn format(pattern: &str, options: ValidationOptions) -> Result<Validator, SchemaError> {
    let regex = Regex::new(pattern).map_err(|e| SchemaError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;
    Ok(format_regex(regex, options))
}

/// [`format`] with an already-compiled expression.
pub fn format_regex(regex: Regex, options: ValidationOptions) -> Validator {
    Guard::new(&options).wrap("format", move |value, _| {
        if regex.is_match(value) {
            Ok(())
        } else {
            Err(ErrorIndicator::message(messages::INVALID))
        }
    })
}
