//! # Rules — General-Purpose Validator Factories
//!
//! Presence, acceptance, length, membership, confirmation and custom
//! predicates. Numeric checks live in [`numeric`](crate::numeric) and
//! pattern-based checks in [`pattern`](crate::pattern).

use formwalk_core::{ErrorIndicator, FieldPath, FormInput, SchemaError};

use crate::messages;
use crate::options::ValidationOptions;
use crate::validator::{Guard, Outcome, Validator};

/// Always passes. Useful to echo a field into the data map unchecked.
pub fn anything() -> Validator {
    Validator::new("anything", |_| Ok(()))
}

/// Fails on the empty string. Ignores `optional`.
pub fn presence(options: ValidationOptions) -> Validator {
    Guard::always(&options).wrap("presence", |value, _| {
        if value.is_empty() {
            Err(ErrorIndicator::message(messages::BLANK))
        } else {
            Ok(())
        }
    })
}

/// Requires a checkbox-style acceptance. Ignores `optional`.
///
/// With `accept` set the value must equal it exactly; otherwise any value
/// other than `""` and `"0"` is accepted.
pub fn acceptance(options: ValidationOptions) -> Validator {
    let accept = options.accept.clone();
    Guard::always(&options).wrap("acceptance", move |value, _| {
        let accepted = match &accept {
            Some(token) => value == token,
            None => !value.is_empty() && value != "0",
        };
        if accepted {
            Ok(())
        } else {
            Err(ErrorIndicator::message(messages::ACCEPTED))
        }
    })
}

/// Character-length bounds: `is`, then `minimum`, then `maximum`.
///
/// Bounds are inclusive and combinable; the first failing bound decides
/// the error. With no bounds set every value passes.
///
/// # Errors
///
/// Returns [`SchemaError::InvalidOption`] if `minimum > maximum`.
pub fn length(options: ValidationOptions) -> Result<Validator, SchemaError> {
    if let (Some(min), Some(max)) = (options.minimum, options.maximum) {
        if min > max {
            return Err(SchemaError::invalid_option(
                "length",
                format!("minimum ({min}) is greater than maximum ({max})"),
            ));
        }
    }
    let (is, minimum, maximum) = (options.is, options.minimum, options.maximum);
    Ok(Guard::new(&options).wrap("length", move |value, _| {
        let len = value.chars().count();
        if let Some(n) = is {
            if len != n {
                return Err(ErrorIndicator::Message(messages::wrong_length(n)));
            }
        }
        if let Some(n) = minimum {
            if len < n {
                return Err(ErrorIndicator::Message(messages::too_short(n)));
            }
        }
        if let Some(n) = maximum {
            if len > n {
                return Err(ErrorIndicator::Message(messages::too_long(n)));
            }
        }
        Ok(())
    }))
}

/// The value must equal what `other` returns at validation time.
pub fn confirmation<F>(options: ValidationOptions, other: F) -> Validator
where
    F: Fn() -> String + Send + Sync + 'static,
{
    Guard::new(&options).wrap("confirmation", move |value, _| {
        if value == other() {
            Ok(())
        } else {
            Err(ErrorIndicator::message(messages::CONFIRMATION))
        }
    })
}

/// The value must equal the submitted value at `field`.
///
/// The other field is read from the raw submission when the check runs;
/// an absent field reads as the empty string. `field` is an absolute
/// path: a wildcard segment never resolves, so `items[][password]` always
/// compares against `""`.
pub fn confirmation_of(field: impl Into<FieldPath>, options: ValidationOptions) -> Validator {
    let field = field.into();
    Guard::new(&options).wrap("confirmation", move |value, input: &FormInput| {
        let other = input.text_at(&field).unwrap_or("");
        if value == other {
            Ok(())
        } else {
            Err(ErrorIndicator::message(messages::CONFIRMATION))
        }
    })
}

/// The value must be one of `list` (exact string equality).
pub fn inclusion<I, S>(list: I, options: ValidationOptions) -> Validator
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let list: Vec<String> = list.into_iter().map(Into::into).collect();
    Guard::new(&options).wrap("inclusion", move |value, _| {
        if list.iter().any(|item| item == value) {
            Ok(())
        } else {
            Err(ErrorIndicator::message(messages::INCLUSION))
        }
    })
}

/// The value must not be one of `list`.
pub fn exclusion<I, S>(list: I, options: ValidationOptions) -> Validator
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let list: Vec<String> = list.into_iter().map(Into::into).collect();
    Guard::new(&options).wrap("exclusion", move |value, _| {
        if list.iter().any(|item| item == value) {
            Err(ErrorIndicator::message(messages::EXCLUSION))
        } else {
            Ok(())
        }
    })
}

/// Delegate to a caller-supplied predicate.
///
/// The predicate's own error indicator is reported unless
/// `options.message` overrides it.
pub fn validate_with<F>(options: ValidationOptions, predicate: F) -> Validator
where
    F: Fn(&str) -> Outcome + Send + Sync + 'static,
{
    Guard::new(&options).wrap("validate_with", move |value, _| predicate(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> ValidationOptions {
        ValidationOptions::new()
    }

    const SAMPLES: &[&str] = &[
        "0",
        "0.1",
        "1",
        "1.2",
        "true",
        "false",
        "s",
        "a very long string",
    ];

    #[test]
    fn anything_passes_everything() {
        let v = anything();
        assert!(v.check("").is_ok());
        for s in SAMPLES {
            assert!(v.check(s).is_ok(), "{s:?}");
        }
    }

    #[test]
    fn presence_rejects_blank_only() {
        let v = presence(opts());
        assert_eq!(v.check(""), Err(ErrorIndicator::message(messages::BLANK)));
        for s in SAMPLES {
            assert!(v.check(s).is_ok(), "{s:?}");
        }
    }

    #[test]
    fn presence_ignores_optional() {
        assert!(presence(opts().optional()).check("").is_err());
    }

    #[test]
    fn acceptance_defaults_to_truthy() {
        let v = acceptance(opts());
        assert!(v.check("").is_err());
        assert!(v.check("0").is_err());
        for s in SAMPLES.iter().filter(|s| **s != "0") {
            assert!(v.check(s).is_ok(), "{s:?}");
        }
    }

    #[test]
    fn acceptance_ignores_optional() {
        assert!(acceptance(opts().optional()).check("").is_err());
    }

    #[test]
    fn acceptance_with_accept_token() {
        let v = acceptance(opts().accept("yes"));
        assert!(v.check("yes").is_ok());
        for s in SAMPLES {
            assert!(v.check(s).is_err(), "{s:?}");
        }
    }

    #[test]
    fn length_without_bounds_passes() {
        let v = length(opts()).unwrap();
        assert!(v.check("").is_ok());
        assert!(v.check("a very long string").is_ok());
    }

    #[test]
    fn length_is_exact() {
        let v = length(opts().is(3)).unwrap();
        for s in ["", "s", "sh", "a very long string"] {
            assert!(v.check(s).is_err(), "{s:?}");
        }
        for s in ["0.1", "1.2", "tru", "fal"] {
            assert!(v.check(s).is_ok(), "{s:?}");
        }
    }

    #[test]
    fn length_bounds_are_inclusive() {
        let v = length(opts().minimum(1).maximum(5)).unwrap();
        assert_eq!(v.check(""), Err(ErrorIndicator::Message(messages::too_short(1))));
        assert_eq!(v.check("abcdef"), Err(ErrorIndicator::Message(messages::too_long(5))));
        assert!(v.check("a").is_ok());
        assert!(v.check("abcde").is_ok());
    }

    #[test]
    fn length_counts_characters() {
        let v = length(opts().maximum(3)).unwrap();
        assert!(v.check("åäö").is_ok());
    }

    #[test]
    fn length_is_checked_before_minimum() {
        let v = length(opts().is(4).minimum(6).maximum(8)).unwrap();
        assert_eq!(v.check("ab"), Err(ErrorIndicator::Message(messages::wrong_length(4))));
    }

    #[test]
    fn length_rejects_inverted_bounds() {
        let err = length(opts().minimum(5).maximum(2)).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidOption { .. }));
    }

    #[test]
    fn confirmation_reads_accessor_late() {
        use std::sync::{Arc, Mutex};
        let other = Arc::new(Mutex::new(String::from("first")));
        let handle = Arc::clone(&other);
        let v = confirmation(opts(), move || handle.lock().map(|s| s.clone()).unwrap_or_default());
        assert!(v.check("first").is_ok());
        *other.lock().unwrap() = "second".into();
        assert!(v.check("first").is_err());
        assert!(v.check("second").is_ok());
    }

    #[test]
    fn confirmation_of_reads_submission() {
        let input = FormInput::from_pairs([("password", "hunter2")]);
        let v = confirmation_of("password", opts());
        assert!(v.check_in("hunter2", &input).is_ok());
        assert_eq!(
            v.check_in("hunter3", &input),
            Err(ErrorIndicator::message(messages::CONFIRMATION))
        );
        // Against an empty submission the other side is blank.
        assert!(v.check("").is_ok());
    }

    #[test]
    fn inclusion_and_exclusion_are_complements() {
        let inc = inclusion(["x", "y"], opts());
        let exc = exclusion(["x", "y"], opts());
        assert!(inc.check("z").is_err());
        assert!(inc.check("x").is_ok());
        assert!(exc.check("z").is_ok());
        assert_eq!(exc.check("x"), Err(ErrorIndicator::message(messages::EXCLUSION)));
    }

    #[test]
    fn validate_with_reports_predicate_error() {
        let v = validate_with(opts(), |s| {
            if s == "testing" {
                Ok(())
            } else {
                Err(ErrorIndicator::token("test"))
            }
        });
        assert_eq!(v.check(""), Err(ErrorIndicator::token("test")));
        assert!(v.check("testing").is_ok());
    }

    #[test]
    fn message_overrides_default() {
        let v = inclusion(["a"], opts().message(ErrorIndicator::Code(-6)));
        assert_eq!(v.check("b"), Err(ErrorIndicator::Code(-6)));
    }

    #[test]
    fn optional_skips_blank_even_when_check_would_fail() {
        let optional = opts().optional();
        let validators = [
            length(optional.clone().minimum(3)).unwrap(),
            confirmation(optional.clone(), || "other".to_string()),
            confirmation_of("other", optional.clone()),
            inclusion(["a"], optional.clone()),
            exclusion([""], optional.clone()),
            validate_with(optional.clone(), |_| Err(ErrorIndicator::token("never"))),
        ];
        for v in &validators {
            assert!(v.check("").is_ok(), "{} should skip blank", v.name());
        }
    }
}
