//! # Validator — A Shareable Check
//!
//! Wraps a closure behind an `Arc` so a schema can be cloned and shared
//! across threads and sessions. A validator sees the value under test and
//! a read-only view of the whole raw submission; only cross-field checks
//! such as [`confirmation_of`](crate::confirmation_of) look at the latter.

use std::fmt;
use std::sync::Arc;

use formwalk_core::{ErrorIndicator, FormInput};

use crate::options::ValidationOptions;

/// Result of one check.
pub type Outcome = Result<(), ErrorIndicator>;

type CheckFn = dyn Fn(&str, &FormInput) -> Outcome + Send + Sync;

/// A named, cloneable validation check.
#[derive(Clone)]
pub struct Validator {
    name: &'static str,
    check: Arc<CheckFn>,
}

impl Validator {
    /// Wrap a value-only check.
    pub fn new<F>(name: &'static str, check: F) -> Self
    where
        F: Fn(&str) -> Outcome + Send + Sync + 'static,
    {
        Self::with_input(name, move |value, _| check(value))
    }

    /// Wrap a check that may also read the raw submission.
    pub fn with_input<F>(name: &'static str, check: F) -> Self
    where
        F: Fn(&str, &FormInput) -> Outcome + Send + Sync + 'static,
    {
        Self {
            name,
            check: Arc::new(check),
        }
    }

    /// Factory name, used in logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Check `value` against an empty submission.
    pub fn check(&self, value: &str) -> Outcome {
        self.check_in(value, &FormInput::new())
    }

    /// Check `value` as part of `input`.
    pub fn check_in(&self, value: &str, input: &FormInput) -> Outcome {
        (self.check)(value, input)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// The `optional` and `message` handling every factory shares.
#[derive(Debug, Clone)]
pub(crate) struct Guard {
    optional: bool,
    message: Option<ErrorIndicator>,
}

impl Guard {
    /// Honour both `optional` and `message`.
    pub(crate) fn new(options: &ValidationOptions) -> Self {
        Self {
            optional: options.optional,
            message: options.message.clone(),
        }
    }

    /// Honour `message` only; blank values are always checked.
    pub(crate) fn always(options: &ValidationOptions) -> Self {
        Self {
            optional: false,
            message: options.message.clone(),
        }
    }

    /// Build the validator around `check`.
    pub(crate) fn wrap<F>(self, name: &'static str, check: F) -> Validator
    where
        F: Fn(&str, &FormInput) -> Outcome + Send + Sync + 'static,
    {
        Validator::with_input(name, move |value, input| {
            if self.optional && value.is_empty() {
                return Ok(());
            }
            check(value, input).map_err(|default| match &self.message {
                Some(message) => message.clone(),
                None => default,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_shows_name() {
        let v = Validator::new("always", |_| Ok(()));
        assert!(format!("{v:?}").contains("always"));
        assert_eq!(v.name(), "always");
    }

    #[test]
    fn guard_skips_blank_when_optional() {
        let v = Guard::new(&ValidationOptions::new().optional())
            .wrap("never", |_, _| Err(ErrorIndicator::token("nope")));
        assert_eq!(v.check(""), Ok(()));
        assert_eq!(v.check("x"), Err(ErrorIndicator::token("nope")));
    }

    #[test]
    fn guard_replaces_message() {
        let v = Guard::always(&ValidationOptions::new().optional().message(ErrorIndicator::Code(9)))
            .wrap("never", |_, _| Err(ErrorIndicator::token("nope")));
        assert_eq!(v.check(""), Err(ErrorIndicator::Code(9)));
    }

    #[test]
    fn clones_share_the_check() {
        let v = Validator::new("len", |s| {
            if s.len() > 1 {
                Ok(())
            } else {
                Err("short".into())
            }
        });
        let w = v.clone();
        assert_eq!(w.check("ab"), Ok(()));
        assert!(w.check("a").is_err());
    }
}
