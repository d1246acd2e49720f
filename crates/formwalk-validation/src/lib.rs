//! # formwalk-validation — Validator Combinators
//!
//! A [`Validator`] is a side-effect-free check of one submitted value:
//! it returns `Ok(())` or an [`ErrorIndicator`](formwalk_core::ErrorIndicator).
//! The factory functions in [`rules`], [`numeric`] and [`pattern`] build
//! validators from a [`ValidationOptions`] record.
//!
//! ## Shared Contract
//!
//! 1. If `options.optional` is set and the value is the empty string, the
//!    validator passes before any other check runs. [`presence`] and
//!    [`acceptance`] ignore `optional`: an optional presence check would
//!    never fail.
//! 2. If `options.message` is set, it replaces whatever indicator the
//!    check would have produced.
//! 3. Factories that can detect bad configuration up front
//!    ([`length`], [`numericality`], [`format`]) return
//!    `Result<Validator, SchemaError>`.
//!
//! ## Example
//!
//! ```
//! use formwalk_validation::{length, ValidationOptions};
//!
//! let username = length(ValidationOptions::new().minimum(3).maximum(16)).unwrap();
//! assert!(username.check("ada").is_ok());
//! assert!(username.check("al").is_err());
//! ```

pub mod messages;
pub mod numeric;
pub mod options;
pub mod pattern;
pub mod rules;
pub mod validator;

pub use numeric::numericality;
pub use options::ValidationOptions;
pub use pattern::{email, format, format_regex, url};
pub use rules::{
    acceptance, anything, confirmation, confirmation_of, exclusion, inclusion, length, presence,
    validate_with,
};
pub use validator::{Outcome, Validator};
