//! # formwalk-core — Foundational Types for Form Validation
//!
//! This crate defines the data model every other formwalk crate builds on.
//! It depends on nothing internal.
//!
//! ## Key Types
//!
//! 1. **[`FieldPath`].** A parsed bracket-notation address such as
//!    `user[address][city]` or `items[]`. The `[]` segment is a
//!    [`Segment::Wildcard`], expanded against submitted keys at
//!    validation time.
//!
//! 2. **[`NestedMap`].** String-keyed tree storage used for the raw
//!    submission ([`FormInput`]), the echoed data ([`FormData`]) and the
//!    error map ([`ErrorMap`]). Reading and writing by [`FieldPath`] lives
//!    here.
//!
//! 3. **[`ErrorIndicator`].** What a failed check reports: a numeric
//!    code, a token, or a human-readable message.
//!
//! 4. **[`FormwalkError`] / [`SchemaError`].** Rust errors for the things
//!    that are genuinely errors: misconfigured schemas and undecodable
//!    input. Field validation failures are never Rust errors.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `formwalk-*` crates.
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests.

pub mod error;
pub mod indicator;
pub mod input;
pub mod map;
pub mod path;

// Re-export primary types for ergonomic imports.
pub use error::{FormwalkError, SchemaError};
pub use indicator::ErrorIndicator;
pub use input::FormInput;
pub use map::{Entry, ErrorMap, FormData, NestedMap, OWN_ERRORS_KEY};
pub use path::{FieldPath, Segment, WILDCARD};
