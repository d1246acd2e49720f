//! # formwalk-form — Schemas, Walks and Sessions
//!
//! Ties validators to field paths and runs them against a submission.
//!
//! - [`schema`]: the validation tree ([`Schema`], [`ValidationNode`]).
//! - [`walker`]: the depth-first walk that fills the data and error maps.
//! - [`session`]: [`FormDefinition`], [`Form`] and the per-submission
//!   [`FormSession`].
//! - [`document`]: forms declared in YAML or JSON.
//!
//! ## Example
//!
//! ```
//! use formwalk_core::FormInput;
//! use formwalk_form::{Form, FormSession, Schema};
//! use formwalk_validation::{presence, ValidationOptions};
//!
//! let schema = Schema::new().field("items[]", presence(ValidationOptions::new()));
//! let mut session = FormSession::new(Form::new("order", schema));
//!
//! let input = FormInput::from_pairs([("items[0]", "a"), ("items[1]", "")]);
//! assert!(session.validate(input).is_none());
//! assert!(session.has_error("items[1]"));
//! assert!(!session.has_error("items[0]"));
//! ```

pub mod document;
pub mod schema;
pub mod session;
pub mod walker;

pub use document::{FieldDecl, FormDocument, RuleDecl};
pub use schema::{Branch, Schema, ValidationNode};
pub use session::{FieldView, Form, FormDefinition, FormSession, ValidationReport};
pub use walker::Walker;
