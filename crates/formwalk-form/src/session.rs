//! # Session — Forms and Their Validation State
//!
//! A [`FormDefinition`] says what a form is: a name, a [`Schema`] and an
//! optional form-level `verify` step that runs after every field has been
//! checked. A [`FormSession`] binds one definition to the state of one
//! submission: the raw input, the echoed data and the error map.
//!
//! ## Lifecycle
//!
//! 1. [`FormSession::validate`] resets data and errors, walks the schema
//!    and then calls `verify`.
//! 2. It returns `Some(&data)` when no error was recorded and `None`
//!    otherwise. The data and error maps stay readable either way, so the
//!    caller can re-render the form with submitted values and messages.
//! 3. Calling `validate` again with a new submission starts over; nothing
//!    carries across calls.
//!
//! Sessions are single-threaded values. Definitions and schemas are
//! immutable and can be shared between sessions behind an `Arc`.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use formwalk_core::{ErrorIndicator, ErrorMap, FieldPath, FormData, FormInput};

use crate::schema::Schema;
use crate::walker::Walker;

/// What a form is, independent of any submission.
pub trait FormDefinition: Send + Sync {
    /// Form name. Also the top-level key under which the form's fields
    /// are usually submitted.
    fn name(&self) -> &str;

    /// The field validators.
    fn schema(&self) -> &Schema;

    /// Form-level checks, run after every field has been validated.
    /// Record failures with [`ErrorMap::append_error`].
    fn verify(&self, _data: &FormData, _errors: &mut ErrorMap) {}

    /// Whether `input` looks like a submission of this form: it carries
    /// a top-level key equal to the form name.
    fn is_own_submission(&self, input: &FormInput) -> bool {
        input.get(self.name()).is_some()
    }
}

type VerifyFn = dyn Fn(&FormData, &mut ErrorMap) + Send + Sync;

/// A [`FormDefinition`] assembled from parts.
#[derive(Clone)]
pub struct Form {
    name: String,
    schema: Schema,
    verify: Option<Arc<VerifyFn>>,
}

impl Form {
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
            verify: None,
        }
    }

    /// Attach a form-level check.
    pub fn with_verify<F>(mut self, verify: F) -> Self
    where
        F: Fn(&FormData, &mut ErrorMap) + Send + Sync + 'static,
    {
        self.verify = Some(Arc::new(verify));
        self
    }
}

impl FormDefinition for Form {
    fn name(&self) -> &str {
        &self.name
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn verify(&self, data: &FormData, errors: &mut ErrorMap) {
        if let Some(verify) = &self.verify {
            verify(data, errors);
        }
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("name", &self.name)
            .field("fields", &self.schema.field_count())
            .field("verify", &self.verify.is_some())
            .finish()
    }
}

/// One field as a renderer needs it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldView<'s> {
    pub path: FieldPath,
    /// The echoed value; `None` if the field was not visited.
    pub value: Option<&'s str>,
    pub errors: &'s [ErrorIndicator],
}

impl FieldView<'_> {
    pub fn has_error(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Serializable outcome of the last validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub form: String,
    pub valid: bool,
    pub data: FormData,
    pub errors: ErrorMap,
}

/// Validation state for one form.
pub struct FormSession<D: FormDefinition = Form> {
    definition: Arc<D>,
    input: FormInput,
    data: FormData,
    errors: ErrorMap,
}

impl<D: FormDefinition> FormSession<D> {
    pub fn new(definition: D) -> Self {
        Self::shared(Arc::new(definition))
    }

    /// A session over a definition shared with other sessions.
    pub fn shared(definition: Arc<D>) -> Self {
        Self {
            definition,
            input: FormInput::new(),
            data: FormData::new(),
            errors: ErrorMap::new(),
        }
    }

    pub fn definition(&self) -> &D {
        &self.definition
    }

    /// Validate `input` against the schema and the form-level checks.
    ///
    /// Returns the echoed data when every check passed.
    pub fn validate(&mut self, input: FormInput) -> Option<&FormData> {
        let span = tracing::debug_span!("validate", form = self.definition.name());
        let _guard = span.enter();

        self.data.clear();
        self.errors.clear();
        self.input = input;

        let fields = Walker::new(&self.input, &mut self.data, &mut self.errors)
            .walk(self.definition.schema());
        self.definition.verify(&self.data, &mut self.errors);

        tracing::debug!(fields, failed = self.errors.error_count(), "validation finished");
        if self.has_errors() {
            None
        } else {
            Some(&self.data)
        }
    }

    /// Record an error from outside the schema, e.g. after a backend
    /// rejected the submission.
    pub fn invalidate(&mut self, path: impl Into<FieldPath>, indicator: impl Into<ErrorIndicator>) {
        self.errors.append_error(&path.into(), indicator.into());
    }

    /// Whether any error is recorded. Empty levels left behind by a
    /// `verify` step do not count.
    pub fn has_errors(&self) -> bool {
        self.errors.error_count() > 0
    }

    /// Whether an error is recorded at `path` or anywhere below it.
    pub fn has_error(&self, path: impl Into<FieldPath>) -> bool {
        self.errors.read(&path.into()).is_some()
    }

    /// Whether `indicator` is among the errors recorded at `path`.
    pub fn has_error_code(&self, path: impl Into<FieldPath>, indicator: &ErrorIndicator) -> bool {
        self.errors.errors_at(&path.into()).contains(indicator)
    }

    /// Errors recorded exactly at `path`.
    pub fn error_for(&self, path: impl Into<FieldPath>) -> &[ErrorIndicator] {
        self.errors.errors_at(&path.into())
    }

    /// Echoed value at `path`.
    pub fn value_for(&self, path: impl Into<FieldPath>) -> Option<&str> {
        self.data.text_at(&path.into())
    }

    pub fn field(&self, path: impl Into<FieldPath>) -> FieldView<'_> {
        let path = path.into();
        FieldView {
            value: self.data.text_at(&path),
            errors: self.errors.errors_at(&path),
            path,
        }
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// The submission given to the last [`validate`](Self::validate).
    pub fn input(&self) -> &FormInput {
        &self.input
    }

    pub fn report(&self) -> ValidationReport {
        ValidationReport {
            form: self.definition.name().to_string(),
            valid: !self.has_errors(),
            data: self.data.clone(),
            errors: self.errors.clone(),
        }
    }
}

impl<D: FormDefinition> fmt::Debug for FormSession<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormSession")
            .field("form", &self.definition.name())
            .field("errors", &self.errors.error_count())
            .finish_non_exhaustive()
    }
}
