//! # Walker — Recursive Schema Traversal
//!
//! Walks a [`Schema`] depth first against a submission, echoing every
//! visited field into the data map and recording every failed check in
//! the error map.
//!
//! ## Per-Node Behavior
//!
//! - **Leaf / LeafList.** The submitted value at the current path is read
//!   (absent reads as `""`) and written to the data map. Each validator
//!   runs in order; every failure is appended, so one field can collect
//!   several indicators.
//! - **Branch.** Each child is visited with the path extended by the
//!   child's segment. A wildcard child is visited once per key the
//!   submission holds at the current path, in key order. With nothing
//!   submitted there, the wildcard subtree is skipped.
//!
//! A leaf whose submitted value is itself a nested map keeps the map in
//! the data output, and its validators see the empty string.

use formwalk_core::{Entry, ErrorMap, FieldPath, FormData, FormInput, Segment};
use formwalk_validation::Validator;

use crate::schema::{Branch, Schema, ValidationNode};

/// One validation pass over a submission.
pub struct Walker<'a> {
    input: &'a FormInput,
    data: &'a mut FormData,
    errors: &'a mut ErrorMap,
    fields: usize,
}

impl<'a> Walker<'a> {
    pub fn new(input: &'a FormInput, data: &'a mut FormData, errors: &'a mut ErrorMap) -> Self {
        Self {
            input,
            data,
            errors,
            fields: 0,
        }
    }

    /// Walk the whole schema. Returns the number of concrete fields
    /// visited (each wildcard expansion counts separately).
    pub fn walk(mut self, schema: &Schema) -> usize {
        self.branch(schema.root(), &FieldPath::root());
        self.fields
    }

    /// Walk `node` as if it were mounted at `path`.
    pub fn walk_node(mut self, node: &ValidationNode, path: &FieldPath) -> usize {
        self.node(node, path);
        self.fields
    }

    fn node(&mut self, node: &ValidationNode, path: &FieldPath) {
        match node {
            ValidationNode::Leaf(validator) => self.leaf(std::slice::from_ref(validator), path),
            ValidationNode::LeafList(validators) => self.leaf(validators, path),
            ValidationNode::Branch(branch) => self.branch(branch, path),
        }
    }

    fn branch(&mut self, branch: &Branch, path: &FieldPath) {
        for (segment, child) in branch.children() {
            match segment {
                Segment::Key(_) => self.node(child, &path.child(segment.clone())),
                Segment::Wildcard => {
                    let keys = self.input.keys_at(path);
                    tracing::debug!(path = %path, count = keys.len(), "expanding wildcard");
                    for key in keys {
                        self.node(child, &path.child(Segment::Key(key)));
                    }
                }
            }
        }
    }

    fn leaf(&mut self, validators: &[Validator], path: &FieldPath) {
        self.fields += 1;
        tracing::trace!(field = %path, validators = validators.len(), "checking field");
        let input = self.input;

        let value = match input.read(path) {
            Some(Entry::Value(text)) => {
                self.data.write_value(path, text.clone());
                text.as_str()
            }
            Some(Entry::Map(nested)) => {
                tracing::warn!(field = %path, "expected a single value but a nested map was submitted");
                self.data.write(path, Entry::Map(nested.clone()));
                ""
            }
            None => {
                self.data.write_value(path, String::new());
                ""
            }
        };

        for validator in validators {
            let Err(indicator) = validator.check_in(value, input) else {
                continue;
            };
            tracing::trace!(field = %path, validator = validator.name(), error = %indicator, "check failed");
            self.errors.append_error(path, indicator);
        }
    }
}
