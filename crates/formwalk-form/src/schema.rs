//! # Schema — The Validation Tree
//!
//! A [`Schema`] is a tree of [`ValidationNode`]s keyed by path segment.
//! The three node shapes are explicit, so there is never any question of
//! whether a list means "several validators for one field" or "several
//! sub-fields":
//!
//! - [`ValidationNode::Leaf`]: one validator for the field at this path.
//! - [`ValidationNode::LeafList`]: several validators, all applied to the
//!   same path, in order.
//! - [`ValidationNode::Branch`]: sub-fields; each child extends the path
//!   by its segment. A [`Segment::Wildcard`] child is repeated for every
//!   key submitted at that position.
//!
//! ## Building
//!
//! [`Branch::field`] takes a bracket path, so nesting can be spelled
//! inline:
//!
//! ```
//! use formwalk_form::Schema;
//! use formwalk_validation::{email, presence, ValidationOptions};
//!
//! let schema = Schema::new()
//!     .field("user[name]", presence(ValidationOptions::new()))
//!     .field("user[email]", [presence(ValidationOptions::new()), email(ValidationOptions::new())])
//!     .field("tags[]", presence(ValidationOptions::new()));
//! assert_eq!(schema.field_count(), 3);
//! ```
//!
//! Adding validators at a path that already has some appends to them;
//! adding sub-fields under an existing branch merges the branches.

use formwalk_core::{FieldPath, Segment};
use formwalk_validation::Validator;

/// One node of the validation tree.
#[derive(Debug, Clone)]
pub enum ValidationNode {
    /// A single validator.
    Leaf(Validator),
    /// Several validators for the same field.
    LeafList(Vec<Validator>),
    /// Sub-fields.
    Branch(Branch),
}

impl ValidationNode {
    /// The validators of a leaf node; empty for a branch.
    pub fn validators(&self) -> &[Validator] {
        match self {
            ValidationNode::Leaf(v) => std::slice::from_ref(v),
            ValidationNode::LeafList(vs) => vs,
            ValidationNode::Branch(_) => &[],
        }
    }

    fn into_validators(self) -> Vec<Validator> {
        match self {
            ValidationNode::Leaf(v) => vec![v],
            ValidationNode::LeafList(vs) => vs,
            ValidationNode::Branch(_) => Vec::new(),
        }
    }

    /// Combine `other` into this node.
    fn absorb(&mut self, other: ValidationNode) {
        let current = std::mem::replace(self, ValidationNode::LeafList(Vec::new()));
        *self = match (current, other) {
            (ValidationNode::Branch(mut mine), ValidationNode::Branch(theirs)) => {
                mine.merge(theirs);
                ValidationNode::Branch(mine)
            }
            (ValidationNode::Branch(_), other) | (_, other @ ValidationNode::Branch(_)) => {
                tracing::warn!("field redefined between validators and sub-fields; keeping the later definition");
                other
            }
            (current, other) => {
                let mut validators = current.into_validators();
                validators.extend(other.into_validators());
                ValidationNode::LeafList(validators)
            }
        };
    }

    fn field_count(&self) -> usize {
        match self {
            ValidationNode::Branch(branch) => branch.field_count(),
            _ => 1,
        }
    }
}

impl From<Validator> for ValidationNode {
    fn from(v: Validator) -> Self {
        ValidationNode::Leaf(v)
    }
}

impl From<Vec<Validator>> for ValidationNode {
    fn from(vs: Vec<Validator>) -> Self {
        ValidationNode::LeafList(vs)
    }
}

impl<const N: usize> From<[Validator; N]> for ValidationNode {
    fn from(vs: [Validator; N]) -> Self {
        ValidationNode::LeafList(vs.into())
    }
}

impl From<Branch> for ValidationNode {
    fn from(branch: Branch) -> Self {
        ValidationNode::Branch(branch)
    }
}

/// Children keyed by segment, in the order they were added.
#[derive(Debug, Clone, Default)]
pub struct Branch {
    children: Vec<(Segment, ValidationNode)>,
}

impl Branch {
    /// An empty branch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `node` at the bracket path `path`, relative to this branch.
    pub fn field(mut self, path: impl Into<FieldPath>, node: impl Into<ValidationNode>) -> Self {
        self.insert(&path.into(), node.into());
        self
    }

    /// Add `node` at `path`, creating intermediate branches.
    ///
    /// At the empty path a branch is merged into this one; a leaf has no
    /// field to attach to and is dropped with a warning.
    pub fn insert(&mut self, path: &FieldPath, node: ValidationNode) {
        let Some((head, rest)) = path.segments().split_first() else {
            match node {
                ValidationNode::Branch(branch) => self.merge(branch),
                _ => tracing::warn!("validators given for the empty field path were ignored"),
            }
            return;
        };
        let child = if rest.is_empty() {
            node
        } else {
            let mut nested = Branch::new();
            nested.insert(&FieldPath::from_segments(rest.iter().cloned()), node);
            ValidationNode::Branch(nested)
        };
        self.attach(head.clone(), child);
    }

    /// Child for `segment`.
    pub fn get(&self, segment: &Segment) -> Option<&ValidationNode> {
        self.children
            .iter()
            .find(|(s, _)| s == segment)
            .map(|(_, node)| node)
    }

    /// Children in insertion order.
    pub fn children(&self) -> impl Iterator<Item = (&Segment, &ValidationNode)> {
        self.children.iter().map(|(s, n)| (s, n))
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of leaf fields (a wildcard subtree counts once).
    pub fn field_count(&self) -> usize {
        self.children.iter().map(|(_, n)| n.field_count()).sum()
    }

    fn attach(&mut self, segment: Segment, node: ValidationNode) {
        match self.children.iter_mut().find(|(s, _)| *s == segment) {
            Some((_, existing)) => existing.absorb(node),
            None => self.children.push((segment, node)),
        }
    }

    fn merge(&mut self, other: Branch) {
        for (segment, node) in other.children {
            self.attach(segment, node);
        }
    }
}

/// The root of a validation tree.
///
/// Immutable once built; clone it (validators are reference-counted) or
/// wrap it in an `Arc` to share between sessions.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    root: Branch,
}

impl Schema {
    /// An empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `node` at the bracket path `path`.
    pub fn field(mut self, path: impl Into<FieldPath>, node: impl Into<ValidationNode>) -> Self {
        self.root.insert(&path.into(), node.into());
        self
    }

    /// Add `node` at `path` in place.
    pub fn insert(&mut self, path: &FieldPath, node: ValidationNode) {
        self.root.insert(path, node);
    }

    /// The root branch.
    pub fn root(&self) -> &Branch {
        &self.root
    }

    /// Node at `path`, following wildcard segments literally.
    pub fn node(&self, path: &FieldPath) -> Option<&ValidationNode> {
        let (first, rest) = path.segments().split_first()?;
        let mut node = self.root.get(first)?;
        for segment in rest {
            match node {
                ValidationNode::Branch(branch) => node = branch.get(segment)?,
                _ => return None,
            }
        }
        Some(node)
    }

    /// Number of leaf fields.
    pub fn field_count(&self) -> usize {
        self.root.field_count()
    }
}

impl From<Branch> for Schema {
    fn from(root: Branch) -> Self {
        Self { root }
    }
}
