//! # Nested Maps — Path-Addressed Tree Storage
//!
//! [`NestedMap`] is the container behind the raw submission, the echoed
//! form data and the error map. Each level maps string keys to either a
//! leaf value or another level.
//!
//! ## Addressing
//!
//! - [`NestedMap::read`] walks a [`FieldPath`] and returns the entry found,
//!   or `None` (Absent) as soon as a segment is missing, a scalar is in the
//!   way, or a wildcard segment is met.
//! - [`NestedMap::read_mut`] does the same with an optional
//!   `create_missing` flag that inserts empty levels for missing segments.
//!   It never replaces an existing scalar.
//! - [`NestedMap::write`] always succeeds: it creates missing levels,
//!   replaces scalars that stand where a level is needed, and overwrites
//!   whatever sits at the final segment.
//! - [`ErrorMap::append_error`] pushes onto the list at a path instead of
//!   overwriting it. A field with errors of its own and errors below it
//!   keeps its own list under [`OWN_ERRORS_KEY`].
//!
//! A wildcard segment in a *write* allocates the next free integer key at
//! that level, which is how `tags[]=a&tags[]=b` becomes `{"0": .., "1": ..}`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::indicator::ErrorIndicator;
use crate::path::{FieldPath, Segment};

/// One slot in a [`NestedMap`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry<T> {
    /// A leaf value.
    Value(T),
    /// A nested level.
    Map(NestedMap<T>),
}

impl<T> Entry<T> {
    /// The leaf value, if this is one.
    pub fn as_value(&self) -> Option<&T> {
        match self {
            Entry::Value(v) => Some(v),
            Entry::Map(_) => None,
        }
    }

    /// The nested level, if this is one.
    pub fn as_map(&self) -> Option<&NestedMap<T>> {
        match self {
            Entry::Map(m) => Some(m),
            Entry::Value(_) => None,
        }
    }

    /// Turn this slot into a level (discarding a leaf) and return it.
    fn make_map(&mut self) -> &mut NestedMap<T> {
        match self {
            Entry::Map(map) => map,
            Entry::Value(_) => {
                *self = Entry::Map(NestedMap::new());
                self.make_map()
            }
        }
    }
}

impl Entry<Vec<ErrorIndicator>> {
    /// Like `make_map`, but a leaf error list is kept under
    /// [`OWN_ERRORS_KEY`] of the new level.
    fn make_error_level(&mut self) -> &mut ErrorMap {
        if let Entry::Value(list) = self {
            let own = std::mem::take(list);
            let mut level = ErrorMap::new();
            level.entries.insert(OWN_ERRORS_KEY.to_string(), Entry::Value(own));
            *self = Entry::Map(level);
        }
        self.make_map()
    }

    /// The error list in this slot, moving a level's own errors out of
    /// [`OWN_ERRORS_KEY`] if this slot is a level.
    fn error_list(&mut self) -> &mut Vec<ErrorIndicator> {
        match self {
            Entry::Value(list) => list,
            Entry::Map(level) => level
                .entries
                .entry(OWN_ERRORS_KEY.to_string())
                .or_insert_with(|| Entry::Value(Vec::new()))
                .error_list(),
        }
    }
}

/// String-keyed tree of `T` leaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NestedMap<T> {
    entries: BTreeMap<String, Entry<T>>,
}

/// Echo of submitted values, shaped like the schema.
pub type FormData = NestedMap<String>;

/// Errors recorded per field path, in the order they were produced.
pub type ErrorMap = NestedMap<Vec<ErrorIndicator>>;

/// Key under which an [`ErrorMap`] level keeps the errors of the field
/// itself once errors were also recorded below it.
pub const OWN_ERRORS_KEY: &str = "_self";

impl<T> Default for NestedMap<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<T> NestedMap<T> {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of top-level keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no top-level keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate the top level in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry<T>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Top-level entry for `key`.
    pub fn get(&self, key: &str) -> Option<&Entry<T>> {
        self.entries.get(key)
    }

    /// Set a top-level entry, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, entry: Entry<T>) -> Option<Entry<T>> {
        self.entries.insert(key.into(), entry)
    }

    /// Remove a top-level entry.
    pub fn remove(&mut self, key: &str) -> Option<Entry<T>> {
        self.entries.remove(key)
    }

    /// Entry at `path`, or `None` if anything along the way is absent.
    ///
    /// The root path addresses the map itself, which is not an entry, so it
    /// also reads as `None`.
    pub fn read(&self, path: &FieldPath) -> Option<&Entry<T>> {
        let (last, parents) = path.segments().split_last()?;
        let mut level = self;
        for segment in parents {
            level = match level.entries.get(segment.as_key()?)? {
                Entry::Map(map) => map,
                Entry::Value(_) => return None,
            };
        }
        level.entries.get(last.as_key()?)
    }

    /// Mutable entry at `path`.
    ///
    /// With `create_missing`, absent segments (including the last) are
    /// filled with empty levels. A scalar in the middle of the path still
    /// yields `None`.
    pub fn read_mut(&mut self, path: &FieldPath, create_missing: bool) -> Option<&mut Entry<T>> {
        let (last, parents) = path.segments().split_last()?;
        let mut level = self;
        for segment in parents {
            let key = segment.as_key()?;
            if create_missing && !level.entries.contains_key(key) {
                level.entries.insert(key.to_string(), Entry::Map(NestedMap::new()));
            }
            level = match level.entries.get_mut(key)? {
                Entry::Map(map) => map,
                Entry::Value(_) => return None,
            };
        }
        let key = last.as_key()?;
        if create_missing {
            Some(
                level
                    .entries
                    .entry(key.to_string())
                    .or_insert_with(|| Entry::Map(NestedMap::new())),
            )
        } else {
            level.entries.get_mut(key)
        }
    }

    /// Leaf value at `path`.
    pub fn value_at(&self, path: &FieldPath) -> Option<&T> {
        self.read(path).and_then(Entry::as_value)
    }

    /// Sub-map at `path`; the root path is the map itself.
    pub fn map_at(&self, path: &FieldPath) -> Option<&NestedMap<T>> {
        if path.is_empty() {
            return Some(self);
        }
        self.read(path).and_then(Entry::as_map)
    }

    /// Keys of the sub-map at `path`, in key order. Empty when the path is
    /// absent or holds a leaf.
    pub fn keys_at(&self, path: &FieldPath) -> Vec<String> {
        self.map_at(path)
            .map(|map| map.entries.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Store `entry` at `path`, creating levels as needed and overwriting
    /// whatever was there. Writing to the root path is a no-op.
    pub fn write(&mut self, path: &FieldPath, entry: Entry<T>) {
        let Some((last, parents)) = path.segments().split_last() else {
            return;
        };
        let mut level = self;
        for segment in parents {
            let key = level.resolve_key(segment);
            level = level
                .entries
                .entry(key)
                .or_insert_with(|| Entry::Map(NestedMap::new()))
                .make_map();
        }
        let key = level.resolve_key(last);
        level.entries.insert(key, entry);
    }

    /// Store a leaf value at `path`.
    pub fn write_value(&mut self, path: &FieldPath, value: T) {
        self.write(path, Entry::Value(value));
    }

    /// Number of leaves in the whole tree.
    pub fn leaf_count(&self) -> usize {
        self.entries
            .values()
            .map(|entry| match entry {
                Entry::Value(_) => 1,
                Entry::Map(map) => map.leaf_count(),
            })
            .sum()
    }

    /// Literal key for a segment; the wildcard takes the next integer key.
    fn resolve_key(&self, segment: &Segment) -> String {
        match segment {
            Segment::Key(k) => k.clone(),
            Segment::Wildcard => self
                .entries
                .keys()
                .filter_map(|k| k.parse::<usize>().ok())
                .max()
                .map_or(0, |n| n + 1)
                .to_string(),
        }
    }
}

impl ErrorMap {
    /// Append `indicator` to the list at `path`.
    ///
    /// Creates the list when the path is absent. Errors already recorded
    /// are never dropped: when a path that holds a list needs to become a
    /// level (or a list is appended where a level is), the field's own
    /// errors live under [`OWN_ERRORS_KEY`] of that level.
    pub fn append_error(&mut self, path: &FieldPath, indicator: ErrorIndicator) {
        let Some((last, parents)) = path.segments().split_last() else {
            return;
        };
        let mut level = self;
        for segment in parents {
            let key = level.resolve_key(segment);
            level = level
                .entries
                .entry(key)
                .or_insert_with(|| Entry::Map(NestedMap::new()))
                .make_error_level();
        }
        let key = level.resolve_key(last);
        level
            .entries
            .entry(key)
            .or_insert_with(|| Entry::Value(Vec::new()))
            .error_list()
            .push(indicator);
    }

    /// Errors recorded for the field at `path` itself.
    pub fn errors_at(&self, path: &FieldPath) -> &[ErrorIndicator] {
        match self.read(path) {
            Some(Entry::Value(list)) => list.as_slice(),
            Some(Entry::Map(level)) => level
                .get(OWN_ERRORS_KEY)
                .and_then(Entry::as_value)
                .map(Vec::as_slice)
                .unwrap_or(&[]),
            None => &[],
        }
    }

    /// Total number of indicators in the tree. Empty lists and empty
    /// levels count for nothing.
    pub fn error_count(&self) -> usize {
        self.flatten().iter().map(|(_, list)| list.len()).sum()
    }

    /// Every error in the tree as `(path, indicators)` pairs, depth first.
    pub fn flatten(&self) -> Vec<(FieldPath, &[ErrorIndicator])> {
        let mut out = Vec::new();
        self.collect_into(&FieldPath::root(), &mut out);
        out
    }

    fn collect_into<'a>(&'a self, base: &FieldPath, out: &mut Vec<(FieldPath, &'a [ErrorIndicator])>) {
        for (key, entry) in &self.entries {
            match entry {
                Entry::Value(list) if key == OWN_ERRORS_KEY => out.push((base.clone(), list.as_slice())),
                Entry::Value(list) => out.push((base.child(Segment::Key(key.clone())), list.as_slice())),
                Entry::Map(map) => map.collect_into(&base.child(Segment::Key(key.clone())), out),
            }
        }
    }
}
