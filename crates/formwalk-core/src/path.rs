//! # Field Paths — Bracket Notation Addressing
//!
//! A [`FieldPath`] is the parsed form of a form-control name such as
//! `user[address][city]`. The first segment is bare; every later segment
//! is wrapped in brackets. An empty bracket pair, `[]`, is the wildcard
//! segment: in a schema it means "every key actually submitted at this
//! position", and when writing it means "the next free integer key".
//!
//! ## Parsing
//!
//! Parsing never fails. The name is split on `[`, a trailing `]` is
//! stripped from every non-first piece, and an empty first piece is
//! dropped, so `"[name]"` and `"name"` address the same field.
//!
//! ## Round-Trip
//!
//! `FieldPath::parse(&path.to_string()) == path` holds for every path
//! whose key segments are non-empty and contain no `[` or `]`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Literal spelling of the wildcard segment.
pub const WILDCARD: &str = "[]";

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    /// A literal map key.
    Key(String),
    /// `[]`: every submitted key at this position.
    Wildcard,
}

impl Segment {
    /// Build a segment from a key. The empty key and `"[]"` are the wildcard.
    pub fn key(key: impl Into<String>) -> Self {
        let key = key.into();
        if key.is_empty() || key == WILDCARD {
            Segment::Wildcard
        } else {
            Segment::Key(key)
        }
    }

    /// The literal key, or `None` for the wildcard.
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Segment::Key(k) => Some(k),
            Segment::Wildcard => None,
        }
    }

    /// Whether this is the wildcard segment.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Segment::Wildcard)
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Segment::key(key)
    }
}

impl From<String> for Segment {
    fn from(key: String) -> Self {
        Segment::key(key)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(k) => f.write_str(k),
            Segment::Wildcard => f.write_str(WILDCARD),
        }
    }
}

/// A parsed bracket-notation field address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// The empty path, addressing the root of a map.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from already-split segments.
    pub fn from_segments(segments: impl IntoIterator<Item = Segment>) -> Self {
        Self {
            segments: segments.into_iter().collect(),
        }
    }

    /// Parse a bracket-notation name.
    pub fn parse(path: &str) -> Self {
        let mut pieces = path.split('[');
        let mut segments = Vec::new();

        if let Some(first) = pieces.next() {
            if !first.is_empty() {
                segments.push(Segment::Key(first.to_string()));
            }
        }

        for piece in pieces {
            let piece = piece.strip_suffix(']').unwrap_or(piece);
            segments.push(Segment::key(piece));
        }

        Self { segments }
    }

    /// The segments in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The top-level segment, if any.
    pub fn first(&self) -> Option<&Segment> {
        self.segments.first()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True for the root path.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether any segment is the wildcard.
    pub fn has_wildcard(&self) -> bool {
        self.segments.iter().any(Segment::is_wildcard)
    }

    /// A new path with `segment` appended.
    pub fn child(&self, segment: impl Into<Segment>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Append `segment` in place.
    pub fn push(&mut self, segment: impl Into<Segment>) {
        self.segments.push(segment.into());
    }

    /// A new path with all of `other`'s segments appended.
    pub fn join(&self, other: &FieldPath) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self { segments }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match (i, segment) {
                (0, Segment::Key(k)) => f.write_str(k)?,
                (_, Segment::Key(k)) => write!(f, "[{k}]")?,
                (_, Segment::Wildcard) => f.write_str(WILDCARD)?,
            }
        }
        Ok(())
    }
}

impl FromStr for FieldPath {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for FieldPath {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<&FieldPath> for FieldPath {
    fn from(path: &FieldPath) -> Self {
        path.clone()
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(path: &FieldPath) -> Vec<String> {
        path.segments().iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_bare_name() {
        let path = FieldPath::parse("email");
        assert_eq!(keys(&path), vec!["email"]);
    }

    #[test]
    fn parses_nested_name() {
        let path = FieldPath::parse("user[address][city]");
        assert_eq!(keys(&path), vec!["user", "address", "city"]);
    }

    #[test]
    fn leading_bracket_is_same_field() {
        assert_eq!(FieldPath::parse("[name]"), FieldPath::parse("name"));
    }

    #[test]
    fn empty_brackets_are_wildcard() {
        let path = FieldPath::parse("items[][name]");
        assert_eq!(
            path.segments(),
            &[
                Segment::Key("items".into()),
                Segment::Wildcard,
                Segment::Key("name".into()),
            ]
        );
        assert!(path.has_wildcard());
    }

    #[test]
    fn empty_string_is_root() {
        assert!(FieldPath::parse("").is_empty());
        assert_eq!(FieldPath::root().to_string(), "");
    }

    #[test]
    fn serializes_first_segment_bare() {
        let path = FieldPath::root().child("user").child("name");
        assert_eq!(path.to_string(), "user[name]");
        let list = FieldPath::root().child("items").child(Segment::Wildcard);
        assert_eq!(list.to_string(), "items[]");
    }

    #[test]
    fn lone_wildcard_round_trips() {
        let path = FieldPath::from_segments([Segment::Wildcard, Segment::key("a")]);
        assert_eq!(path.to_string(), "[][a]");
        assert_eq!(FieldPath::parse(&path.to_string()), path);
    }

    #[test]
    fn join_concatenates() {
        let base = FieldPath::parse("user");
        let rest = FieldPath::parse("address[city]");
        assert_eq!(base.join(&rest).to_string(), "user[address][city]");
    }

    #[test]
    fn serde_uses_bracket_string() {
        let path = FieldPath::parse("a[b][]");
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "\"a[b][]\"");
        let back: FieldPath = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
    }
}
