//! # Field Path Properties
//!
//! Property tests for bracket-path parsing and path-addressed storage:
//! serialization round-trips, and a value written at a path reads back
//! from the same path.

use formwalk_core::{FieldPath, FormData, FormInput, Segment};
use proptest::prelude::*;

fn segment() -> impl Strategy<Value = Segment> {
    prop_oneof![
        4 => "[a-zA-Z0-9_.-]{1,8}".prop_map(Segment::Key),
        1 => Just(Segment::Wildcard),
    ]
}

fn literal_path() -> impl Strategy<Value = FieldPath> {
    prop::collection::vec("[a-z0-9_]{1,6}", 1..5)
        .prop_map(|keys| FieldPath::from_segments(keys.into_iter().map(Segment::Key)))
}

proptest! {
    /// parse(serialize(p)) == p for any path of non-empty, bracket-free keys.
    #[test]
    fn path_round_trips(segments in prop::collection::vec(segment(), 0..6)) {
        let path = FieldPath::from_segments(segments);
        let text = path.to_string();
        prop_assert_eq!(FieldPath::parse(&text), path);
    }

    /// Serialization is a fixed point after one parse.
    #[test]
    fn serialize_is_stable(text in "[a-z\\[\\]]{0,16}") {
        let once = FieldPath::parse(&text).to_string();
        let twice = FieldPath::parse(&once).to_string();
        prop_assert_eq!(once, twice);
    }

    /// A value written at a literal path is read back unchanged.
    #[test]
    fn write_then_read(path in literal_path(), value in "[ -~]{0,12}") {
        let mut map = FormData::new();
        map.write_value(&path, value.clone());
        prop_assert_eq!(map.value_at(&path), Some(&value));
    }

    /// Later writes win, and earlier siblings survive.
    #[test]
    fn sibling_writes_are_independent(a in "[a-z]{1,4}", b in "[A-Z]{1,4}") {
        let mut map = FormData::new();
        let left = FieldPath::parse("root").child(a.as_str());
        let right = FieldPath::parse("root").child(b.as_str());
        map.write_value(&left, "left".to_string());
        map.write_value(&right, "right".to_string());
        prop_assert_eq!(map.value_at(&left).map(String::as_str), Some("left"));
        prop_assert_eq!(map.value_at(&right).map(String::as_str), Some("right"));
    }

    /// Pushing n values through `name[]` yields keys 0..n.
    #[test]
    fn wildcard_pairs_are_dense(values in prop::collection::vec("[a-z]{0,4}", 0..10)) {
        let input = FormInput::from_pairs(values.iter().map(|v| ("list[]", v.as_str())));
        let keys = input.keys_at(&FieldPath::parse("list"));
        let expected: Vec<String> = (0..values.len()).map(|i| i.to_string()).collect();
        let mut sorted = keys.clone();
        sorted.sort_by_key(|k| k.parse::<usize>().unwrap_or(usize::MAX));
        prop_assert_eq!(sorted, expected);
        for (i, v) in values.iter().enumerate() {
            let path = FieldPath::parse("list").child(i.to_string());
            prop_assert_eq!(input.text_at(&path), Some(v.as_str()));
        }
    }
}
