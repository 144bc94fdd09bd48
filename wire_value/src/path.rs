//! Path codec
//!
//! Dotted paths address nested keys of a tree, e.g. `invoice.companyName`.
//! A backslash in front of a dot (`foo\.bar`) keeps the dot inside the key.

use crate::types::{Map, Value};

/// Split a path into segments on unescaped `.` and `[`
///
/// Empty and whitespace-only segments are dropped, so `foo..bar` yields
/// `["foo", "bar"]` and `foo\.bar.baz` yields `["foo.bar", "baz"]`.
pub fn segments(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'.') => {
                chars.next();
                current.push('.');
            }
            '.' | '[' => segments.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    segments.push(current);

    segments.retain(|segment| !segment.trim().is_empty());
    segments
}

/// Join segments into a path, escaping dots that belong to a segment
///
/// Segments must not end in a backslash. The segments `a\` and `b` join to
/// `a\.b`, which splits back into the single segment `a.b`.
pub fn join<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(|segment| segment.as_ref().replace('.', "\\."))
        .collect::<Vec<_>>()
        .join(".")
}

/// Set the value at `path`, creating intermediate objects as needed
pub fn set_property(target: &mut Map, path: &str, value: Value) {
    set_property_segments(target, &segments(path), value);
}

/// Set the value at the given segments
///
/// An intermediate that is missing or is not an object is replaced by a
/// fresh object. An empty segment list leaves the target untouched.
pub fn set_property_segments<S: AsRef<str>>(target: &mut Map, segments: &[S], value: Value) {
    let Some((last, parents)) = segments.split_last() else {
        return;
    };

    let mut current = target;
    for segment in parents {
        let slot = current
            .entry(segment.as_ref().to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !matches!(slot, Value::Object(_)) {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(map) = slot else {
            return;
        };
        current = map;
    }

    current.insert(last.as_ref().to_string(), value);
}

/// Read the value at `path`
pub fn get_property<'a>(target: &'a Map, path: &str) -> Option<&'a Value> {
    let segments = segments(path);
    let (last, parents) = segments.split_last()?;

    let mut current = target;
    for segment in parents {
        current = current.get(segment)?.as_object()?;
    }
    current.get(last)
}
