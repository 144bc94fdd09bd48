//! Sentinel keys understood by the query compiler
//!
//! These strings are part of the wire format and must match the compiler
//! byte for byte.

/// Key of an expression token: `{ "__RONIN_EXPRESSION": "<text>" }`.
pub const EXPRESSION: &str = "__RONIN_EXPRESSION";

/// Prefix of a field reference inside expression text.
pub const FIELD: &str = "__RONIN_FIELD_";

/// Key of a sub-query token: `{ "__RONIN_QUERY": <tree> }`.
pub const QUERY: &str = "__RONIN_QUERY";

/// Render the expression text of a field reference.
pub fn field_text(name: &str) -> String {
    format!("{FIELD}{name}")
}

/// Recover the field name from expression text produced by [`field_text`].
///
/// Returns `None` when the text is anything other than a bare field reference.
pub fn parse_field_text(text: &str) -> Option<&str> {
    let name = text.strip_prefix(FIELD)?;
    let bare = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '.');
    bare.then_some(name)
}
