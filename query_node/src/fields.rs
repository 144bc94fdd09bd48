//! Field references
//!
//! Inside a function argument, fields of the targeted record are addressed
//! through [`FieldProxy`]. A field can be used as a token value or spliced
//! into text, in which case the surrounding text becomes a SQL
//! concatenation once the function returns.

use wire_value::{symbols::field_text, Map, Token, Value, FIELD};

/// Marker wrapped around field references spliced into text
pub const SEPARATOR: &str = "//.//";

/// Handle passed to function arguments for addressing fields
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldProxy;

impl FieldProxy {
    /// Reference the field `name` as a token
    pub fn field(&self, name: &str) -> Value {
        Value::field(name)
    }

    /// Reference the field `name` for use inside `format!` and friends
    ///
    /// `format!("Hello {}", f.text("name"))` is rewritten into
    /// `'Hello ' || __RONIN_FIELD_name` when the enclosing function returns.
    pub fn text(&self, name: &str) -> String {
        format!("{SEPARATOR}{}{SEPARATOR}", field_text(name))
    }
}

/// Whether `text` carries a spliced field reference
pub fn is_interpolated(text: &str) -> bool {
    text.contains(SEPARATOR)
}

/// Rewrite interpolated text into a concatenation expression
///
/// Field parts are kept verbatim and literal parts are single-quoted.
pub fn wrap_expression(text: &str) -> Value {
    let parts: Vec<String> = text
        .split(SEPARATOR)
        .filter(|part| !part.is_empty())
        .map(|part| {
            if part.starts_with(FIELD) {
                part.to_string()
            } else {
                format!("'{part}'")
            }
        })
        .collect();

    Value::expression(parts.join(" || "))
}

/// Rewrite every interpolated string below `value`
///
/// Embedded sub-queries are walked as well.
pub fn wrap_expressions(value: Value) -> Value {
    match value {
        Value::String(text) if is_interpolated(&text) => wrap_expression(&text),
        Value::Object(map) => Value::Object(wrap_members(map)),
        Value::Token(Token::Query(tree)) => Value::query(wrap_members(tree)),
        Value::Array(items) => Value::Array(items.into_iter().map(wrap_expressions).collect()),
        other => other,
    }
}

fn wrap_members(map: Map) -> Map {
    map.into_iter()
        .map(|(key, value)| (key, wrap_expressions(value)))
        .collect()
}
