//! SQL function helpers
//!
//! Each helper returns an Expression token. Text arguments are single-quoted
//! as literals, while expression and field operands are inlined.

use crate::expressions::operators::Operator;
use wire_value::{symbols::field_text, Token, Value};

/// Wrap raw text as an Expression token
pub fn expression(text: impl Into<String>) -> Value {
    Value::expression(text)
}

/// Raw SQL fragment, inserted as is
pub fn sql(text: impl Into<String>) -> Value {
    expression(text)
}

/// Binary operation `(left operator right)`
pub fn op(left: impl Into<Value>, operator: Operator, right: impl Into<Value>) -> Value {
    let left = operand(&left.into());
    let right = operand(&right.into());
    expression(format!("({left} {operator} {right})"))
}

pub fn random() -> Value {
    expression("random()")
}

pub fn abs(value: impl Into<Value>) -> Value {
    expression(format!("abs({})", operand(&value.into())))
}

/// `strftime` over a timestamp literal such as `now`
pub fn strftime(format: &str, timestamp: &str) -> Value {
    expression(format!("strftime('{format}', '{timestamp}')"))
}

pub fn json_patch(patch: &str, input: &str) -> Value {
    expression(format!("json_patch('{patch}', '{input}')"))
}

pub fn json_set(json: &str, path: &str, value: &str) -> Value {
    expression(format!("json_set('{json}', '{path}', '{value}')"))
}

pub fn json_replace(json: &str, path: &str, value: &str) -> Value {
    expression(format!("json_replace('{json}', '{path}', '{value}')"))
}

pub fn json_insert(json: &str, path: &str, value: &str) -> Value {
    expression(format!("json_insert('{json}', '{path}', '{value}')"))
}

/// Concatenate operands with the SQL `concat` function
pub fn concat<I, V>(parts: I) -> Value
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    let parts: Vec<String> = parts
        .into_iter()
        .map(|part| operand(&part.into()))
        .collect();
    expression(format!("concat({})", parts.join(", ")))
}

/// Render a value as an operand inside expression text
pub(crate) fn operand(value: &Value) -> String {
    match value {
        Value::Token(Token::Expression(text)) => text.clone(),
        Value::Token(Token::Field(name)) => field_text(name),
        Value::String(text) => format!("'{text}'"),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Undefined => "NULL".to_string(),
        other => format!("'{}'", other.to_json()),
    }
}
