use crate::{
    get_property, join, mutate, payload_passthrough, segments, serialize, set_property, Map,
    Payload, Token, Value,
};
use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use serde_json::json;

// ========================================
// Path codec
// ========================================

#[test]
fn segments_split_on_dots_and_brackets() {
    assert_eq!(segments("account.with.handle"), vec!["account", "with", "handle"]);
    assert_eq!(segments("items[0"), vec!["items", "0"]);
}

#[test]
fn segments_honor_escaped_dots() {
    assert_eq!(segments("foo\\.bar.baz"), vec!["foo.bar", "baz"]);
}

#[test]
fn segments_drop_empty_parts() {
    assert_eq!(segments("foo..bar"), vec!["foo", "bar"]);
    assert_eq!(segments("."), Vec::<String>::new());
    assert_eq!(segments(""), Vec::<String>::new());
    assert_eq!(segments("foo. .bar"), vec!["foo", "bar"]);
}

#[test]
fn join_escapes_dots_inside_segments() {
    assert_eq!(join(&["foo.bar", "baz"]), "foo\\.bar.baz");
}

#[test]
fn trailing_backslash_escapes_the_joining_dot() {
    let joined = join(&["a\\", "b"]);

    assert_eq!(joined, "a\\.b");
    assert_eq!(segments(&joined), vec!["a.b"]);
}

proptest! {
    #[test]
    fn segments_survive_join(path in "[a-zA-Z0-9_]{1,8}(\\.[a-zA-Z0-9_]{1,8}){0,5}") {
        let split = segments(&path);
        prop_assert_eq!(segments(&join(&split)), split);
    }

    #[test]
    fn escaped_segments_survive_join(parts in proptest::collection::vec("[a-z.]{0,6}[a-z]", 1..5)) {
        prop_assert_eq!(segments(&join(&parts)), parts);
    }
}

#[test]
fn set_property_creates_nested_objects() {
    let mut tree = Map::new();
    set_property(&mut tree, "get.account.with.handle", Value::from("juri"));

    assert_eq!(
        Value::Object(tree).to_json(),
        json!({ "get": { "account": { "with": { "handle": "juri" } } } })
    );
}

#[test]
fn set_property_replaces_non_object_intermediates() {
    let mut tree = Map::new();
    set_property(&mut tree, "alter.model", Value::from("users"));
    set_property(&mut tree, "alter.model.slug", Value::from("accounts"));

    assert_eq!(
        Value::Object(tree).to_json(),
        json!({ "alter": { "model": { "slug": "accounts" } } })
    );
}

#[test]
fn get_property_reads_nested_values() {
    let mut tree = Map::new();
    set_property(&mut tree, "a.b\\.c", Value::from(1));

    assert_eq!(get_property(&tree, "a.b\\.c"), Some(&Value::from(1)));
    assert_eq!(get_property(&tree, "a.b.c"), None);
    assert_eq!(get_property(&tree, "a.b\\.c.d"), None);
}

// ========================================
// Structure mutator
// ========================================

#[test]
fn mutate_removes_undefined_entries() {
    let value = Value::object([("after", Value::Undefined), ("limit", Value::from(10))]);
    let result = mutate(value, &|leaf| leaf);

    assert_eq!(result.to_json(), json!({ "limit": 10 }));
}

#[test]
fn mutate_turns_undefined_array_items_into_null() {
    let value = Value::Array(vec![Value::from(1), Value::Undefined]);
    let result = mutate(value, &|leaf| leaf);

    assert_eq!(result, Value::Array(vec![Value::from(1), Value::Null]));
}

#[test]
fn mutate_leaves_tokens_alone() {
    let tree = Map::from([("get".to_string(), Value::object([("accounts", Value::Null)]))]);
    let value = Value::object([
        ("name", Value::expression("UPPER('x')")),
        ("source", Value::query(tree.clone())),
    ]);

    let result = mutate(value, &|_| Value::from("replaced"));

    let map = result.as_object().cloned().unwrap_or_default();
    assert_eq!(map["name"], Value::Token(Token::Expression("UPPER('x')".into())));
    assert_eq!(map["source"], Value::Token(Token::Query(tree)));
}

#[test]
fn serialize_collapses_dates_to_iso_strings() {
    let date = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).single();
    let value = Value::object([("to", Value::object([("activeAt", Value::from(date))]))]);

    let result = serialize(value, None);

    assert_eq!(
        result.to_json(),
        json!({ "to": { "activeAt": "2024-03-01T12:30:00.000Z" } })
    );
    assert!(matches!(
        result.as_object().and_then(|m| m["to"].as_object()).map(|m| &m["activeAt"]),
        Some(Value::String(_))
    ));
}

#[test]
fn serialize_round_trips_payloads_without_replacer() {
    let file = Payload::file("avatar.png", vec![1u8, 2, 3]).with_media_type("image/png");
    let result = serialize(Value::object([("avatar", file)]), None);

    assert_eq!(
        result.to_json(),
        json!({ "avatar": { "kind": "file", "name": "avatar.png", "type": "image/png", "size": 3 } })
    );
    assert!(result.as_object().map(|m| m["avatar"].as_payload().is_none()).unwrap_or(false));
}

#[test]
fn serialize_keeps_payloads_with_replacer() {
    let file = Payload::file("avatar.png", b"test".to_vec());
    let replacer = payload_passthrough();

    let result = serialize(Value::object([("avatar", file.clone())]), Some(&replacer));

    let kept = result.as_object().and_then(|m| m["avatar"].as_payload()).cloned();
    assert!(kept.is_some_and(|kept| kept.ptr_eq(&file)));
}

// ========================================
// Wire format
// ========================================

#[test]
fn field_tokens_render_as_prefixed_expressions() {
    assert_eq!(
        Value::field("name").to_json(),
        json!({ "__RONIN_EXPRESSION": "__RONIN_FIELD_name" })
    );
}

#[test]
fn wire_json_parses_back_into_tokens() {
    let wire = json!({
        "check": { "__RONIN_EXPRESSION": "(__RONIN_FIELD_name = 'World')" },
        "id": { "__RONIN_EXPRESSION": "__RONIN_FIELD_account" },
        "source": { "__RONIN_QUERY": { "get": { "oldAccounts": {} } } },
        "plain": { "__RONIN_QUERY": 1, "other": true }
    });

    let value = Value::from(wire.clone());
    let map = value.as_object().cloned().unwrap_or_default();

    assert!(matches!(map["check"], Value::Token(Token::Expression(_))));
    assert_eq!(map["id"], Value::field("account"));
    assert!(matches!(map["source"], Value::Token(Token::Query(_))));
    assert!(matches!(map["plain"], Value::Object(_)));
    assert_eq!(value.to_json(), wire);
}

#[test]
fn serde_output_matches_to_json() {
    let value = Value::object([
        ("skip", Value::Undefined),
        ("list", Value::Array(vec![Value::Undefined, Value::from(2.5)])),
        ("token", Value::field("handle")),
    ]);

    let via_serde = serde_json::to_value(&value).ok();
    assert_eq!(via_serde, Some(value.to_json()));
}

#[test]
fn non_finite_floats_become_null() {
    assert_eq!(Value::from(f64::NAN), Value::Null);
}
