//! Integration tests for the query facade
//!
//! Builds queries through `Syntax` roots and checks the trees handed to the
//! terminal callback or collected by batches.

use ronin_syntax::prelude::*;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

type Seen = Rc<RefCell<Vec<(serde_json::Value, Option<QueryOptions>)>>>;

/// Facade whose callback records every query and returns its JSON
fn recording_syntax() -> (Syntax<serde_json::Value>, Seen) {
    let seen: Seen = Rc::default();
    let sink = Rc::clone(&seen);
    let syntax = Syntax::new(move |tree, options| {
        let query = Value::Object(tree).to_json();
        sink.borrow_mut().push((query.clone(), options));
        query
    });
    (syntax, seen)
}

#[test]
fn get_query_reaches_the_callback() -> anyhow::Result<()> {
    let (syntax, seen) = recording_syntax();

    let result = syntax
        .get()?
        .step("account")
        .step("with")
        .step("handle")
        .call("juri")
        .into_resolved();

    let expected = json!({ "get": { "account": { "with": { "handle": "juri" } } } });
    assert_eq!(result, Some(expected.clone()));
    assert_eq!(*seen.borrow(), vec![(expected, None)]);
    Ok(())
}

#[test]
fn every_verb_has_a_root() -> anyhow::Result<()> {
    let (syntax, _) = recording_syntax();

    assert_eq!(syntax.verbs(), Verb::ALL.to_vec());
    for verb in Verb::ALL {
        let result = syntax.root(verb)?.step("accounts").invoke().into_resolved();

        let mut expected = serde_json::Map::new();
        expected.insert(verb.as_str().to_string(), json!({ "accounts": {} }));
        assert_eq!(result, Some(serde_json::Value::Object(expected)));
    }
    Ok(())
}

#[test]
fn root_call_merges_under_the_verb() -> anyhow::Result<()> {
    let (syntax, _) = recording_syntax();

    let result = syntax
        .get()?
        .call(Value::object([("account", Value::Null)]))
        .into_resolved();

    assert_eq!(result, Some(json!({ "get": { "account": null } })));
    Ok(())
}

#[test]
fn set_query_serializes_dates() -> anyhow::Result<()> {
    let (syntax, _) = recording_syntax();
    let active_at = chrono::TimeZone::with_ymd_and_hms(&Utc, 2024, 5, 17, 9, 15, 42).single();

    let result = syntax
        .set()?
        .step("account")
        .call(Value::object([
            ("with", Value::object([("handle", "elaine")])),
            ("to", Value::object([("activeAt", active_at)])),
        ]))
        .into_resolved();

    assert_eq!(
        result,
        Some(json!({ "set": { "account": {
            "with": { "handle": "elaine" },
            "to": { "activeAt": "2024-05-17T09:15:42.000Z" }
        } } }))
    );
    Ok(())
}

#[test]
fn payloads_are_kept_by_default() -> anyhow::Result<()> {
    let file = Payload::file("avatar.png", b"png".to_vec()).with_media_type("image/png");
    let kept: Rc<RefCell<Option<Payload>>> = Rc::default();
    let sink = Rc::clone(&kept);
    let syntax = Syntax::new(move |tree, _| {
        let avatar = wire_value_at(&tree, "set.account.to.avatar");
        *sink.borrow_mut() = avatar.and_then(|value| value.as_payload().cloned());
    });

    syntax
        .set()?
        .step("account")
        .step("to")
        .call(Value::object([("avatar", file.clone())]));

    assert!(kept.borrow().as_ref().is_some_and(|kept| kept.ptr_eq(&file)));
    Ok(())
}

#[test]
fn payloads_collapse_to_metadata_when_configured() -> anyhow::Result<()> {
    let mut config = AppConfig::default();
    config.query.passthrough_payloads = false;
    let syntax = Syntax::with_config(|tree, _| Value::Object(tree).to_json(), config)?;

    let file = Payload::file("avatar.png", b"png".to_vec());
    let result = syntax
        .add()?
        .step("account")
        .step("with")
        .call(Value::object([("avatar", file)]))
        .into_resolved();

    assert_eq!(
        result,
        Some(json!({ "add": { "account": { "with": {
            "avatar": { "kind": "file", "name": "avatar.png", "size": 3 }
        } } } }))
    );
    Ok(())
}

#[test]
fn sub_query_is_embedded_without_running() -> anyhow::Result<()> {
    let (syntax, seen) = recording_syntax();
    let get = syntax.get()?;

    let result = syntax
        .add()?
        .step("accounts")
        .step("to")
        .call_with(|_| get.step("oldAccounts").invoke())
        .into_resolved();

    assert_eq!(
        result,
        Some(json!({ "add": { "accounts": { "to": {
            "__RONIN_QUERY": { "get": { "oldAccounts": {} } }
        } } } }))
    );
    assert_eq!(seen.borrow().len(), 1);
    Ok(())
}

#[test]
fn multiple_sub_queries_in_one_object() -> anyhow::Result<()> {
    let (syntax, _) = recording_syntax();
    let get = syntax.get()?;

    let result = syntax
        .add()?
        .step("accounts")
        .step("to")
        .call_with(|_| {
            Value::object([
                ("primary", Value::from(get.step("primaryAccount").invoke())),
                (
                    "backup",
                    Value::from(
                        get.step("backupAccount")
                            .step("with")
                            .call(Value::object([("status", "active")])),
                    ),
                ),
            ])
        })
        .into_resolved();

    assert_eq!(
        result,
        Some(json!({ "add": { "accounts": { "to": {
            "primary": { "__RONIN_QUERY": { "get": { "primaryAccount": {} } } },
            "backup": { "__RONIN_QUERY": { "get": { "backupAccount": { "with": { "status": "active" } } } } }
        } } } }))
    );
    Ok(())
}

#[test]
fn field_named_name_resolves_to_a_reference() -> anyhow::Result<()> {
    let (syntax, _) = recording_syntax();

    let result = syntax
        .get()?
        .step("accounts")
        .step("with")
        .call_with(|f| Value::object([("handle", f.field("name"))]))
        .into_resolved();

    assert_eq!(
        result,
        Some(json!({ "get": { "accounts": { "with": {
            "handle": { "__RONIN_EXPRESSION": "__RONIN_FIELD_name" }
        } } } }))
    );
    Ok(())
}

#[test]
fn interpolated_fields_build_concatenations() -> anyhow::Result<()> {
    let (syntax, _) = recording_syntax();

    let result = syntax
        .set()?
        .step("accounts")
        .step("to")
        .call_with(|f| Value::object([("greeting", format!("Hello {}", f.text("name")))]))
        .into_resolved();

    assert_eq!(
        result,
        Some(json!({ "set": { "accounts": { "to": {
            "greeting": { "__RONIN_EXPRESSION": "'Hello ' || __RONIN_FIELD_name" }
        } } } }))
    );
    Ok(())
}

#[test]
fn failing_function_argument_propagates() -> anyhow::Result<()> {
    let (syntax, seen) = recording_syntax();

    let result = syntax
        .get()?
        .step("accounts")
        .try_call_with(|_| -> Result<Value, String> { Err("no session".into()) });

    assert_eq!(result.err(), Some("no session".to_string()));
    assert!(!syntax.is_batching());
    assert!(seen.borrow().is_empty());
    Ok(())
}

// ========================================
// Batches
// ========================================

#[test]
fn batch_collects_without_executing() -> anyhow::Result<()> {
    let (syntax, seen) = recording_syntax();
    let (get, count) = (syntax.get()?, syntax.count()?);

    let items = syntax.batch(|| {
        vec![
            get.step("accounts").invoke(),
            count.step("teams").invoke(),
        ]
    });

    assert!(seen.borrow().is_empty());
    assert_eq!(
        items.iter().map(BatchItem::to_json).collect::<Vec<_>>(),
        vec![
            json!({ "structure": { "get": { "accounts": {} } } }),
            json!({ "structure": { "count": { "teams": {} } } }),
        ]
    );
    Ok(())
}

#[test]
fn batch_chains_modifiers_of_one_query() -> anyhow::Result<()> {
    let (syntax, _) = recording_syntax();
    let get = syntax.get()?;

    let items = syntax.try_batch(|| -> Result<_, QueryError> {
        let members = get
            .step("members")
            .step("with")
            .call(Value::object([("team", "red")]))
            .step("selecting")?
            .call(Value::Array(vec!["name".into()]))
            .step("orderedBy")?
            .step("ascending")
            .call(Value::Array(vec!["joinedAt".into()]));
        Ok(vec![members])
    })?;

    assert_eq!(
        items[0].to_json(),
        json!({ "structure": { "get": { "members": {
            "with": { "team": "red" },
            "selecting": ["name"],
            "orderedBy": { "ascending": ["joinedAt"] }
        } } } })
    );
    Ok(())
}

#[test]
fn batch_forwards_options() -> anyhow::Result<()> {
    let (syntax, _) = recording_syntax();
    let get = syntax.get()?;
    let mut options = QueryOptions::new();
    options.insert("randomOption".into(), json!(true));

    let items = syntax.batch(|| vec![get.step("account").call_with_options((), options.clone())]);

    let item = items.into_iter().find_map(BatchItem::into_query);
    assert_eq!(item.as_ref().and_then(|item| item.options.clone()), Some(options));
    assert_eq!(
        item.map(|item| item.to_json()),
        Some(json!({ "get": { "account": {} } }))
    );
    Ok(())
}

#[test]
fn batch_keeps_placeholders() -> anyhow::Result<()> {
    let (syntax, _) = recording_syntax();
    let get = syntax.get()?;

    let items = syntax.batch(|| {
        vec![
            Some(get.step("accounts").invoke()),
            None,
            Some(get.step("teams").invoke()),
        ]
    });

    assert_eq!(items.len(), 3);
    assert_eq!(items[1], BatchItem::Passthrough(Value::Null));
    Ok(())
}

#[test]
fn batch_with_hands_queries_to_runner() -> anyhow::Result<()> {
    let (syntax, seen) = recording_syntax();
    let get = syntax.get()?;

    let results = syntax.batch_with(
        || vec![get.step("accounts").invoke(), get.step("teams").invoke()],
        |items| {
            items
                .into_iter()
                .filter_map(BatchItem::into_query)
                .map(|item| item.to_json())
                .collect::<Vec<_>>()
        },
    );

    assert!(seen.borrow().is_empty());
    assert_eq!(
        results,
        vec![json!({ "get": { "accounts": {} } }), json!({ "get": { "teams": {} } })]
    );
    Ok(())
}

#[test]
fn failing_batch_restores_flag() {
    let (syntax, _) = recording_syntax();

    let result = syntax.try_batch(|| -> Result<Vec<Value>, String> { Err("x".into()) });

    assert_eq!(result, Err("x".to_string()));
    assert!(!syntax.is_batching());
}

// ========================================
// Configuration
// ========================================

#[test]
fn configured_roots_only() -> anyhow::Result<()> {
    let config = AppConfig::from_toml_str(
        r#"
        [query]
        root_verbs = ["get", "count"]

        [query.default_value]
        limitedTo = 10
        "#,
    )?;
    let syntax = Syntax::with_config(|tree, _| Value::Object(tree).to_json(), config)?;

    assert_eq!(syntax.verbs(), vec![Verb::Get, Verb::Count]);
    assert!(matches!(syntax.add(), Err(RoninError::RootNotConfigured(Verb::Add))));
    assert_eq!(
        syntax.get()?.step("accounts").invoke().into_resolved(),
        Some(json!({ "get": { "accounts": { "limitedTo": 10 } } }))
    );
    Ok(())
}

#[test]
fn unknown_configured_verb_is_rejected() {
    let mut config = AppConfig::default();
    config.query.root_verbs = vec!["fetch".into()];

    let result = Syntax::with_config(|_, _| (), config);
    assert!(matches!(
        result,
        Err(RoninError::Query(QueryError::UnknownVerb(_)))
    ));
}

fn wire_value_at<'a>(tree: &'a Map, path: &str) -> Option<&'a Value> {
    ronin_syntax::wire_value::get_property(tree, path)
}
