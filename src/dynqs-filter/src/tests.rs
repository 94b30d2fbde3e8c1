//! End-to-end tests for query assembly

use super::*;
use crate::hooks::HookResult;
use pretty_assertions::assert_eq;
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;

fn run(query: Query) -> JsonValue {
    QueryParser::default().parse(&query).unwrap().to_json()
}

fn run_with(options: Options, query: Query) -> JsonValue {
    QueryParser::new(options).parse(&query).unwrap().to_json()
}

#[test]
fn test_empty_query() {
    assert_eq!(run(Query::new()), json!({}));
}

#[test]
fn test_bare_values_are_coerced() {
    assert_eq!(run(Query::new().with("age", "5")), json!({"age": 5}));
    assert_eq!(run(Query::new().with("flag", "true")), json!({"flag": true}));
    assert_eq!(run(Query::new().with("flag", "False")), json!({"flag": false}));
    assert_eq!(run(Query::new().with("code", "12abc")), json!({"code": "12abc"}));
}

#[test]
fn test_operator_values() {
    let query = Query::new()
        .with("age", ">=5")
        .with("score", "<1.5")
        .with("name", "^Jo")
        .with("bio", "$rust")
        .with("state", "!closed");

    assert_eq!(
        run(query),
        json!({
            "age": {"ge": 5},
            "score": {"lt": 1.5},
            "name": {"begins_with": "Jo"},
            "bio": {"contains": "rust"},
            "state": {"ne": "closed"}
        })
    );
}

// The two existence checks are inverted relative to each other: an empty
// value asserts `not_null: true`, a bare `!` asserts `not_null: false`.
#[test]
fn test_existence_checks_are_asymmetric() {
    assert_eq!(run(Query::new().with("tag", "")), json!({"tag": {"not_null": true}}));
    assert_eq!(run(Query::new().with("tag", "!")), json!({"tag": {"not_null": false}}));
}

#[test]
fn test_array_values() {
    assert_eq!(
        run(Query::new().with("tags[]", ["a", "b"])),
        json!({"tags": {"in": ["a", "b"]}})
    );
    assert_eq!(
        run(Query::new().with("tags[]", ["!c", "d"])),
        json!({"tags": {"not_contains": ["c"], "in": ["d"]}})
    );
}

#[test]
fn test_array_never_yields_bare_scalar() {
    let filter = QueryParser::default()
        .parse(&Query::new().with("ids", ["7"]))
        .unwrap();
    assert!(filter.get("ids").and_then(FieldFilter::as_condition).is_some());
}

#[test]
fn test_empty_array_or_disabled_in_is_absent() {
    assert_eq!(run(Query::new().with("tags[]", Vec::<String>::new())), json!({}));

    let options = Options::builder().ops(["!", ">"]).build().unwrap();
    assert_eq!(
        run_with(options, Query::new().with("tags[]", ["a"]).with("x", "1")),
        json!({"x": 1})
    );
}

#[test]
fn test_whitelist() {
    let options = Options::builder().whitelist("age").build().unwrap();
    assert_eq!(
        run_with(options, Query::new().with("age", "5").with("other", "x")),
        json!({"age": 5})
    );
}

#[test]
fn test_blacklist_and_alias() {
    let options = Options::builder()
        .blacklist("token")
        .alias("q", "query")
        .alias("ids", "id")
        .build()
        .unwrap();
    let query = Query::new()
        .with("token", "secret")
        .with("q", "^abc")
        .with("ids[]", ["1", "2"]);

    assert_eq!(
        run_with(options, query),
        json!({"query": {"begins_with": "abc"}, "id": {"in": [1, 2]}})
    );
}

#[test]
fn test_bad_key_shapes_are_skipped() {
    let query = Query::new()
        .with("ok", "1")
        .with("bad key", "1")
        .with("a[b]", "1")
        .with("tags[]", "scalar with array key");
    assert_eq!(run(query), json!({"ok": 1}));
}

#[test]
fn test_unsupported_values_are_skipped() {
    let query = Query::from_json(json!({"n": {"a": 1}, "m": [1, [2]], "s": "x"})).unwrap();
    assert_eq!(run(query), json!({"s": "x"}));
}

#[test]
fn test_unrecognised_operator_falls_back_to_equality() {
    let options = Options::builder().ops(["in"]).build().unwrap();
    let query = Query::new().with("a", ">5").with("b", "!x");
    assert_eq!(run_with(options, query), json!({"a": ">5", "b": "!x"}));
}

#[test]
fn test_empty_value_is_existence_check_for_any_ops() {
    let options = Options::builder().ops(["!", ">", "in"]).build().unwrap();
    assert_eq!(
        run_with(options, Query::new().with("tag", "")),
        json!({"tag": {"not_null": true}})
    );

    let options = Options::builder().ops(Vec::<String>::new()).build().unwrap();
    assert_eq!(
        run_with(options, Query::new().with("tag", "").with("x", "!y")),
        json!({"tag": {"not_null": true}, "x": "!y"})
    );
}

#[test]
fn test_coercion_switches() {
    let options = Options::builder()
        .to_boolean(false)
        .to_number(false)
        .build()
        .unwrap();
    let query = Query::new()
        .with("a", "5")
        .with("b", "true")
        .with("c", ">5")
        .with("d[]", ["1"]);
    assert_eq!(
        run_with(options, query),
        json!({"a": "5", "b": "true", "c": {"gt": "5"}, "d": {"in": ["1"]}})
    );
}

#[test]
fn test_after_hook_with_epoch_seconds() {
    let options = Options::builder()
        .custom("createdAt", hooks::date::after("createdAt"))
        .build()
        .unwrap();
    assert_eq!(
        run_with(options, Query::new().with("createdAt", "1609459200")),
        json!({"createdAt": {"ge": "2021-01-01T00:00:00.000Z"}})
    );
}

#[test]
fn test_hook_key_differs_from_field() {
    let config: OptionsConfig = serde_json::from_value(json!({
        "custom": {"after": "createdAt", "before": "createdAt"}
    }))
    .unwrap();
    let query = Query::new()
        .with("after", "2021-01-01")
        .with("before", "2021-02-01");

    // the later hook replaces the earlier entry for the same field
    assert_eq!(
        run_with(config.build().unwrap(), query),
        json!({"createdAt": {"lt": "2021-02-01T00:00:00.000Z"}})
    );
}

#[test]
fn test_between_hook_drops_field_on_any_bad_bound() {
    let options = Options::builder()
        .range_hook("d", RangeKind::Between, "d")
        .build()
        .unwrap();
    let parser = QueryParser::new(options);

    let filter = parser.parse(&Query::new().with("d", "bad|alsoBad")).unwrap();
    assert!(!filter.contains("d"));
    assert!(filter.is_empty());

    let filter = parser
        .parse(&Query::new().with("d", "1609459200|1612137600"))
        .unwrap();
    assert_eq!(
        filter.to_json(),
        json!({"d": {"ge": "2021-01-01T00:00:00.000Z", "lt": "2021-02-01T00:00:00.000Z"}})
    );
}

#[test]
fn test_hooks_run_after_key_rules() {
    let hook: CustomHook = Arc::new(|value: &QueryValue| -> HookResult {
        Ok(Some(Emitted::new("raw", Scalar::string(format!("{value:?}")))))
    });
    let options = Options::builder()
        .custom("weird key", hook.clone())
        .custom("blocked", hook)
        .blacklist("blocked")
        .key_pattern("^never$")
        .build()
        .unwrap();

    let filter = QueryParser::new(options)
        .parse(&Query::new().with("weird key", "v").with("blocked", "v"))
        .unwrap();
    // key rules are applied before hook lookup
    assert!(filter.is_empty());
}

#[test]
fn test_hook_receives_raw_array_and_aliased_key() {
    let hook: CustomHook = Arc::new(|value: &QueryValue| -> HookResult {
        let count = match value {
            QueryValue::Array(items) => items.len(),
            _ => 0,
        };
        Ok(Some(Emitted::new(
            "count",
            Scalar::Number(count as f64),
        )))
    });
    let options = Options::builder()
        .alias("xs", "items")
        .custom("items", hook)
        .build()
        .unwrap();

    assert_eq!(
        run_with(options, Query::new().with("xs[]", [">1", "2", "3"])),
        json!({"count": 3})
    );
}

#[test]
fn test_hook_receives_unsupported_values() {
    let options = Options::builder()
        .range_hook("since", RangeKind::After, "createdAt")
        .build()
        .unwrap();
    let query = Query::from_json(json!({"since": 1609459200})).unwrap();
    assert_eq!(
        run_with(options, query),
        json!({"createdAt": {"ge": "2021-01-01T00:00:00.000Z"}})
    );
}

#[test]
fn test_hook_errors_propagate() {
    let hook: CustomHook =
        Arc::new(|_: &QueryValue| -> HookResult { Err("hook exploded".into()) });
    let options = Options::builder().custom("boom", hook).build().unwrap();

    let err = QueryParser::new(options)
        .parse(&Query::new().with("ok", "1").with("boom", "x"))
        .unwrap_err();
    assert!(matches!(&err, Error::Hook { key, .. } if key == "boom"));
    assert_eq!(err.to_string(), "Custom hook for 'boom' failed: hook exploded");
}

#[test]
fn test_output_follows_input_order() {
    let filter = QueryParser::default()
        .parse_query_string("z=1&a=2&m[]=3")
        .unwrap();
    let keys: Vec<&str> = filter.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn test_json_input_order_decides_hook_precedence() {
    let config: OptionsConfig = serde_json::from_value(json!({
        "custom": {"after": "createdAt", "before": "createdAt"}
    }))
    .unwrap();
    let parser = QueryParser::new(config.build().unwrap());
    let query: JsonValue =
        serde_json::from_str(r#"{"before": "2021-02-01", "after": "2021-01-01"}"#).unwrap();

    let filter = parser.parse(&Query::from_json(query).unwrap()).unwrap();
    assert_eq!(
        filter.to_json(),
        json!({"createdAt": {"ge": "2021-01-01T00:00:00.000Z"}})
    );
}

#[test]
fn test_default_parse_helper() {
    let filter = parse(&Query::from_query_string("price=%3C%3D9.99"));
    assert_eq!(filter.to_json(), json!({"price": {"le": 9.99}}));
}
