//! Properties over generated documents.
//!
//! Leaves and keys come from tiny alphabets so generated documents repeat
//! subtrees often.

use dedupec::{stringify_json, EmitConfig, TypeEscape};
use proptest::prelude::*;
use serde_json::{Map, Value as Json};

use crate::common::evaluate;

fn arb_leaf() -> impl Strategy<Value = Json> {
    prop_oneof![
        Just(Json::Null),
        any::<bool>().prop_map(Json::Bool),
        (0i64..3).prop_map(Json::from),
        prop_oneof![Just(0.5f64), Just(-1.25f64)].prop_map(Json::from),
        "[ab]".prop_map(Json::String),
    ]
}

fn arb_json() -> impl Strategy<Value = Json> {
    arb_leaf().prop_recursive(5, 48, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Json::Array),
            prop::collection::vec(("[abc]", inner), 0..4).prop_map(|props| {
                let mut map = Map::new();
                for (key, value) in props {
                    map.insert(key, value);
                }
                Json::Object(map)
            }),
        ]
    })
}

fn arb_config() -> impl Strategy<Value = EmitConfig> {
    (any::<bool>(), 0usize..5).prop_map(|(annotate, indent)| {
        let escape = if annotate { TypeEscape::Flow } else { TypeEscape::None };
        EmitConfig::default()
            .with_type_escape(escape)
            .with_indent_width(indent)
    })
}

fn is_hoistable(json: &Json) -> bool {
    match json {
        Json::Array(items) => !items.is_empty(),
        Json::Object(map) => !map.is_empty(),
        _ => false,
    }
}

/// Count composite subtrees by their compact JSON text.
fn composite_counts(json: &Json, counts: &mut std::collections::HashMap<String, usize>) {
    match json {
        Json::Array(items) => items.iter().for_each(|item| composite_counts(item, counts)),
        Json::Object(map) => map.values().for_each(|item| composite_counts(item, counts)),
        _ => return,
    }
    if is_hoistable(json) {
        *counts.entry(json.to_string()).or_insert(0) += 1;
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    #[test]
    fn round_trip(json in arb_json(), config in arb_config()) {
        let out = stringify_json(&json, &config).unwrap();
        prop_assert_eq!(evaluate(&out).value, json);
    }

    #[test]
    fn output_is_deterministic(json in arb_json(), config in arb_config()) {
        let first = stringify_json(&json, &config).unwrap();
        let second = stringify_json(&json, &config).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn unique_documents_are_unwrapped(json in arb_json()) {
        let mut counts = std::collections::HashMap::new();
        composite_counts(&json, &mut counts);
        let has_repeat = counts.values().any(|&n| n >= 2);

        let out = stringify_json(&json, &EmitConfig::default()).unwrap();
        prop_assert_eq!(out.starts_with("(function(){"), has_repeat);
        if !has_repeat {
            prop_assert_eq!(out, serde_json::to_string_pretty(&json).unwrap());
        }
    }

    #[test]
    fn every_binding_is_read_twice(json in arb_json()) {
        let out = stringify_json(&json, &EmitConfig::default()).unwrap();
        let evaluated = evaluate(&out);
        for name in &evaluated.bindings {
            let reads = evaluated.references.get(name).copied().unwrap_or(0);
            prop_assert!(reads >= 2, "{} read {} time(s) in\n{}", name, reads, out);
        }
    }

    #[test]
    fn bindings_are_never_empty_or_scalar(json in arb_json()) {
        let out = stringify_json(&json, &EmitConfig::default()).unwrap();
        let evaluated = evaluate(&out);
        for line in out.lines().filter(|line| line.starts_with("var ") || line.contains(" = ")) {
            let rhs = line.split(" = ").nth(1).unwrap();
            prop_assert!(rhs == "[" || rhs == "{", "binding is not a multi-line composite: {}", line);
        }
        prop_assert_eq!(evaluated.value, json);
    }

    #[test]
    fn bindings_only_read_earlier_bindings(json in arb_json()) {
        let out = stringify_json(&json, &EmitConfig::default()).unwrap();
        let evaluated = evaluate(&out);
        for (index, name) in evaluated.bindings.iter().enumerate() {
            prop_assert_eq!(name, &format!("v{index}"));
            for dep in &evaluated.dependencies[name] {
                let position = evaluated.bindings.iter().position(|b| b == dep).unwrap();
                prop_assert!(position < index, "{} reads later binding {}", name, dep);
            }
        }
    }
}
