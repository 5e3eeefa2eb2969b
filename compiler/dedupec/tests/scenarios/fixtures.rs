//! Fixed inputs with their exact expected output.

use dedupec::{stringify, stringify_json, EmitConfig, TypeEscape, ValueArena};
use pretty_assertions::assert_eq;
use serde_json::{json, Value as Json};

use crate::common::evaluate;

fn plain(json: &Json) -> String {
    let out = stringify_json(json, &EmitConfig::default()).unwrap();
    assert_eq!(&evaluate(&out).value, json, "round trip of {out}");
    out
}

fn flow(json: &Json) -> String {
    let config = EmitConfig::default().with_type_escape(TypeEscape::Flow);
    let out = stringify_json(json, &config).unwrap();
    assert_eq!(&evaluate(&out).value, json, "round trip of {out}");
    out
}

#[test]
fn scalars() {
    assert_eq!(plain(&json!(false)), "false");
    assert_eq!(plain(&json!(null)), "null");
    assert_eq!(plain(&json!(1)), "1");
    assert_eq!(plain(&json!("string")), "\"string\"");
}

#[test]
fn absent_property_is_stripped() {
    let mut arena = ValueArena::new();
    let a = arena.int(1);
    let b = arena.absent();
    let root = arena.object([("a", a), ("b", b)]);

    let out = stringify(&arena, root, &EmitConfig::default()).unwrap();
    assert_eq!(out, "{\n  \"a\": 1\n}");
    assert_eq!(evaluate(&out).value, json!({"a": 1}));
}

#[test]
fn empty_arrays_are_never_bound() {
    let input = json!({"args": [], "values": [], "dupe1": {"key": []}, "dupe2": {"key": []}});

    assert_eq!(
        plain(&input),
        "\
(function(){
var v0 = {
  \"key\": []
};
return {
  \"args\": [],
  \"values\": [],
  \"dupe1\": v0,
  \"dupe2\": v0
};
})()"
    );
    assert_eq!(
        flow(&input),
        "\
(function(){
var v0 = {
  \"key\": ([]/*: any*/)
};
return {
  \"args\": [],
  \"values\": [],
  \"dupe1\": (v0/*: any*/),
  \"dupe2\": (v0/*: any*/)
};
})()"
    );
}

#[test]
fn nested_duplicate() {
    let input = json!([1, {"name": "id"}, {"friend": [{"name": "id"}]}]);

    assert_eq!(
        plain(&input),
        "\
(function(){
var v0 = {
  \"name\": \"id\"
};
return [
  1,
  v0,
  {
    \"friend\": [
      v0
    ]
  }
];
})()"
    );
}

#[test]
fn shared_instance_matches_independent_copies() {
    let mut arena = ValueArena::new();
    let id = arena.string("id");
    let field = arena.object([("name", id)]);
    let one = arena.int(1);
    let friends = arena.array([field]);
    let friend = arena.object([("friend", friends)]);
    let root = arena.array([one, field, friend]);

    let shared = stringify(&arena, root, &EmitConfig::default()).unwrap();
    let copied = plain(&json!([1, {"name": "id"}, {"friend": [{"name": "id"}]}]));
    assert_eq!(shared, copied);
}

#[test]
fn duplicates_inside_a_binding_stay_in_its_body() {
    let input = json!([
        {"name": "id", "alias": null},
        {"name": "id", "alias": null},
        [{"name": "id"}, {"name": "id", "alias": "other"}],
        [{"name": "id"}, {"name": "id", "alias": "other"}],
        [{"name": "id", "alias": "other"}],
    ]);

    assert_eq!(
        flow(&input),
        "\
(function(){
var v0 = {
  \"name\": \"id\",
  \"alias\": null
},
v1 = {
  \"name\": \"id\",
  \"alias\": \"other\"
},
v2 = [
  {
    \"name\": \"id\"
  },
  (v1/*: any*/)
];
return [
  (v0/*: any*/),
  (v0/*: any*/),
  (v2/*: any*/),
  (v2/*: any*/),
  [
    (v1/*: any*/)
  ]
];
})()"
    );
}

#[test]
fn key_order_is_preserved() {
    let input: Json = serde_json::from_str(r#"{"z": 1, "a": 2, "m": [true]}"#).unwrap();
    assert_eq!(
        plain(&input),
        "{\n  \"z\": 1,\n  \"a\": 2,\n  \"m\": [\n    true\n  ]\n}"
    );
}

#[test]
fn escaped_strings_survive() {
    let input = json!({"quote\"key": ["line\nbreak", "tab\t", "\u{1}"]});
    let out = plain(&input);
    assert!(out.contains(r#""quote\"key""#));
    assert!(out.contains(r#""\u0001""#));
}

#[test]
fn floats_and_negative_numbers() {
    let input = json!([1.5, -2, 1e100, 0.1]);
    assert_eq!(plain(&input), "[\n  1.5,\n  -2,\n  1e+100,\n  0.1\n]");
}

#[test]
fn deep_nesting_does_not_overflow() {
    let mut arena = ValueArena::new();
    let mut node = arena.int(0);
    for _ in 0..20_000 {
        node = arena.array([node]);
    }
    let root = arena.array([node, node]);

    let out = stringify(&arena, root, &EmitConfig::default().with_indent_width(0)).unwrap();
    assert!(out.starts_with("(function(){\nvar v0 = [\n[\n"));
    assert!(out.ends_with("return [\nv0,\nv0\n];\n})()"));
}
