use indexmap::IndexMap;
use nats_json::{JsonMap, JsonSerializable, JsonValue};
use num_bigint::BigInt;

fn obj(pairs: Vec<(&str, JsonValue)>) -> JsonValue {
    let mut map = JsonMap::new();
    for (k, v) in pairs {
        map.insert(k, v);
    }
    JsonValue::Object(map)
}

#[test]
fn nested_document_renders_byte_exact() {
    let doc = obj(vec![
        ("name", JsonValue::from("events")),
        ("replicas", JsonValue::Int(3)),
        ("max_bytes", JsonValue::Long(1_048_576)),
        ("ratio", JsonValue::Double(0.5)),
        (
            "subjects",
            JsonValue::Array(vec![JsonValue::from("one.*"), JsonValue::from("two.>")]),
        ),
        (
            "placement",
            obj(vec![
                ("cluster", JsonValue::from("east")),
                ("tags", JsonValue::Array(Vec::new())),
            ]),
        ),
        ("deleted", JsonValue::Null),
    ]);
    assert_eq!(
        doc.to_json(),
        "{\"name\":\"events\",\"replicas\":3,\"max_bytes\":1048576,\"ratio\":0.5,\
         \"subjects\":[\"one.*\",\"two.>\"],\
         \"placement\":{\"cluster\":\"east\",\"tags\":[]},\"deleted\":null}"
    );
}

#[test]
fn rendered_text_parses_as_json() {
    let doc = obj(vec![
        ("s", JsonValue::from("quote \" backslash \\ slash / tab \t")),
        ("i", JsonValue::Int(-1)),
        ("b", JsonValue::Bool(false)),
        ("arr", JsonValue::Array(vec![JsonValue::Long(7)])),
    ]);
    let parsed: serde_json::Value = serde_json::from_str(&doc.to_json()).expect("valid JSON");
    assert_eq!(
        parsed["s"],
        serde_json::json!("quote \" backslash \\ slash / tab \t")
    );
    assert_eq!(parsed["i"], serde_json::json!(-1));
    assert_eq!(parsed["arr"][0], serde_json::json!(7));
}

#[test]
fn explicit_order_versus_natural_order() {
    let mut entries = IndexMap::new();
    entries.insert("a".to_string(), JsonValue::Int(1));
    entries.insert("b".to_string(), JsonValue::Int(2));

    let natural = JsonValue::Object(JsonMap::from(entries.clone()));
    assert_eq!(natural.to_json(), "{\"a\":1,\"b\":2}");

    let ordered = JsonValue::Object(JsonMap::with_order(
        entries,
        vec!["b".to_string(), "a".to_string()],
    ));
    assert_eq!(ordered.to_json(), "{\"b\":2,\"a\":1}");

    // the two still compare equal
    assert_eq!(natural, ordered);
}

#[test]
fn equality_matrix() {
    // same mathematical value, different variant: not equal
    assert_ne!(JsonValue::Int(1), JsonValue::Long(1));
    assert_ne!(JsonValue::Double(1.0), JsonValue::Float(1.0));
    assert_ne!(JsonValue::Int(0), JsonValue::Bool(false));
    assert_ne!(JsonValue::Null, JsonValue::from(""));

    // arrays are position-sensitive
    assert_ne!(
        JsonValue::Array(vec![JsonValue::Int(1), JsonValue::Int(2)]),
        JsonValue::Array(vec![JsonValue::Int(2), JsonValue::Int(1)])
    );

    // deep objects compare entry-wise, order-free
    let left = obj(vec![
        ("x", obj(vec![("k", JsonValue::from("v"))])),
        ("y", JsonValue::Int(2)),
    ]);
    let right = obj(vec![
        ("y", JsonValue::Int(2)),
        ("x", obj(vec![("k", JsonValue::from("v"))])),
    ]);
    assert_eq!(left, right);

    let different = obj(vec![
        ("x", obj(vec![("k", JsonValue::from("other"))])),
        ("y", JsonValue::Int(2)),
    ]);
    assert_ne!(left, different);
}

#[test]
fn big_numerics_render_canonically() {
    let bi = BigInt::parse_bytes(b"340282366920938463463374607431768211455", 10).unwrap();
    assert_eq!(
        JsonValue::BigInt(bi).to_json(),
        "340282366920938463463374607431768211455"
    );
    assert_eq!(
        JsonValue::BigDec("0.100000000000000000000000000001".to_string()).to_json(),
        "0.100000000000000000000000000001"
    );
}

#[test]
fn serde_roundtrip_preserves_structure() {
    let original = serde_json::json!({
        "config": {"name": "orders", "num": 12},
        "tags": ["a", "b"],
        "on": true,
        "missing": null
    });
    let value = JsonValue::from(original.clone());
    let back = serde_json::Value::from(value);
    assert_eq!(back, original);
}
