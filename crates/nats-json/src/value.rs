//! [`JsonValue`] — the tagged-union value model for JSON-shaped payloads.
//!
//! Every value holds exactly one active variant. Numeric variants are never
//! widened or narrowed: a value built as `Int` stays distinct in type from a
//! `Long` even when numerically equal, and round-trips through text with its
//! subtype intact.

use std::fmt;
use std::sync::OnceLock;

use indexmap::IndexMap;
use num_bigint::BigInt;

use crate::builder::{end_array, end_json};
use crate::encoding;

const NULL_STR: &str = "null";

/// JSON null, shared immutable singleton.
pub static NULL: JsonValue = JsonValue::Null;
/// JSON true, shared immutable singleton.
pub static TRUE: JsonValue = JsonValue::Bool(true);
/// JSON false, shared immutable singleton.
pub static FALSE: JsonValue = JsonValue::Bool(false);
/// The empty JSON array, shared immutable singleton.
pub static EMPTY_ARRAY: JsonValue = JsonValue::Array(Vec::new());

/// The empty JSON object, shared immutable singleton.
pub fn empty_map() -> &'static JsonValue {
    static EMPTY_MAP: OnceLock<JsonValue> = OnceLock::new();
    EMPTY_MAP.get_or_init(|| JsonValue::Object(JsonMap::new()))
}

/// A node of a JSON-shaped tree, one variant per JSON kind.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum JsonValue {
    #[default]
    Null,
    Bool(bool),
    Str(String),
    /// 32-bit integer
    Int(i32),
    /// 64-bit integer
    Long(i64),
    /// 32-bit floating point
    Float(f32),
    /// 64-bit floating point
    Double(f64),
    /// Arbitrary-precision decimal, held as its canonical textual form
    BigDec(String),
    /// Arbitrary-precision integer
    BigInt(BigInt),
    Array(Vec<JsonValue>),
    Object(JsonMap),
}

/// Object payload: entries in insertion order, plus an optional explicit
/// serialization order.
///
/// When the explicit order is non-empty, serialization emits keys in exactly
/// that order (keys listed but absent from the entries are skipped);
/// otherwise insertion order is used. Equality compares entries only and
/// ignores both orders.
#[derive(Debug, Clone, Default)]
pub struct JsonMap {
    entries: IndexMap<String, JsonValue>,
    order: Vec<String>,
}

impl JsonMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// An object with an explicit serialization key order.
    pub fn with_order(entries: IndexMap<String, JsonValue>, order: Vec<String>) -> Self {
        JsonMap { entries, order }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: JsonValue) -> Option<JsonValue> {
        self.entries.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, JsonValue> {
        self.entries.iter()
    }

    /// The explicit serialization order; empty means insertion order.
    pub fn order(&self) -> &[String] {
        &self.order
    }
}

impl PartialEq for JsonMap {
    // set-like comparison of entries; serialization order is irrelevant
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl From<IndexMap<String, JsonValue>> for JsonMap {
    fn from(entries: IndexMap<String, JsonValue>) -> Self {
        JsonMap {
            entries,
            order: Vec::new(),
        }
    }
}

impl FromIterator<(String, JsonValue)> for JsonMap {
    fn from_iter<I: IntoIterator<Item = (String, JsonValue)>>(iter: I) -> Self {
        JsonMap::from(iter.into_iter().collect::<IndexMap<String, JsonValue>>())
    }
}

/// Anything that renders itself as a JSON fragment.
///
/// The seam the field builder accepts for nested values; [`JsonValue`]
/// implements it by canonical rendering.
pub trait JsonSerializable {
    fn to_json(&self) -> String;
}

impl JsonSerializable for JsonValue {
    fn to_json(&self) -> String {
        match self {
            JsonValue::Null => NULL_STR.to_string(),
            JsonValue::Bool(b) => if *b { "true" } else { "false" }.to_string(),
            JsonValue::Str(s) => quoted(s),
            JsonValue::Int(i) => i.to_string(),
            JsonValue::Long(l) => l.to_string(),
            JsonValue::Float(f) => f.to_string(),
            JsonValue::Double(d) => d.to_string(),
            JsonValue::BigDec(bd) => bd.clone(),
            JsonValue::BigInt(bi) => bi.to_string(),
            JsonValue::Array(list) => array_json(list),
            JsonValue::Object(map) => object_json(map),
        }
    }
}

impl JsonValue {
    /// Render as a named member, `"key":<json>`, for embedding in an
    /// enclosing object.
    pub fn to_json_field(&self, key: &str) -> String {
        format!("\"{key}\":{}", self.to_json())
    }
}

impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json())
    }
}

fn quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    encoding::encode_into(&mut out, s);
    out.push('"');
    out
}

fn array_json(list: &[JsonValue]) -> String {
    let mut sb = String::from("[");
    for v in list {
        sb.push_str(&v.to_json());
        sb.push(',');
    }
    end_array(&mut sb);
    sb
}

fn object_json(map: &JsonMap) -> String {
    let mut sb = String::from("{");
    if map.order().is_empty() {
        for (key, value) in map.iter() {
            append_member(&mut sb, key, value);
        }
    } else {
        for key in map.order() {
            if let Some(value) = map.get(key) {
                append_member(&mut sb, key, value);
            }
        }
    }
    end_json(&mut sb);
    sb
}

fn append_member(sb: &mut String, key: &str, value: &JsonValue) {
    sb.push('"');
    encoding::encode_into(sb, key);
    sb.push_str("\":");
    sb.push_str(&value.to_json());
    sb.push(',');
}

// ---- constructors ----

impl From<&str> for JsonValue {
    fn from(s: &str) -> Self {
        JsonValue::Str(s.to_string())
    }
}

impl From<String> for JsonValue {
    fn from(s: String) -> Self {
        JsonValue::Str(s)
    }
}

impl From<char> for JsonValue {
    fn from(c: char) -> Self {
        JsonValue::Str(c.to_string())
    }
}

impl From<bool> for JsonValue {
    fn from(b: bool) -> Self {
        JsonValue::Bool(b)
    }
}

impl From<i32> for JsonValue {
    fn from(i: i32) -> Self {
        JsonValue::Int(i)
    }
}

impl From<i64> for JsonValue {
    fn from(l: i64) -> Self {
        JsonValue::Long(l)
    }
}

impl From<f32> for JsonValue {
    fn from(f: f32) -> Self {
        JsonValue::Float(f)
    }
}

impl From<f64> for JsonValue {
    fn from(d: f64) -> Self {
        JsonValue::Double(d)
    }
}

impl From<BigInt> for JsonValue {
    fn from(bi: BigInt) -> Self {
        JsonValue::BigInt(bi)
    }
}

impl From<Vec<JsonValue>> for JsonValue {
    fn from(list: Vec<JsonValue>) -> Self {
        JsonValue::Array(list)
    }
}

impl From<&[JsonValue]> for JsonValue {
    fn from(values: &[JsonValue]) -> Self {
        JsonValue::Array(values.to_vec())
    }
}

impl From<JsonMap> for JsonValue {
    fn from(map: JsonMap) -> Self {
        JsonValue::Object(map)
    }
}

impl From<IndexMap<String, JsonValue>> for JsonValue {
    fn from(entries: IndexMap<String, JsonValue>) -> Self {
        JsonValue::Object(JsonMap::from(entries))
    }
}

// ---- serde_json interop ----

impl From<serde_json::Value> for JsonValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => JsonValue::Null,
            serde_json::Value::Bool(b) => JsonValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    match i32::try_from(i) {
                        Ok(i) => JsonValue::Int(i),
                        Err(_) => JsonValue::Long(i),
                    }
                } else if let Some(u) = n.as_u64() {
                    JsonValue::BigInt(BigInt::from(u))
                } else {
                    JsonValue::Double(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => JsonValue::Str(s),
            serde_json::Value::Array(arr) => {
                JsonValue::Array(arr.into_iter().map(JsonValue::from).collect())
            }
            serde_json::Value::Object(obj) => {
                let mut map = JsonMap::new();
                for (k, v) in obj {
                    map.insert(k, JsonValue::from(v));
                }
                JsonValue::Object(map)
            }
        }
    }
}

impl From<JsonValue> for serde_json::Value {
    fn from(v: JsonValue) -> Self {
        use serde_json::Value;
        match v {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Str(s) => Value::String(s),
            JsonValue::Int(i) => Value::from(i),
            JsonValue::Long(l) => Value::from(l),
            JsonValue::Float(f) => Value::from(f),
            JsonValue::Double(d) => Value::from(d),
            // serde_json has no native decimal; fall back to text when the
            // value does not survive an f64
            JsonValue::BigDec(bd) => match bd.parse::<f64>() {
                Ok(f) if f.is_finite() => Value::from(f),
                _ => Value::String(bd),
            },
            JsonValue::BigInt(bi) => {
                if let Ok(i) = i64::try_from(&bi) {
                    Value::from(i)
                } else if let Ok(u) = u64::try_from(&bi) {
                    Value::from(u)
                } else {
                    Value::String(bi.to_string())
                }
            }
            JsonValue::Array(list) => Value::Array(list.into_iter().map(Value::from).collect()),
            JsonValue::Object(map) => {
                let mut obj = serde_json::Map::with_capacity(map.len());
                for (k, v) in map.entries {
                    obj.insert(k, Value::from(v));
                }
                Value::Object(obj)
            }
        }
    }
}
