//! Buffer-oriented JSON object/array assembly.
//!
//! Functions in this module append `"key":value,` members to a growable
//! `String` and silently omit absent values (None, empty strings and
//! sequences, the reserved −1 integer sentinel, the unset default
//! timestamp). Closing a buffer elides the trailing separator: when the last
//! emitted character is a comma, the closing brace or bracket overwrites it.
//!
//! An absent field leaves the buffer completely unchanged; a present field
//! appends exactly one member fragment. Nothing here fails: caller misuse
//! (such as a meaningless floor) results in omission, not an error.

use std::time::Duration;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use nats_datetime::{default_time, to_rfc3339};

use crate::encoding::encode_into;
use crate::value::JsonSerializable;

/// Reserved "unset" marker for plain integer fields.
const UNSET: i64 = -1;

const INDENT: &str = "    ";

/// Open an object buffer.
pub fn begin_json() -> String {
    String::from("{")
}

/// Open an object buffer for the formatted layout (newline and 4-space
/// indent after the brace).
pub fn begin_formatted_json() -> String {
    String::from("{\n    ")
}

/// Open an object buffer preceded by a literal prefix, for embedding the
/// object as a nested field value.
pub fn begin_json_prefixed(prefix: Option<&str>) -> String {
    match prefix {
        Some(p) => {
            let mut sb = String::with_capacity(p.len() + 1);
            sb.push_str(p);
            sb.push('{');
            sb
        }
        None => begin_json(),
    }
}

/// Open an array buffer.
pub fn begin_array() -> String {
    String::from("[")
}

/// Close an object buffer, eliding a trailing separator.
pub fn end_json(sb: &mut String) {
    close(sb, '}');
}

/// Close an array buffer, eliding a trailing separator.
pub fn end_array(sb: &mut String) {
    close(sb, ']');
}

/// Close a formatted object buffer: elide the trailing separator, then emit
/// the closing newline and brace.
pub fn end_formatted_json(sb: &mut String) {
    if sb.ends_with(',') {
        sb.pop();
    }
    sb.push_str("\n}");
}

// the shared elision rule: overwrite a trailing comma with the closer
fn close(sb: &mut String, closer: char) {
    if sb.ends_with(',') {
        sb.pop();
    }
    sb.push(closer);
}

fn push_key(sb: &mut String, fname: &str) {
    sb.push('"');
    encode_into(sb, fname);
    sb.push_str("\":");
}

/// Append `"fname":"value",` unless the value is `None` or empty.
pub fn add_field(sb: &mut String, fname: &str, value: Option<&str>) {
    if let Some(value) = value {
        if !value.is_empty() {
            push_key(sb, fname);
            sb.push('"');
            encode_into(sb, value);
            sb.push_str("\",");
        }
    }
}

/// Append `"fname":true|false,` whenever a value is present.
pub fn add_field_bool(sb: &mut String, fname: &str, value: Option<bool>) {
    if let Some(b) = value {
        push_key(sb, fname);
        sb.push_str(if b { "true" } else { "false" });
        sb.push(',');
    }
}

/// Append `"fname":true,` only when the value is `Some(true)`.
pub fn add_field_when_true(sb: &mut String, fname: &str, value: Option<bool>) {
    if value == Some(true) {
        add_field_bool(sb, fname, value);
    }
}

/// Append an integer field unless it is `None` or the −1 "unset" sentinel.
pub fn add_field_int(sb: &mut String, fname: &str, value: Option<i32>) {
    if let Some(v) = value {
        if i64::from(v) != UNSET {
            push_key(sb, fname);
            sb.push_str(&v.to_string());
            sb.push(',');
        }
    }
}

/// Append a long field unless it is `None` or the −1 "unset" sentinel.
pub fn add_field_long(sb: &mut String, fname: &str, value: Option<i64>) {
    if let Some(v) = value {
        if v != UNSET {
            push_key(sb, fname);
            sb.push_str(&v.to_string());
            sb.push(',');
        }
    }
}

/// Append a long field only when the value is strictly greater than `floor`.
pub fn add_field_when_greater_than(sb: &mut String, fname: &str, value: Option<i64>, floor: i64) {
    if let Some(v) = value {
        if v > floor {
            push_key(sb, fname);
            sb.push_str(&v.to_string());
            sb.push(',');
        }
    }
}

/// Append a long field only when the value is strictly positive.
pub fn add_field_when_gt_zero(sb: &mut String, fname: &str, value: Option<i64>) {
    add_field_when_greater_than(sb, fname, value, 0);
}

/// Append an integer field only when the value is strictly positive.
pub fn add_field_when_gt_zero_int(sb: &mut String, fname: &str, value: Option<i32>) {
    add_field_when_greater_than(sb, fname, value.map(i64::from), 0);
}

/// Append a timestamp field as RFC 3339 text, unless it is `None` or the
/// unset default timestamp.
pub fn add_field_time(sb: &mut String, fname: &str, value: Option<&DateTime<Utc>>) {
    if let Some(dt) = value {
        if *dt != default_time() {
            push_key(sb, fname);
            sb.push('"');
            sb.push_str(&to_rfc3339(dt));
            sb.push_str("\",");
        }
    }
}

/// Append a nested JSON-serializable field unless it is `None`.
pub fn add_json<T: JsonSerializable>(sb: &mut String, fname: &str, value: Option<&T>) {
    if let Some(value) = value {
        push_key(sb, fname);
        sb.push_str(&value.to_json());
        sb.push(',');
    }
}

/// Append a pre-rendered JSON fragment verbatim unless it is empty.
pub fn add_raw_json(sb: &mut String, fname: &str, json: &str) {
    if !json.is_empty() {
        push_key(sb, fname);
        sb.push_str(json);
        sb.push(',');
    }
}

/// Append a string-array field unless the slice is empty.
pub fn add_strings<S: AsRef<str>>(sb: &mut String, fname: &str, values: &[S]) {
    if values.is_empty() {
        return;
    }
    push_key(sb, fname);
    sb.push('[');
    for v in values {
        sb.push('"');
        encode_into(sb, v.as_ref());
        sb.push_str("\",");
    }
    end_array(sb);
    sb.push(',');
}

/// Append an array field of JSON-serializable values unless the slice is
/// empty.
pub fn add_jsons<T: JsonSerializable>(sb: &mut String, fname: &str, values: &[T]) {
    if values.is_empty() {
        return;
    }
    push_key(sb, fname);
    sb.push('[');
    for v in values {
        sb.push_str(&v.to_json());
        sb.push(',');
    }
    end_array(sb);
    sb.push(',');
}

/// Append a duration-array field, each duration rendered as whole
/// nanoseconds, unless the slice is empty.
pub fn add_durations(sb: &mut String, fname: &str, values: &[Duration]) {
    if values.is_empty() {
        return;
    }
    push_key(sb, fname);
    sb.push('[');
    for v in values {
        sb.push_str(&v.as_nanos().to_string());
        sb.push(',');
    }
    end_array(sb);
    sb.push(',');
}

/// Order-insensitive map comparison with explicit absent semantics:
/// `(None, None)` is equal, `None` never equals a map (even an empty one).
pub fn map_equals(
    map1: Option<&IndexMap<String, String>>,
    map2: Option<&IndexMap<String, String>>,
) -> bool {
    match (map1, map2) {
        (Some(m1), Some(m2)) => m1 == m2,
        (None, None) => true,
        _ => false,
    }
}

/// Parse a decimal integer, also accepting the unsigned 64-bit range by
/// wrapping into `i64` (so the unsigned maximum parses to −1). Anything else
/// yields `None`.
pub fn safe_parse_long(text: &str) -> Option<i64> {
    if let Ok(v) = text.parse::<i64>() {
        return Some(v);
    }
    text.parse::<u64>().ok().map(|v| v as i64)
}

/// [`safe_parse_long`] with a default for `None` input or parse failure.
pub fn safe_parse_long_or(text: Option<&str>, dflt: i64) -> i64 {
    text.and_then(safe_parse_long).unwrap_or(dflt)
}

/// Re-lay out rendered JSON text with newlines and 4-space indentation.
///
/// String literals pass through untouched (escape-aware); existing
/// whitespace between tokens is dropped; empty containers stay on one line.
pub fn format_indented(json: &str) -> String {
    let mut out = String::with_capacity(json.len() * 2);
    let mut depth: usize = 0;
    let mut in_string = false;
    let mut escaped = false;
    for ch in json.chars() {
        if in_string {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => {
                in_string = true;
                out.push(ch);
            }
            '{' | '[' => {
                out.push(ch);
                depth += 1;
                push_break(&mut out, depth);
            }
            '}' | ']' => {
                depth = depth.saturating_sub(1);
                let keep = last_break(&out);
                if matches!(
                    out.as_bytes().get(keep.wrapping_sub(1)),
                    Some(&b'{') | Some(&b'[')
                ) {
                    // empty container stays on one line
                    out.truncate(keep);
                } else {
                    push_break(&mut out, depth);
                }
                out.push(ch);
            }
            ',' => {
                out.push(ch);
                push_break(&mut out, depth);
            }
            c if c.is_whitespace() => {}
            c => out.push(c),
        }
    }
    out
}

fn push_break(out: &mut String, depth: usize) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

// length of `out` with one trailing break (newline + indent) removed
fn last_break(out: &str) -> usize {
    let bytes = out.as_bytes();
    let mut keep = bytes.len();
    while keep > 0 && bytes[keep - 1] == b' ' {
        keep -= 1;
    }
    if keep > 0 && bytes[keep - 1] == b'\n' {
        keep -= 1;
    }
    keep
}
