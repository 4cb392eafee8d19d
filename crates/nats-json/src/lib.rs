//! JSON value representation and text codec for NATS-style wire messages.
//!
//! Three pieces that agree on one output grammar:
//!
//! - [`encoding`] — the string escape codec: total encode/decode with exact
//!   rules for what is escaped and how malformed escapes are tolerated.
//! - [`value`] — [`JsonValue`], a tagged-union tree that preserves numeric
//!   subtype and optional explicit object key order, with canonical text
//!   rendering and structural equality.
//! - [`builder`] — buffer-oriented assembly of JSON object/array text with
//!   selective omission of absent fields.
//!
//! The rendered text is a wire contract: byte-for-byte output including
//! lowercase `\u00xx` escapes and the trailing-separator elision shared by
//! the value model and the builder.
//!
//! # Example
//!
//! ```
//! use nats_json::builder::{add_field, add_field_long, begin_json, end_json};
//!
//! let mut sb = begin_json();
//! add_field(&mut sb, "name", Some("events"));
//! add_field_long(&mut sb, "messages", Some(-1)); // unset sentinel, omitted
//! end_json(&mut sb);
//! assert_eq!(sb, "{\"name\":\"events\"}");
//! ```

pub mod builder;
pub mod encoding;
pub mod value;

pub use value::{empty_map, JsonMap, JsonSerializable, JsonValue, EMPTY_ARRAY, FALSE, NULL, TRUE};
