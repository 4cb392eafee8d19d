//! JSON string escape codec.
//!
//! Character-level translation between raw text and the content of a JSON
//! string literal. Both directions are total: [`encode`] escapes only what
//! the wire contract requires, and [`decode`] tolerates malformed escape
//! sequences instead of rejecting them.
//!
//! This is deliberately not delegated to a general-purpose JSON library.
//! Strict decoders reject the malformed sequences this codec must pass
//! through, and their encoders emit uppercase-hex `\uXXXX` escapes where the
//! wire contract requires lowercase `\u00xx`.

/// Decode JSON string literal content into raw text. Never fails.
///
/// Recognized escapes are `\b \f \n \r \t \" \\ \/` and `\u` followed by
/// exactly four hex digits (case-insensitive). Any other `\x` yields `x`
/// with the backslash discarded, and a lone trailing backslash is copied
/// through unchanged.
///
/// # Example
///
/// ```
/// use nats_json::encoding::decode;
///
/// assert_eq!(decode("b4\\tafter"), "b4\tafter");
/// assert_eq!(decode("b4\\xafter"), "b4xafter");
/// assert_eq!(decode("b4\\"), "b4\\");
/// ```
pub fn decode(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    let mut out = String::with_capacity(text.len());
    let mut x = 0;
    while x < len {
        let ch = chars[x];
        x += 1;
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        if x >= len {
            // lone trailing backslash
            out.push('\\');
            break;
        }
        let esc = chars[x];
        x += 1;
        match esc {
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'u' => {
                if x + 4 <= len && chars[x..x + 4].iter().all(char::is_ascii_hexdigit) {
                    let code = chars[x..x + 4]
                        .iter()
                        .fold(0u32, |acc, c| acc * 16 + c.to_digit(16).unwrap_or(0));
                    // Surrogate halves have no char; substitute U+FFFD
                    out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
                    x += 4;
                } else {
                    // not a valid \uXXXX, treated as an unrecognized escape
                    out.push('u');
                }
            }
            // covers \" \\ \/ and unrecognized escapes alike
            other => out.push(other),
        }
    }
    out
}

/// Encode raw text as JSON string literal content. Never fails.
///
/// Escapes `"`, `\` and control characters below 0x20 (the five short
/// escapes where defined, `\u00xx` with lowercase hex otherwise). Everything
/// else, including `/` and all codepoints at or above 0x20, passes through
/// literally.
///
/// # Example
///
/// ```
/// use nats_json::encoding::encode;
///
/// assert_eq!(encode("a\"b"), "a\\\"b");
/// assert_eq!(encode("a/b<c>'=`"), "a/b<c>'=`");
/// assert_eq!(encode("\u{1f}"), "\\u001f");
/// ```
pub fn encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    encode_into(&mut out, text);
    out
}

/// Append the encoding of `text` to an existing buffer.
pub fn encode_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
}
