//! RFC 8785-style JSON canonicalisation used for every hash in the kernel.
//!
//! Object keys are sorted lexicographically, there is no insignificant
//! whitespace, integers are rendered without a decimal point, and arrays
//! preserve insertion order. `serde_json::to_string` alone does not sort
//! keys, so hashing must always go through [`canonical_json`].

use serde::Serialize;
use serde_json::Value as Json;
use sha2::{Digest, Sha256};

/// Render `value` as canonical JSON text.
pub fn canonical_json<T: Serialize>(value: &T) -> String {
    let json = serde_json::to_value(value).expect("value must serialize to JSON");
    let mut out = String::new();
    write_canonical(&json, &mut out);
    out
}

fn write_canonical(value: &Json, out: &mut String) {
    match value {
        Json::Null => out.push_str("null"),
        Json::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                out.push_str(&i.to_string());
            } else if let Some(u) = n.as_u64() {
                out.push_str(&u.to_string());
            } else {
                out.push_str(&n.to_string());
            }
        }
        Json::String(s) => write_escaped_string(s, out),
        Json::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Json::Object(map) => {
            out.push('{');
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_escaped_string(key, out);
                out.push(':');
                write_canonical(&map[*key], out);
            }
            out.push('}');
        }
    }
}

fn write_escaped_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

/// SHA-256 of arbitrary bytes, lower-case hex-encoded.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    hex::encode(digest)
}

/// SHA-256 of a value's canonical JSON form, lower-case hex-encoded.
pub fn sha256_canonical<T: Serialize>(value: &T) -> String {
    sha256_hex(canonical_json(value).as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sorts_object_keys() {
        let v = json!({"b": 1, "a": 2});
        assert_eq!(canonical_json(&v), r#"{"a":2,"b":1}"#);
    }

    #[test]
    fn preserves_array_order() {
        let v = json!([3, 1, 2]);
        assert_eq!(canonical_json(&v), "[3,1,2]");
    }

    #[test]
    fn integers_have_no_decimal_point() {
        let v = json!({"n": 42});
        assert_eq!(canonical_json(&v), r#"{"n":42}"#);
    }

    #[test]
    fn nested_objects_sort_recursively() {
        let v = json!({"z": {"y": 1, "x": 2}, "a": 1});
        assert_eq!(canonical_json(&v), r#"{"a":1,"z":{"x":2,"y":1}}"#);
    }

    #[test]
    fn hash_changes_on_any_byte_change() {
        let a = json!({"a": 1});
        let b = json!({"a": 2});
        assert_ne!(sha256_canonical(&a), sha256_canonical(&b));
    }

    #[test]
    fn key_order_does_not_affect_hash() {
        let a = json!({"a": 1, "b": 2});
        let b = json!({"b": 2, "a": 1});
        assert_eq!(sha256_canonical(&a), sha256_canonical(&b));
    }
}
