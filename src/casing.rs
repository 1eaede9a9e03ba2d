//! Key casing conversion at the request/response boundary
//!
//! The API speaks `snake_case`; callers may build bodies with `camelCase`
//! keys. These are pure mappings over JSON values, recursing through nested
//! objects and arrays. Values are never touched, only object keys.

use crate::types::{JsonObject, JsonValue};

/// Convert a single identifier from camelCase to snake_case
///
/// `perPage` -> `per_page`, `HTMLUrl` -> `html_url`. Identifiers that are
/// already snake_case pass through unchanged.
pub fn decamelize(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary && prev != '_' {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }

    out
}

/// Convert a single identifier from snake_case or kebab-case to camelCase
pub fn camelize(key: &str) -> String {
    // Purely numeric keys are left alone
    if !key.is_empty() && key.chars().all(|c| c.is_ascii_digit()) {
        return key.to_string();
    }

    let mut out = String::with_capacity(key.len());
    let mut upper_next = false;

    for c in key.chars() {
        if c == '_' || c == '-' || c.is_whitespace() {
            upper_next = !out.is_empty();
            continue;
        }
        if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else if out.is_empty() {
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}

/// Recursively rename object keys to snake_case
pub fn decamelize_keys(value: JsonValue) -> JsonValue {
    map_keys(value, &decamelize)
}

/// Recursively rename object keys to camelCase
pub fn camelize_keys(value: JsonValue) -> JsonValue {
    map_keys(value, &camelize)
}

fn map_keys(value: JsonValue, f: &dyn Fn(&str) -> String) -> JsonValue {
    match value {
        JsonValue::Object(map) => {
            let renamed: JsonObject = map
                .into_iter()
                .map(|(k, v)| (f(&k), map_keys(v, f)))
                .collect();
            JsonValue::Object(renamed)
        }
        JsonValue::Array(items) => {
            JsonValue::Array(items.into_iter().map(|v| map_keys(v, f)).collect())
        }
        other => other,
    }
}
