//! `${...}` placeholder resolution.
//!
//! Supports `${key}`, `${key:fallback}` and placeholders nested inside keys
//! and values. Resolution is lenient: unresolvable and self-referencing
//! placeholders are left in place verbatim.

const PREFIX: &str = "${";
const SUFFIX: char = '}';
const VALUE_SEPARATOR: char = ':';

/// Replace placeholders in `text` using `lookup` for raw values.
pub fn resolve_placeholders(text: &str, lookup: &dyn Fn(&str) -> Option<String>) -> String {
    let mut visiting = Vec::new();
    parse(text, lookup, &mut visiting)
}

fn parse(text: &str, lookup: &dyn Fn(&str) -> Option<String>, visiting: &mut Vec<String>) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(PREFIX) {
        let after = &rest[start + PREFIX.len()..];
        let Some(end) = find_placeholder_end(after) else {
            break;
        };
        result.push_str(&rest[..start]);
        let raw = &after[..end];
        let key = parse(raw, lookup, visiting);
        match resolve_key(&key, lookup, visiting) {
            Some(value) => result.push_str(&value),
            None => {
                result.push_str(PREFIX);
                result.push_str(raw);
                result.push(SUFFIX);
            }
        }
        rest = &after[end + SUFFIX.len_utf8()..];
    }
    result.push_str(rest);
    result
}

fn resolve_key(
    key: &str,
    lookup: &dyn Fn(&str) -> Option<String>,
    visiting: &mut Vec<String>,
) -> Option<String> {
    if visiting.iter().any(|k| k == key) {
        tracing::debug!(placeholder = key, "Circular placeholder reference left unresolved");
        return None;
    }
    let value = lookup(key).or_else(|| {
        let (name, fallback) = key.split_once(VALUE_SEPARATOR)?;
        lookup(name).or_else(|| Some(fallback.to_string()))
    })?;
    visiting.push(key.to_string());
    let resolved = parse(&value, lookup, visiting);
    visiting.pop();
    Some(resolved)
}

/// Byte index of the `}` closing a placeholder whose body starts at `text[0]`.
fn find_placeholder_end(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut index = 0;
    while index < bytes.len() {
        if bytes[index..].starts_with(PREFIX.as_bytes()) {
            depth += 1;
            index += PREFIX.len();
            continue;
        }
        if bytes[index] == SUFFIX as u8 {
            if depth == 0 {
                return Some(index);
            }
            depth -= 1;
        }
        index += 1;
    }
    None
}
