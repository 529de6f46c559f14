//! Loader for `.properties` files.
//!
//! Supports `#`/`!` comments, `=`/`:`/whitespace separators, backslash line
//! continuations and the `\t \n \r \f \uXXXX` escapes.

use std::collections::BTreeMap;

use super::PropertySourceLoader;
use crate::loader::LoadError;
use crate::resource::Resource;
use crate::types::PropertySource;

/// Loads `key=value` files into a single property source.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertiesLoader;

impl PropertySourceLoader for PropertiesLoader {
    fn id(&self) -> &str {
        "properties"
    }

    fn file_extensions(&self) -> &[&str] {
        &["properties"]
    }

    fn load(&self, name: &str, resource: &dyn Resource) -> Result<Vec<PropertySource>, LoadError> {
        let content = resource.read_to_string()?;
        let properties = parse_properties(&content)?;
        if properties.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![PropertySource::from_map(name, properties)])
    }
}

/// Parse `.properties` content. Later duplicates of a key win.
pub fn parse_properties(content: &str) -> Result<BTreeMap<String, String>, LoadError> {
    let mut properties = BTreeMap::new();
    let mut logical = String::new();
    let mut start_line = 0;

    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim_start();
        if logical.is_empty() {
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            start_line = index + 1;
        }
        if ends_with_continuation(line) {
            logical.push_str(&line[..line.len() - 1]);
            continue;
        }
        logical.push_str(line);
        let (key, value) = split_entry(&logical, start_line)?;
        properties.insert(key, value);
        logical.clear();
    }
    if !logical.is_empty() {
        let (key, value) = split_entry(&logical, start_line)?;
        properties.insert(key, value);
    }
    Ok(properties)
}

fn ends_with_continuation(line: &str) -> bool {
    let trailing = line.chars().rev().take_while(|c| *c == '\\').count();
    trailing % 2 == 1
}

fn split_entry(logical: &str, line: usize) -> Result<(String, String), LoadError> {
    let chars: Vec<char> = logical.chars().collect();
    let mut key_end = 0;
    while key_end < chars.len() {
        let c = chars[key_end];
        if c == '\\' {
            key_end += 2;
            continue;
        }
        if c == '=' || c == ':' || c.is_whitespace() {
            break;
        }
        key_end += 1;
    }
    let key_end = key_end.min(chars.len());

    let mut value_start = key_end;
    while value_start < chars.len() && chars[value_start].is_whitespace() {
        value_start += 1;
    }
    if value_start < chars.len() && matches!(chars[value_start], '=' | ':') {
        value_start += 1;
    }
    while value_start < chars.len() && chars[value_start].is_whitespace() {
        value_start += 1;
    }

    Ok((
        unescape(&chars[..key_end], line)?,
        unescape(&chars[value_start..], line)?,
    ))
}

fn unescape(chars: &[char], line: usize) -> Result<String, LoadError> {
    let mut out = String::with_capacity(chars.len());
    let mut iter = chars.iter().copied();
    while let Some(c) = iter.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match iter.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let hex: String = iter.by_ref().take(4).collect();
                let code = (hex.len() == 4)
                    .then(|| u32::from_str_radix(&hex, 16).ok())
                    .flatten()
                    .ok_or_else(|| LoadError::Properties {
                        line,
                        message: format!("malformed \\uxxxx encoding '\\u{hex}'"),
                    })?;
                out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}
