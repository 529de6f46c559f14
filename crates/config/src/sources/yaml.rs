//! Loader for `.yml` / `.yaml` files.
//!
//! Each `---` separated document becomes its own property source. Nested
//! mappings are flattened to dotted keys and sequences to `key[i]`.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_yaml::Value;

use super::PropertySourceLoader;
use crate::loader::LoadError;
use crate::resource::Resource;
use crate::types::PropertySource;

/// Loads (multi-document) YAML files.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlLoader;

impl PropertySourceLoader for YamlLoader {
    fn id(&self) -> &str {
        "yaml"
    }

    fn file_extensions(&self) -> &[&str] {
        &["yml", "yaml"]
    }

    fn load(&self, name: &str, resource: &dyn Resource) -> Result<Vec<PropertySource>, LoadError> {
        let content = resource.read_to_string()?;
        let mut documents = Vec::new();
        for document in serde_yaml::Deserializer::from_str(&content) {
            let value = Value::deserialize(document)?;
            // Empty documents (a bare `---` or a blank file) carry nothing.
            if let Value::Mapping(_) | Value::Tagged(_) = value {
                documents.push(flatten_yaml(&value));
            }
        }

        let single = documents.len() == 1;
        Ok(documents
            .into_iter()
            .enumerate()
            .map(|(index, properties)| {
                let source_name = if single {
                    name.to_string()
                } else {
                    format!("{name} (document #{index})")
                };
                PropertySource::from_map(source_name, properties)
            })
            .collect())
    }
}

/// Flatten a YAML value into `a.b[0].c` style keys.
///
/// Scalars become strings, `null` becomes the empty string, and an empty
/// sequence is recorded as an empty value under its own key.
pub fn flatten_yaml(value: &Value) -> BTreeMap<String, String> {
    let mut properties = BTreeMap::new();
    flatten_into(&mut properties, "", value);
    properties
}

fn flatten_into(out: &mut BTreeMap<String, String>, path: &str, value: &Value) {
    match value {
        Value::Mapping(mapping) => {
            for (key, child) in mapping {
                let Some(key) = scalar_to_string(key) else {
                    continue;
                };
                let child_path = if path.is_empty() {
                    key
                } else if key.starts_with('[') {
                    format!("{path}{key}")
                } else {
                    format!("{path}.{key}")
                };
                flatten_into(out, &child_path, child);
            }
        }
        Value::Sequence(items) => {
            if items.is_empty() {
                out.insert(path.to_string(), String::new());
            }
            for (index, item) in items.iter().enumerate() {
                flatten_into(out, &format!("{path}[{index}]"), item);
            }
        }
        Value::Tagged(tagged) => flatten_into(out, path, &tagged.value),
        scalar => {
            if !path.is_empty() {
                out.insert(path.to_string(), scalar_to_string(scalar).unwrap_or_default());
            }
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}
