use serde_json::{Map, Value};

use crate::{LayoutEntry, LayoutError};

/// Names of `type` values that mark a flat entry as a directory
const DIRECTORY_TYPES: [&str; 3] = ["dir", "folder", "directory"];

/// Parses a JSON layout, either a flat `entries` list or a nested mapping
pub fn parse_json(text: &str) -> Result<Vec<LayoutEntry>, LayoutError> {
    let value: Value = serde_json::from_str(text)?;
    entries_from_value(&value)
}

/// Parses a YAML layout, either a flat `entries` list or a nested mapping
///
/// Scalar keys that are not strings (`2024:`, `true:`) are taken as their text.
pub fn parse_yaml(text: &str) -> Result<Vec<LayoutEntry>, LayoutError> {
    let value: serde_yaml::Value = serde_yaml::from_str(text)?;
    entries_from_value(&yaml_to_json(value))
}

/// The two accepted shapes of a structured layout
#[derive(Debug)]
enum Document<'v> {
    /// `{"entries": [{"path": ..., "type": ..., "content": ...}, ...]}`
    Flat(&'v [Value]),
    /// `{"dir": {"file": "content"}}`, optionally under a `tree` key
    Nested(&'v Map<String, Value>),
}

impl<'v> Document<'v> {
    fn classify(value: &'v Value) -> Result<Self, LayoutError> {
        if let Value::Object(object) = value {
            if object.contains_key("entries") || object.contains_key("root") {
                return match object.get("entries") {
                    Some(Value::Array(entries)) => Ok(Document::Flat(entries)),
                    _ => Err(LayoutError::MissingEntries),
                };
            }
        }
        let mapping = match value {
            Value::Object(object) => object.get("tree").unwrap_or(value),
            _ => value,
        };
        match mapping {
            Value::Object(mapping) => Ok(Document::Nested(mapping)),
            _ => Err(LayoutError::NotAMapping),
        }
    }
}

fn entries_from_value(value: &Value) -> Result<Vec<LayoutEntry>, LayoutError> {
    let mut entries = Vec::new();
    match Document::classify(value)? {
        Document::Flat(records) => {
            for (index, record) in records.iter().enumerate() {
                entries.push(flat_entry(index, record)?);
            }
        }
        Document::Nested(mapping) => walk("", mapping, &mut entries),
    }
    Ok(entries)
}

fn flat_entry(index: usize, record: &Value) -> Result<LayoutEntry, LayoutError> {
    let path = record
        .get("path")
        .and_then(to_text)
        .ok_or(LayoutError::MissingPath { index })?;
    let kind = record
        .get("type")
        .and_then(to_text)
        .map(|kind| kind.to_lowercase());
    let is_directory = path.ends_with('/')
        || kind.is_some_and(|kind| DIRECTORY_TYPES.contains(&kind.as_str()));
    let path = path.trim_end_matches('/');
    Ok(if is_directory {
        LayoutEntry::directory(path)
    } else {
        LayoutEntry::file(path, record.get("content").and_then(to_text))
    })
}

fn walk(prefix: &str, mapping: &Map<String, Value>, entries: &mut Vec<LayoutEntry>) {
    for (key, value) in mapping {
        let name = key.trim_end_matches('/');
        let path = if prefix.is_empty() {
            name.to_owned()
        } else {
            format!("{prefix}/{name}")
        };
        match value {
            Value::Object(children) => {
                entries.push(LayoutEntry::directory(path.clone()));
                walk(&path, children, entries);
            }
            other => entries.push(LayoutEntry::file(path, to_text(other))),
        }
    }
}

/// Text of a value: strings as they are, `null` as nothing, anything else as its JSON
fn to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

fn yaml_to_json(value: serde_yaml::Value) -> Value {
    use serde_yaml::Value as Yaml;
    match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map_or_else(|| Value::String(n.to_string()), Value::Number)
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(seq) => Value::Array(seq.into_iter().map(yaml_to_json).collect()),
        Yaml::Mapping(mapping) => Value::Object(
            mapping
                .into_iter()
                .map(|(key, value)| (yaml_key(key), yaml_to_json(value)))
                .collect(),
        ),
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_key(key: serde_yaml::Value) -> String {
    match yaml_to_json(key) {
        Value::String(key) => key,
        other => other.to_string(),
    }
}
