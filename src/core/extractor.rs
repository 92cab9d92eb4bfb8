//! Locates `config.data` in a parsed document and yields its `{key, value}` entries.
//!
//! Missing or empty sections are not errors: a warning is logged and nothing is
//! yielded. A section that exists but has the wrong shape is reported as an
//! [`ConvertError::ExtractionError`] naming the offending location.

use crate::domain::model::{Document, Record};
use crate::utils::error::{ConvertError, Result};
use serde_yaml::Value;
use std::iter::Enumerate;
use std::slice;

const CONFIG_FIELD: &str = "config";
const DATA_FIELD: &str = "data";
const KEY_FIELD: &str = "key";
const VALUE_FIELD: &str = "value";

/// Single pass over the entries of `config.data`, in document order.
pub struct Extractor<'a> {
    items: Enumerate<slice::Iter<'a, Value>>,
}

impl<'a> Extractor<'a> {
    fn over(items: &'a [Value]) -> Self {
        Self {
            items: items.iter().enumerate(),
        }
    }

    fn empty() -> Self {
        Self::over(<&[Value]>::default())
    }
}

impl Iterator for Extractor<'_> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.items
            .next()
            .map(|(index, item)| record_from_item(index, item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

pub fn extract(document: &Document) -> Result<Extractor<'_>> {
    let root = match document {
        Value::Null => {
            tracing::warn!("Input document is empty, no '{}' key", CONFIG_FIELD);
            return Ok(Extractor::empty());
        }
        Value::Mapping(root) => root,
        other => {
            return Err(ConvertError::extraction(
                "<document>",
                format!("expected a mapping, found {}", describe(other)),
            ))
        }
    };

    let config = match root.get(CONFIG_FIELD) {
        Some(config) if is_truthy(config) => config,
        _ => {
            tracing::warn!("No '{}' key in config file", CONFIG_FIELD);
            return Ok(Extractor::empty());
        }
    };

    let config = config.as_mapping().ok_or_else(|| {
        ConvertError::extraction(
            CONFIG_FIELD,
            format!("expected a mapping, found {}", describe(config)),
        )
    })?;

    let data = match config.get(DATA_FIELD) {
        Some(data) if is_truthy(data) => data,
        _ => {
            tracing::warn!("No '{}' key in config file", DATA_FIELD);
            return Ok(Extractor::empty());
        }
    };

    let items = data.as_sequence().ok_or_else(|| {
        ConvertError::extraction(
            "config.data",
            format!("expected a sequence, found {}", describe(data)),
        )
    })?;

    tracing::debug!("Found {} entries under config.data", items.len());
    Ok(Extractor::over(items))
}

fn record_from_item(index: usize, item: &Value) -> Result<Record> {
    let location = format!("config.data[{}]", index);
    let entry = item.as_mapping().ok_or_else(|| {
        ConvertError::extraction(
            location.as_str(),
            format!("expected a mapping, found {}", describe(item)),
        )
    })?;

    let key = scalar_text(entry.get(KEY_FIELD), &location, KEY_FIELD)?;
    let value = scalar_text(entry.get(VALUE_FIELD), &location, VALUE_FIELD)?;
    tracing::debug!("key = '{}', value = '{}'", key, value);

    Ok(Record { key, value })
}

/// Absent and null fields become empty text.
fn scalar_text(field: Option<&Value>, location: &str, name: &str) -> Result<String> {
    match field {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(ConvertError::extraction(
            format!("{}.{}", location, name),
            format!("expected a scalar, found {}", describe(other)),
        )),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(seq) => !seq.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        Value::Tagged(_) => true,
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::FlatMapping;

    fn parse(yaml: &str) -> Document {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn records(yaml: &str) -> Result<Vec<Record>> {
        let document = parse(yaml);
        extract(&document)?.collect()
    }

    #[test]
    fn test_extracts_pairs_in_order() {
        let found = records(
            r#"
config:
  data:
    - {key: host, value: localhost}
    - {key: port, value: "5432"}
"#,
        )
        .unwrap();

        assert_eq!(
            found,
            vec![Record::new("host", "localhost"), Record::new("port", "5432")]
        );
    }

    #[test]
    fn test_missing_sections_yield_nothing() {
        for yaml in [
            "~",
            "other: 1",
            "config: ~",
            "config: {}",
            "config:\n  other: 1",
            "config:\n  data: []",
            "config:\n  data: ~",
        ] {
            assert!(records(yaml).unwrap().is_empty(), "input: {:?}", yaml);
        }
    }

    #[test]
    fn test_missing_fields_become_empty_text() {
        let found = records(
            r#"
config:
  data:
    - {key: only_key}
    - {value: only_value}
    - {key: nothing, value: ~}
"#,
        )
        .unwrap();

        assert_eq!(
            found,
            vec![
                Record::new("only_key", ""),
                Record::new("", "only_value"),
                Record::new("nothing", ""),
            ]
        );
    }

    #[test]
    fn test_non_string_scalars_become_text() {
        let found = records(
            r#"
config:
  data:
    - {key: port, value: 5432}
    - {key: debug, value: true}
    - {key: ratio, value: 1.5}
"#,
        )
        .unwrap();

        assert_eq!(found[0].value, "5432");
        assert_eq!(found[1].value, "true");
        assert_eq!(found[2].value, "1.5");
    }

    #[test]
    fn test_shape_mismatches_are_errors() {
        let cases = [
            ("- a\n- b", "<document>"),
            ("config: [1, 2]", "config"),
            ("config:\n  data: text", "config.data"),
            ("config:\n  data:\n    - just-a-string", "config.data[0]"),
            (
                "config:\n  data:\n    - {key: a, value: [1, 2]}",
                "config.data[0].value",
            ),
        ];

        for (yaml, expected_location) in cases {
            match records(yaml) {
                Err(ConvertError::ExtractionError { location, .. }) => {
                    assert_eq!(location, expected_location, "input: {:?}", yaml)
                }
                other => panic!("expected extraction error for {:?}, got {:?}", yaml, other),
            }
        }
    }

    #[test]
    fn test_builds_mapping_with_last_duplicate_winning() {
        let document = parse(
            r#"
config:
  data:
    - {key: host, value: first}
    - {key: port, value: "1"}
    - {key: host, value: second}
"#,
        );

        let mapping = FlatMapping::from_records(extract(&document).unwrap()).unwrap();
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get("host"), Some("second"));
    }
}
