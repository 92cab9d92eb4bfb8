use crate::utils::error::ConvertError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Decoded input tree. YAML is a superset of JSON, so both parse into this.
pub type Document = serde_yaml::Value;

/// One `{key, value}` entry of `config.data`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub key: String,
    pub value: String,
}

impl Record {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Flat key/value result of extraction.
///
/// Iteration follows first-seen key order; a repeated key overwrites the value
/// in place. Equality ignores order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlatMapping {
    entries: IndexMap<String, String>,
}

impl FlatMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the previous value when the key was already present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Folds records into a mapping, stopping at the first error.
    pub fn from_records<I>(records: I) -> crate::Result<Self>
    where
        I: IntoIterator<Item = crate::Result<Record>>,
    {
        records.into_iter().collect()
    }
}

impl Extend<Record> for FlatMapping {
    fn extend<T: IntoIterator<Item = Record>>(&mut self, iter: T) {
        for record in iter {
            if let Some(previous) = self.entries.get(&record.key) {
                tracing::debug!(
                    "Duplicate key '{}', replacing '{}' with '{}'",
                    record.key,
                    previous,
                    record.value
                );
            }
            self.entries.insert(record.key, record.value);
        }
    }
}

impl FromIterator<Record> for FlatMapping {
    fn from_iter<T: IntoIterator<Item = Record>>(iter: T) -> Self {
        let mut mapping = FlatMapping::new();
        mapping.extend(iter);
        mapping
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Yaml,
    /// INI-style, one section named after the root key
    Config,
    /// Plain `key=value` lines
    Kv,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Yaml => "yaml",
            OutputFormat::Config => "config",
            OutputFormat::Kv => "kv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yaml" => Ok(OutputFormat::Yaml),
            "config" => Ok(OutputFormat::Config),
            "kv" => Ok(OutputFormat::Kv),
            other => Err(ConvertError::config(format!(
                "Output format '{}' is not supported",
                other
            ))),
        }
    }
}

/// Progress of a single conversion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    NotStarted,
    InputValidated,
    Loaded,
    Extracted,
    Serialized,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::NotStarted => "not started",
            Stage::InputValidated => "input validated",
            Stage::Loaded => "loaded",
            Stage::Extracted => "extracted",
            Stage::Serialized => "serialized",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_duplicate_wins_and_keeps_position() {
        let mapping: FlatMapping = vec![
            Record::new("host", "a"),
            Record::new("port", "1"),
            Record::new("host", "b"),
        ]
        .into_iter()
        .collect();

        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get("host"), Some("b"));
        let keys: Vec<&str> = mapping.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["host", "port"]);
    }

    #[test]
    fn test_equality_ignores_order() {
        let mut a = FlatMapping::new();
        a.insert("x", "1");
        a.insert("y", "2");
        let mut b = FlatMapping::new();
        b.insert("y", "2");
        b.insert("x", "1");
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_records_stops_on_error() {
        let records = vec![
            Ok(Record::new("a", "1")),
            Err(ConvertError::extraction("config.data[1]", "not a mapping")),
            Ok(Record::new("b", "2")),
        ];
        assert!(FlatMapping::from_records(records).is_err());
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("yaml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert_eq!("config".parse::<OutputFormat>().unwrap(), OutputFormat::Config);
        assert_eq!("kv".parse::<OutputFormat>().unwrap(), OutputFormat::Kv);

        let err = "xml".parse::<OutputFormat>().unwrap_err();
        assert!(err.to_string().contains("Output format 'xml' is not supported"));
        assert_eq!(OutputFormat::default(), OutputFormat::Yaml);
    }
}
