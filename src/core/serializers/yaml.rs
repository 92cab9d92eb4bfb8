use crate::domain::model::FlatMapping;
use crate::utils::error::Result;
use std::collections::BTreeMap;
use std::io::Write;

/// Writes the mapping as a block-style YAML document with sorted keys,
/// nested under `root_key` when one is given.
pub fn write_yaml<W: Write>(mapping: &FlatMapping, root_key: Option<&str>, writer: W) -> Result<()> {
    let sorted: BTreeMap<&str, &str> = mapping.iter().collect();

    match root_key.filter(|key| !key.is_empty()) {
        Some(root) => {
            let wrapped = BTreeMap::from([(root, sorted)]);
            serde_yaml::to_writer(writer, &wrapped)?;
        }
        None => serde_yaml::to_writer(writer, &sorted)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Record;
    use pretty_assertions::assert_eq;

    fn render(mapping: &FlatMapping, root_key: Option<&str>) -> String {
        let mut out = Vec::new();
        write_yaml(mapping, root_key, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn sample() -> FlatMapping {
        vec![Record::new("port", "5432"), Record::new("host", "localhost")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_top_level_mapping_is_sorted() {
        assert_eq!(render(&sample(), None), "host: localhost\nport: '5432'\n");
    }

    #[test]
    fn test_root_key_wraps_mapping() {
        assert_eq!(
            render(&sample(), Some("db")),
            "db:\n  host: localhost\n  port: '5432'\n"
        );
    }

    #[test]
    fn test_empty_root_key_is_treated_as_absent() {
        assert_eq!(render(&sample(), Some("")), render(&sample(), None));
    }

    #[test]
    fn test_round_trip_preserves_mapping() {
        let mapping: FlatMapping = vec![
            Record::new("host", "localhost"),
            Record::new("port", "5432"),
            Record::new("enabled", "true"),
            Record::new("empty", ""),
            Record::new("spaced", "a b: c"),
        ]
        .into_iter()
        .collect();

        let parsed: FlatMapping = serde_yaml::from_str(&render(&mapping, None)).unwrap();
        assert_eq!(parsed, mapping);
    }

    #[test]
    fn test_empty_mapping() {
        assert_eq!(render(&FlatMapping::new(), None), "{}\n");
    }
}
