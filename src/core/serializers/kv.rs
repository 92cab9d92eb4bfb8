use crate::domain::model::FlatMapping;
use crate::utils::error::Result;
use std::io::Write;

/// One `key=value` line per entry in mapping order, newline terminated.
///
/// The root key has no meaning for this format and is ignored.
pub fn write_kv<W: Write>(mapping: &FlatMapping, root_key: Option<&str>, mut writer: W) -> Result<()> {
    if root_key.is_some_and(|key| !key.is_empty()) {
        tracing::warn!("Root key will be ignored when saving in raw key-value text format");
    }

    let lines: Vec<String> = mapping
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect();

    writer.write_all(lines.join("\n").as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Record;

    fn render(mapping: &FlatMapping, root_key: Option<&str>) -> String {
        let mut out = Vec::new();
        write_kv(mapping, root_key, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_lines_follow_mapping_order() {
        let mapping: FlatMapping = vec![
            Record::new("host", "localhost"),
            Record::new("port", "5432"),
            Record::new("host", "db.internal"),
        ]
        .into_iter()
        .collect();

        assert_eq!(render(&mapping, None), "host=db.internal\nport=5432\n");
    }

    #[test]
    fn test_root_key_has_no_effect() {
        let mapping: FlatMapping = vec![Record::new("a", "1")].into_iter().collect();
        assert_eq!(render(&mapping, Some("db")), render(&mapping, None));
    }

    #[test]
    fn test_empty_mapping_writes_single_newline() {
        assert_eq!(render(&FlatMapping::new(), None), "\n");
    }
}
