use crate::domain::model::FlatMapping;
use crate::utils::error::{ConvertError, Result};
use indexmap::IndexMap;
use std::io::Write;

const DEFAULT_SECTION: &str = "DEFAULT";

/// Writes one `[root_key]` section holding every entry as `key = value`.
///
/// Option names are folded to lower case, so keys that differ only by case
/// collapse and the last value wins. Continuation lines of multi-line values
/// are tab-indented. The section is followed by a blank line.
pub fn write_ini<W: Write>(mapping: &FlatMapping, root_key: Option<&str>, mut writer: W) -> Result<()> {
    let section = match root_key {
        Some(key) if !key.is_empty() => key,
        _ => {
            return Err(ConvertError::config(
                "To use INI format you need specify root key",
            ))
        }
    };
    validate_section_name(section)?;

    let mut options: IndexMap<String, &str> = IndexMap::with_capacity(mapping.len());
    for (key, value) in mapping.iter() {
        options.insert(key.to_lowercase(), value);
    }

    let mut out = format!("[{}]\n", section);
    for (key, value) in &options {
        out.push_str(key);
        out.push_str(" = ");
        out.push_str(&value.replace('\n', "\n\t"));
        out.push('\n');
    }
    out.push('\n');

    writer.write_all(out.as_bytes())?;
    writer.flush()?;
    Ok(())
}

fn validate_section_name(section: &str) -> Result<()> {
    if section == DEFAULT_SECTION {
        return Err(ConvertError::config(format!(
            "Invalid section name: '{}' is reserved",
            section
        )));
    }
    if section.contains(['[', ']', '\n', '\r']) {
        return Err(ConvertError::config(format!(
            "Invalid section name: {:?}",
            section
        )));
    }
    Ok(())
}
