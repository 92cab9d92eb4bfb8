use crate::utils::error::{ConvertError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let as_text = path.to_string_lossy();

    if as_text.is_empty() {
        return Err(ConvertError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: as_text.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if as_text.contains('\0') {
        return Err(ConvertError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: as_text.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| ConvertError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConvertError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}
