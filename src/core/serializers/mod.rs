//! Output encoders. Each format is a standalone function over a [`FlatMapping`];
//! [`serialize`] picks one for an [`OutputFormat`] and buffers the result.

pub mod ini;
pub mod kv;
pub mod yaml;

pub use ini::write_ini;
pub use kv::write_kv;
pub use yaml::write_yaml;

use crate::domain::model::{FlatMapping, OutputFormat};
use crate::utils::error::Result;

pub fn serialize(format: OutputFormat, mapping: &FlatMapping, root_key: Option<&str>) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    match format {
        OutputFormat::Yaml => write_yaml(mapping, root_key, &mut buffer)?,
        OutputFormat::Config => write_ini(mapping, root_key, &mut buffer)?,
        OutputFormat::Kv => write_kv(mapping, root_key, &mut buffer)?,
    }
    Ok(buffer)
}
