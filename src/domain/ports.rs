use crate::domain::model::{Document, FlatMapping, OutputFormat, Record};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// Where documents come from and where rendered output goes.
pub trait Storage {
    fn exists(&self, path: &Path) -> bool;
    fn read_to_string(&self, path: &Path) -> Result<String>;
    /// Must either write all of `data` or leave the destination untouched.
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &Path;
    fn output_path(&self) -> &Path;
    fn root_key(&self) -> Option<&str>;
    fn output_format(&self) -> OutputFormat;
}

pub trait Pipeline {
    fn validate_input(&self) -> Result<()>;
    fn read(&self) -> Result<Document>;
    fn extract(&self, document: &Document) -> Result<Vec<Record>>;
    fn transform(&self, records: Vec<Record>) -> Result<FlatMapping>;
    fn load(&self, mapping: FlatMapping) -> Result<PathBuf>;
}
