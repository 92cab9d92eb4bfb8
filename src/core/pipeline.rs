use crate::core::extractor;
use crate::core::serializers;
use crate::core::{ConfigProvider, Document, FlatMapping, Pipeline, Record, Storage};
use crate::utils::error::{ConvertError, Result};
use std::io::ErrorKind;
use std::path::PathBuf;

pub struct ConvertPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ConvertPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for ConvertPipeline<S, C> {
    fn validate_input(&self) -> Result<()> {
        let input = self.config.input_path();
        if !self.storage.exists(input) {
            return Err(ConvertError::InputNotFound {
                path: input.to_path_buf(),
            });
        }
        Ok(())
    }

    fn read(&self) -> Result<Document> {
        let input = self.config.input_path();
        let content = self.storage.read_to_string(input).map_err(|e| match e {
            ConvertError::IoError(io) if io.kind() == ErrorKind::InvalidData => {
                ConvertError::ParseError {
                    path: input.to_path_buf(),
                    message: io.to_string(),
                }
            }
            other => other,
        })?;
        tracing::debug!("Read {} bytes from {}", content.len(), input.display());

        let document: Document =
            serde_yaml::from_str(&content).map_err(|e| ConvertError::ParseError {
                path: input.to_path_buf(),
                message: e.to_string(),
            })?;

        tracing::debug!("YAML file content: {:?}", document);
        Ok(document)
    }

    fn extract(&self, document: &Document) -> Result<Vec<Record>> {
        extractor::extract(document)?.collect()
    }

    fn transform(&self, records: Vec<Record>) -> Result<FlatMapping> {
        Ok(records.into_iter().collect())
    }

    fn load(&self, mapping: FlatMapping) -> Result<PathBuf> {
        let format = self.config.output_format();
        let output = self.config.output_path();

        let rendered = serializers::serialize(format, &mapping, self.config.root_key())?;
        tracing::debug!(
            "Rendered {} entries as {} ({} bytes)",
            mapping.len(),
            format,
            rendered.len()
        );

        self.storage.write_file(output, &rendered)?;
        Ok(output.to_path_buf())
    }
}
