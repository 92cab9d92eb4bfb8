pub mod etl;
pub mod extractor;
pub mod pipeline;
pub mod serializers;

pub use crate::domain::model::{Document, FlatMapping, OutputFormat, Record, Stage};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
