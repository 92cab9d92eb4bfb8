pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, ConvertConfig};
pub use crate::core::{etl::EtlEngine, pipeline::ConvertPipeline};
pub use domain::model::{FlatMapping, OutputFormat, Record};
pub use utils::error::{ConvertError, Result};
