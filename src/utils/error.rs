use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Can't find input file {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("Failed to parse '{}': {message}", path.display())]
    ParseError { path: PathBuf, message: String },

    #[error("Unexpected document shape at '{location}': {message}")]
    ExtractionError { location: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Config file error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ConvertError {
    pub fn config(message: impl Into<String>) -> Self {
        ConvertError::ConfigError {
            message: message.into(),
        }
    }

    pub fn extraction(location: impl Into<String>, message: impl Into<String>) -> Self {
        ConvertError::ExtractionError {
            location: location.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ConvertError::InputNotFound { .. } => ErrorCategory::Input,
            ConvertError::ParseError { .. }
            | ConvertError::ExtractionError { .. }
            | ConvertError::SerializationError(_) => ErrorCategory::Data,
            ConvertError::ConfigError { .. }
            | ConvertError::MissingConfigError { .. }
            | ConvertError::InvalidConfigValueError { .. }
            | ConvertError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            ConvertError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Process exit code reported by the binary. Every failure is non-zero.
    pub fn exit_code(&self) -> i32 {
        match self {
            ConvertError::InputNotFound { .. } => -1,
            _ => match self.category() {
                ErrorCategory::Configuration => 2,
                ErrorCategory::System => 3,
                _ => 1,
            },
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ConvertError::InputNotFound { .. } => "Check the --input path",
            ConvertError::ParseError { .. } => "Make sure the input is valid YAML or JSON",
            ConvertError::ExtractionError { .. } => {
                "The input must contain config.data as a list of {key, value} entries"
            }
            ConvertError::ConfigError { .. } => {
                "Use --root-key with the config format, or pick one of: yaml, config, kv"
            }
            ConvertError::MissingConfigError { .. } => {
                "Pass the value on the command line or set it in the [convert] table of the config file"
            }
            ConvertError::InvalidConfigValueError { .. } => "Fix the value and run again",
            ConvertError::ConfigValidationError { .. } => "Check the config file syntax",
            ConvertError::SerializationError(_) => "Check the extracted keys and values",
            ConvertError::IoError(_) => "Check permissions and free space for the output path",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ConvertError::InputNotFound { path } => {
                format!("Input file not found: {}", path.display())
            }
            ConvertError::IoError(e) => format!("File operation failed: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
