use crate::core::OutputFormat;
use crate::utils::error::{ConvertError, Result};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Optional defaults file. Every value can be overridden on the command line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub convert: ConvertSection,
    pub logging: Option<LoggingConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConvertSection {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub root_key: Option<String>,
    pub output_format: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ConvertError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CONFIG_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ConvertError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn output_format(&self) -> Result<Option<OutputFormat>> {
        self.convert
            .output_format
            .as_deref()
            .map(str::parse::<OutputFormat>)
            .transpose()
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}
