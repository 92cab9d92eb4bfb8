pub mod cli;
pub mod toml_config;

use crate::core::{ConfigProvider, OutputFormat};
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
use crate::utils::validation::validate_required_field;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "config-convert")]
#[command(about = "Flatten config.data key/value entries into YAML, INI or key=value text")]
pub struct CliConfig {
    /// Input file path
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Output file path
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Root key in output file
    #[arg(long)]
    pub root_key: Option<String>,

    /// Output format [default: yaml]
    #[arg(long, value_enum)]
    pub output_format: Option<OutputFormat>,

    /// TOML file with defaults for any of the options above
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Log process CPU and memory usage per stage")]
    pub monitor: bool,
}

/// Fully resolved settings for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub root_key: Option<String>,
    pub output_format: OutputFormat,
    pub verbose: bool,
    pub json_logs: bool,
    pub monitor: bool,
}

impl ConvertConfig {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            root_key: None,
            output_format: OutputFormat::default(),
            verbose: false,
            json_logs: false,
            monitor: false,
        }
    }

    pub fn with_root_key(mut self, root_key: impl Into<String>) -> Self {
        self.root_key = Some(root_key.into());
        self
    }

    pub fn with_output_format(mut self, output_format: OutputFormat) -> Self {
        self.output_format = output_format;
        self
    }

    /// Merges command-line values over the optional config file.
    #[cfg(feature = "cli")]
    pub fn resolve(cli: &CliConfig, file: Option<&TomlConfig>) -> Result<Self> {
        let defaults = file.cloned().unwrap_or_default();

        let input = cli.input.clone().or(defaults.convert.input.clone());
        let output = cli.output.clone().or(defaults.convert.output.clone());
        let input = validate_required_field("input", &input)?.clone();
        let output = validate_required_field("output", &output)?.clone();

        let output_format = match cli.output_format {
            Some(format) => format,
            None => defaults.output_format()?.unwrap_or_default(),
        };

        Ok(Self {
            input,
            output,
            root_key: cli.root_key.clone().or(defaults.convert.root_key.clone()),
            output_format,
            verbose: cli.verbose || defaults.verbose(),
            json_logs: cli.json_logs || defaults.json_logs(),
            monitor: cli.monitor || defaults.monitoring_enabled(),
        })
    }

    /// Loads the file named by `--config`, if any, and resolves against it.
    #[cfg(feature = "cli")]
    pub fn from_cli(cli: &CliConfig) -> Result<Self> {
        let file = cli.config.as_ref().map(TomlConfig::from_file).transpose()?;
        Self::resolve(cli, file.as_ref())
    }
}

impl ConfigProvider for ConvertConfig {
    fn input_path(&self) -> &Path {
        &self.input
    }

    fn output_path(&self) -> &Path {
        &self.output
    }

    fn root_key(&self) -> Option<&str> {
        self.root_key.as_deref()
    }

    fn output_format(&self) -> OutputFormat {
        self.output_format
    }
}

impl Validate for ConvertConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;
        validate_path("output", &self.output)?;
        if let Some(root_key) = &self.root_key {
            validate_non_empty_string("root_key", root_key)?;
        }
        Ok(())
    }
}
