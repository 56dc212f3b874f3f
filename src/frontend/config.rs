use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::CountError;
use crate::infrastructure::{parse_directives, parse_level, LogConfig, LogFormat, LogOutput};

/// File name searched for by `Config::discover`
pub const CONFIG_FILE_NAME: &str = ".countlibrc.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub counter: CounterConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterConfig {
    #[serde(default = "default_max_number")]
    pub max_number: i32,

    #[serde(default = "default_false")]
    pub debug_enable: bool,

    /// Reject negative bounds instead of running zero iterations
    #[serde(default = "default_false")]
    pub strict: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: FormatName,

    #[serde(default)]
    pub output: OutputName,

    #[serde(default = "default_log_dir")]
    pub directory: String,

    #[serde(default = "default_log_prefix")]
    pub prefix: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatName {
    Pretty,
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputName {
    Stdout,
    #[default]
    Stderr,
    File,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            max_number: default_max_number(),
            debug_enable: false,
            strict: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: FormatName::default(),
            output: OutputName::default(),
            directory: default_log_dir(),
            prefix: default_log_prefix(),
            filter: None,
        }
    }
}

fn default_max_number() -> i32 { 10 }
fn default_false() -> bool { false }
fn default_level() -> String { "info".to_string() }
fn default_log_dir() -> String { "logs".to_string() }
fn default_log_prefix() -> String { "countlib".to_string() }

impl From<FormatName> for LogFormat {
    fn from(name: FormatName) -> Self {
        match name {
            FormatName::Pretty => LogFormat::Pretty,
            FormatName::Compact => LogFormat::Compact,
            FormatName::Json => LogFormat::Json,
        }
    }
}

impl From<LogFormat> for FormatName {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Pretty => FormatName::Pretty,
            LogFormat::Compact => FormatName::Compact,
            LogFormat::Json => FormatName::Json,
        }
    }
}

impl LoggingConfig {
    pub fn to_log_config(&self) -> Result<LogConfig, CountError> {
        let output = match self.output {
            OutputName::Stdout => LogOutput::Stdout,
            OutputName::Stderr => LogOutput::Stderr,
            OutputName::File => LogOutput::File {
                directory: self.directory.clone(),
                prefix: self.prefix.clone(),
            },
        };

        let mut config = LogConfig::new()
            .with_level(parse_level(&self.level)?)
            .with_format(self.format.into())
            .with_output(output);

        if let Some(filter) = &self.filter {
            parse_directives(filter)?;
            config = config.with_filter(filter.clone());
        }
        Ok(config)
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, CountError> {
        let content = fs::read_to_string(path).map_err(|e| CountError::ConfigRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string
    pub fn parse(content: &str) -> Result<Self, CountError> {
        toml::from_str(content).map_err(|e| CountError::ConfigParse {
            message: e.to_string(),
        })
    }

    /// Walk from `start` up to the filesystem root, returning the first
    /// config file found.
    pub fn find_file(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .find(|candidate| candidate.is_file())
    }

    /// Load the nearest config above the current directory, or defaults.
    ///
    /// An unreadable or malformed file is skipped with a warning.
    pub fn discover() -> Self {
        let Some(path) = std::env::current_dir().ok().and_then(|dir| Self::find_file(&dir)) else {
            return Self::default();
        };

        match Self::load(&path) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "Loaded config");
                config
            }
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring config file");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), CountError> {
        let content = toml::to_string_pretty(self).map_err(|e| CountError::ConfigWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        fs::write(path, content).map_err(|e| CountError::ConfigWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
