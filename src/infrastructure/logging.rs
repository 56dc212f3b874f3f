//! Logging setup for countlib hosts
//!
//! The counting core only emits `tracing` records. Installing a subscriber is
//! left to whoever owns the process: the command line through `init_logging`,
//! the Python and C adapters through `init_host_logging`.

use once_cell::sync::OnceCell;
use std::str::FromStr;
use tracing::Level;
use tracing_appender::{non_blocking::NonBlocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
    filter::Directive, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

use crate::errors::CountError;

/// Default directive when `RUST_LOG` is unset in a host process
pub const HOST_FILTER: &str = "countlib=debug";

static HOST_LOGGING: OnceCell<bool> = OnceCell::new();

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable, multi-line
    Pretty,
    /// One line per record
    Compact,
    /// JSON objects, one per line
    Json,
}

impl FromStr for LogFormat {
    type Err = CountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(CountError::invalid_argument(format!(
                "unknown log format '{}' (expected pretty, compact or json)",
                other
            ))),
        }
    }
}

/// Log output destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOutput {
    Stdout,
    Stderr,
    /// Daily rotated file
    File { directory: String, prefix: String },
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    pub format: LogFormat,
    pub output: LogOutput,
    /// Extra filter directives, comma separated (e.g. "countlib=trace")
    pub filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::Compact,
            output: LogOutput::Stderr,
            filter: None,
        }
    }
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }
}

/// Parse a level name such as "debug" or "WARN".
pub fn parse_level(s: &str) -> Result<Level, CountError> {
    Level::from_str(s).map_err(|_| {
        CountError::invalid_argument(format!(
            "unknown log level '{}' (expected trace, debug, info, warn or error)",
            s
        ))
    })
}

/// Parse comma separated filter directives such as "countlib=debug,warn".
pub fn parse_directives(filter: &str) -> Result<Vec<Directive>, CountError> {
    filter
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(|d| {
            d.parse::<Directive>().map_err(|e| CountError::ConfigParse {
                message: format!("invalid filter directive '{}': {}", d, e),
            })
        })
        .collect()
}

/// Install the global subscriber described by `config`.
///
/// Returns the writer guard; keep it alive until exit so buffered records are
/// flushed. The guard is `None` if a global subscriber was already installed.
pub fn init_logging(config: LogConfig) -> Result<Option<WorkerGuard>, CountError> {
    let filter = build_filter(&config)?;

    let (writer, guard) = match &config.output {
        LogOutput::Stdout => tracing_appender::non_blocking(std::io::stdout()),
        LogOutput::Stderr => tracing_appender::non_blocking(std::io::stderr()),
        LogOutput::File { directory, prefix } => {
            tracing_appender::non_blocking(rolling::daily(directory, prefix))
        }
    };

    let installed = install(writer, config.format, filter);
    Ok(installed.then_some(guard))
}

fn install(writer: NonBlocking, format: LogFormat, filter: EnvFilter) -> bool {
    let base = fmt::layer().with_writer(writer);

    let result = match format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(base.pretty().with_filter(filter))
            .try_init(),
        LogFormat::Compact => tracing_subscriber::registry()
            .with(base.compact().with_filter(filter))
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(base.json().with_filter(filter))
            .try_init(),
    };

    result.is_ok()
}

fn build_filter(config: &LogConfig) -> Result<EnvFilter, CountError> {
    let base_filter = EnvFilter::from_default_env().add_directive(config.level.into());

    match &config.filter {
        Some(filter_str) => Ok(parse_directives(filter_str)?
            .into_iter()
            .fold(base_filter, |filter, directive| filter.add_directive(directive))),
        None => Ok(base_filter),
    }
}

/// One-shot stderr subscriber for processes countlib does not own.
///
/// Safe to call on every entry-point invocation: only the first call does
/// anything, and an existing global subscriber (installed by the host) is
/// left alone. Writes synchronously so no guard has to outlive the call.
/// Returns whether countlib's subscriber is the active one.
pub fn init_host_logging() -> bool {
    *HOST_LOGGING.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(HOST_FILTER));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .compact()
            .try_init()
            .is_ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = LogConfig::new()
            .with_level(Level::DEBUG)
            .with_format(LogFormat::Json)
            .with_filter("countlib=trace");

        assert_eq!(config.level, Level::DEBUG);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.filter, Some("countlib=trace".to_string()));
        assert_eq!(config.output, LogOutput::Stderr);
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("Pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug").unwrap(), Level::DEBUG);
        assert_eq!(parse_level("WARN").unwrap(), Level::WARN);
        assert!(parse_level("loud").is_err());
    }

    #[test]
    fn test_parse_directives() {
        let directives = parse_directives("countlib=debug, warn,").unwrap();
        assert_eq!(directives.len(), 2);

        let err = parse_directives("countlib=loud").unwrap_err();
        assert!(matches!(err, CountError::ConfigParse { .. }));
        assert!(err.to_string().contains("countlib=loud"));
    }

    #[test]
    fn test_init_logging_rejects_bad_filter() {
        let config = LogConfig::new().with_filter("countlib::counter=loud!!");
        assert!(init_logging(config).is_err());
    }
}
