use std::path::PathBuf;

use tracing::{debug, error};

use crate::core::{run_counter, Counter, STATUS_OK, TRACE_TARGET};
use crate::errors::CountError;
use crate::frontend::config::Config;
use crate::infrastructure::{init_logging, LogFormat};

/// Exit status for argument, config and strict-mode failures
pub const STATUS_FAILURE: i32 = 1;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliConfig {
    pub max_number: Option<i32>,
    pub debug: bool,
    pub strict: bool,
    pub config_path: Option<PathBuf>,
    pub log_format: Option<LogFormat>,
    pub init_config: Option<PathBuf>,
    pub help: bool,
}

pub struct Cli {
    config: CliConfig,
}

impl Cli {
    pub fn new(config: CliConfig) -> Self {
        Self { config }
    }

    /// Resolve the effective configuration: file (explicit or discovered)
    /// overlaid with command-line flags.
    pub fn resolve(&self) -> Result<Config, CountError> {
        let mut resolved = match &self.config.config_path {
            Some(path) => Config::load(path)?,
            None => Config::discover(),
        };

        if let Some(max_number) = self.config.max_number {
            resolved.counter.max_number = max_number;
        }
        if self.config.debug {
            resolved.counter.debug_enable = true;
        }
        if self.config.strict {
            resolved.counter.strict = true;
        }
        if let Some(format) = self.config.log_format {
            resolved.logging.format = format.into();
        }
        if resolved.counter.debug_enable {
            // Trace lines are DEBUG records; keep them visible whatever the base level
            let directive = format!("{}=debug", TRACE_TARGET);
            resolved.logging.filter = Some(match resolved.logging.filter.take() {
                Some(existing) => format!("{},{}", existing, directive),
                None => directive,
            });
        }

        Ok(resolved)
    }

    pub fn run(&self) -> Result<i32, CountError> {
        if self.config.help {
            println!("{}", usage("countlib"));
            return Ok(STATUS_OK);
        }

        if let Some(path) = &self.config.init_config {
            Config::default().save(path)?;
            println!("Wrote default config to {}", path.display());
            return Ok(STATUS_OK);
        }

        let resolved = self.resolve()?;
        let _guard = init_logging(resolved.logging.to_log_config()?)?;
        self.execute(&resolved)
    }

    /// Run the counter described by an already resolved configuration.
    pub fn execute(&self, resolved: &Config) -> Result<i32, CountError> {
        debug!(
            max_number = resolved.counter.max_number,
            debug_enable = resolved.counter.debug_enable,
            strict = resolved.counter.strict,
            "Configuration resolved"
        );

        let counter = &resolved.counter;
        if !counter.strict {
            return Ok(run_counter(counter.max_number, counter.debug_enable));
        }

        match Counter::try_new_strict(counter.max_number, counter.debug_enable) {
            Ok(strict_counter) => {
                strict_counter.run();
                Ok(STATUS_OK)
            }
            Err(e) => {
                error!(error = %e, "Counter rejected");
                Err(e)
            }
        }
    }
}

pub fn usage(prog: &str) -> String {
    format!(
        "countlib - count from 1 to MAX_NUMBER\n\n\
         USAGE:\n    {} [OPTIONS] [MAX_NUMBER]\n\n\
         OPTIONS:\n    \
         -h, --help                Print help information\n    \
         -d, --debug               Emit a trace line per step\n    \
         --strict                  Reject negative MAX_NUMBER\n    \
         -c, --config <PATH>       Load configuration from PATH\n    \
         --log-format <FORMAT>     pretty, compact or json\n    \
         --init-config <PATH>      Write a default config file and exit",
        prog
    )
}

/// Parse arguments, excluding the program name.
pub fn parse_args<I>(args: I) -> Result<CliConfig, CountError>
where
    I: IntoIterator<Item = String>,
{
    let mut config = CliConfig::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => config.help = true,
            "-d" | "--debug" => config.debug = true,
            "--strict" => config.strict = true,
            "-c" | "--config" => {
                let path = args.next().ok_or_else(|| {
                    CountError::invalid_argument(format!("{} requires an argument", arg))
                })?;
                config.config_path = Some(PathBuf::from(path));
            }
            "--log-format" => {
                let format = args.next().ok_or_else(|| {
                    CountError::invalid_argument("--log-format requires an argument")
                })?;
                config.log_format = Some(format.parse()?);
            }
            "--init-config" => {
                let path = args.next().ok_or_else(|| {
                    CountError::invalid_argument("--init-config requires an argument")
                })?;
                config.init_config = Some(PathBuf::from(path));
            }
            opt if opt.starts_with("--") => {
                return Err(CountError::invalid_argument(format!("Unknown option: {}", opt)));
            }
            value => {
                if config.max_number.is_some() {
                    return Err(CountError::invalid_argument(format!(
                        "Unexpected argument: {}",
                        value
                    )));
                }
                let max_number = value.parse::<i32>().map_err(|_| {
                    CountError::invalid_argument(format!("MAX_NUMBER must be an integer, got '{}'", value))
                })?;
                config.max_number = Some(max_number);
            }
        }
    }

    Ok(config)
}

/// Entry point for the CLI binary
pub fn main() -> i32 {
    let outcome = parse_args(std::env::args().skip(1)).and_then(|config| Cli::new(config).run());

    match outcome {
        Ok(status) => status,
        Err(e) => {
            eprintln!("Error: {}", e);
            if matches!(e, CountError::InvalidArgument { .. }) {
                eprintln!("\n{}", usage("countlib"));
            }
            STATUS_FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_positional_and_flags() {
        let config = parse_args(args(&["-d", "--strict", "7"])).unwrap();
        assert_eq!(config.max_number, Some(7));
        assert!(config.debug);
        assert!(config.strict);
    }

    #[test]
    fn test_parse_negative_bound() {
        let config = parse_args(args(&["-5"])).unwrap();
        assert_eq!(config.max_number, Some(-5));
    }

    #[test]
    fn test_parse_options_with_values() {
        let config = parse_args(args(&["--config", "x.toml", "--log-format", "json"])).unwrap();
        assert_eq!(config.config_path, Some(PathBuf::from("x.toml")));
        assert_eq!(config.log_format, Some(LogFormat::Json));
        assert_eq!(config.max_number, None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(args(&["--config"])).is_err());
        assert!(parse_args(args(&["--frobnicate"])).is_err());
        assert!(parse_args(args(&["ten"])).is_err());
        assert!(parse_args(args(&["1", "2"])).is_err());
        assert!(parse_args(args(&["--log-format", "xml"])).is_err());
    }

    #[test]
    fn test_resolve_overlays_flags() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("countlib.toml");
        std::fs::write(&path, "[counter]\nmax_number = 4\n").unwrap();

        let cli = Cli::new(CliConfig {
            config_path: Some(path.clone()),
            ..CliConfig::default()
        });
        assert_eq!(cli.resolve().unwrap().counter.max_number, 4);

        let cli = Cli::new(CliConfig {
            config_path: Some(path),
            max_number: Some(9),
            debug: true,
            strict: true,
            ..CliConfig::default()
        });
        let resolved = cli.resolve().unwrap();
        assert_eq!(resolved.counter.max_number, 9);
        assert!(resolved.counter.debug_enable);
        assert!(resolved.counter.strict);
        assert_eq!(resolved.logging.level, "info");
        assert_eq!(resolved.logging.filter.as_deref(), Some("countlib::counter=debug"));
    }

    #[test]
    fn test_strict_execute_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("countlib.toml");
        std::fs::write(&path, "").unwrap();

        let cli = Cli::new(CliConfig {
            config_path: Some(path),
            max_number: Some(-1),
            strict: true,
            ..CliConfig::default()
        });
        let resolved = cli.resolve().unwrap();
        assert_eq!(cli.execute(&resolved).unwrap_err(), CountError::NegativeBound { max_number: -1 });

        let relaxed = Config::default();
        assert_eq!(cli.execute(&relaxed).unwrap(), STATUS_OK);
    }

    #[test]
    fn test_init_config_writes_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(".countlibrc.toml");

        let cli = Cli::new(CliConfig { init_config: Some(path.clone()), ..CliConfig::default() });
        assert_eq!(cli.run().unwrap(), STATUS_OK);
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[traced_test]
    #[test]
    fn test_execute_without_debug_is_quiet() {
        let cli = Cli::new(CliConfig::default());
        let mut resolved = Config::default();
        resolved.counter.max_number = 5;

        assert_eq!(cli.execute(&resolved).unwrap(), STATUS_OK);

        assert!(!logs_contain("Printed number"));
        assert!(!logs_contain("Counting finished."));
        logs_assert(|lines: &[&str]| {
            match lines.iter().find(|line| !line.contains("DEBUG") && !line.contains("TRACE")) {
                Some(line) => Err(format!("unexpected record above DEBUG: {}", line)),
                None => Ok(()),
            }
        });
    }

    #[traced_test]
    #[test]
    fn test_execute_with_debug_traces_each_step() {
        let cli = Cli::new(CliConfig::default());
        let mut resolved = Config::default();
        resolved.counter.max_number = 2;
        resolved.counter.debug_enable = true;

        assert_eq!(cli.execute(&resolved).unwrap(), STATUS_OK);
        assert!(logs_contain("Counter initialized with maxNumber = 2"));
        assert!(logs_contain("Printed number: 2"));
        assert!(logs_contain("Counting finished."));
    }
}
