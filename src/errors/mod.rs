use std::fmt;
use std::path::PathBuf;

/// Failures of the fallible surfaces around the counter.
///
/// Counting itself cannot fail; these come from strict construction, config
/// handling and argument parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountError {
    NegativeBound { max_number: i32 },
    ConfigRead { path: PathBuf, message: String },
    ConfigParse { message: String },
    ConfigWrite { path: PathBuf, message: String },
    InvalidArgument { message: String },
}

impl CountError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument { message: message.into() }
    }
}

impl fmt::Display for CountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeBound { max_number } => {
                write!(f, "Negative bound rejected in strict mode: maxNumber = {}", max_number)
            }
            Self::ConfigRead { path, message } => {
                write!(f, "Failed to read config {}: {}", path.display(), message)
            }
            Self::ConfigParse { message } => {
                write!(f, "Failed to parse config: {}", message)
            }
            Self::ConfigWrite { path, message } => {
                write!(f, "Failed to write config {}: {}", path.display(), message)
            }
            Self::InvalidArgument { message } => {
                write!(f, "Invalid argument: {}", message)
            }
        }
    }
}

impl std::error::Error for CountError {}
