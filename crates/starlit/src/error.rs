//! Error types for the starlit core crate.

use std::fmt;

/// Result type for starlit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a catalog.
#[derive(Debug)]
pub enum Error {
    /// Reading the dataset source failed.
    Io {
        /// The path or URL that failed.
        source_name: String,
        /// The error message.
        message: String,
    },
    /// The dataset was readable but not valid JSON of the expected shape.
    Parse {
        /// The error message.
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io {
                source_name,
                message,
            } => {
                write!(f, "failed to read {source_name}: {message}")
            }
            Error::Parse { message } => write!(f, "failed to parse catalog: {message}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Parse {
            message: e.to_string(),
        }
    }
}
