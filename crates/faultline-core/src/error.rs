//! Error types for the Faultline core library
//!
//! These are content, resource-loading and I/O failures. Client-caused
//! failures are not errors in this sense; they are [`Fault`](crate::Fault)
//! values and carry their own localized messages.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Faultline operations
#[derive(Error, Debug)]
pub enum Error {
    /// An outcome was assembled with a content flag that disagrees with its value
    #[error("Content mismatch: {message}")]
    ContentMismatch { message: String },

    /// A resource catalog file could not be loaded
    #[error("Failed to load resources from {}: {message}", path.display())]
    ResourceLoad { path: PathBuf, message: String },

    /// A JSON resource file that is not a map of strings
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// A YAML resource file that is not a map of strings
    #[error("YAML error: {message}")]
    Yaml {
        message: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a resource loading error
    pub fn resource_load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::ResourceLoad {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}
