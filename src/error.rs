//! Error types for version retention

use std::path::PathBuf;

use thiserror::Error;

/// Result type for catalog and retention operations
pub type Result<T> = std::result::Result<T, Error>;

/// Version catalog errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("Version name cannot be empty, must specify a name or a fully qualified path")]
    EmptyName,

    #[error("Name [{name}] did not start with the specified prefix [{prefix}]")]
    PrefixMismatch { name: String, prefix: String },

    #[error("Invalid semantic version [{text}]: {source}")]
    InvalidVersion {
        text: String,
        #[source]
        source: semver::Error,
    },

    #[error("The directory [{}] could not be found", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("The version catalog has not been initialized")]
    NotInitialized,

    #[error("Invalid age: {0}")]
    InvalidAge(String),

    #[error("Invalid name pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

impl Error {
    /// Whether this error was caused by a malformed version name
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Error::EmptyName | Error::PrefixMismatch { .. } | Error::InvalidVersion { .. }
        )
    }
}
