//! Error types for pstore-fs

use std::path::PathBuf;

/// Result type for pstore-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or writing local files
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} document at {path}: {message}")]
    DocumentParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Document at {path} must be a flat mapping of parameter names")]
    NotAMapping { path: PathBuf },

    #[error("Invalid value for {name} in {path}: {reason}")]
    InvalidValue {
        path: PathBuf,
        name: String,
        reason: String,
    },

    #[error("Failed to serialize document: {message}")]
    DocumentSerialize { message: String },

    #[error("Unsupported settings format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
