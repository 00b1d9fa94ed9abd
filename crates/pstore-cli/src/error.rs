//! Error types for pstore-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from pstore-core
    #[error(transparent)]
    Core(#[from] pstore_core::Error),

    /// Error from pstore-fs
    #[error(transparent)]
    Fs(#[from] pstore_fs::Error),

    /// Error from pstore-aws
    #[error(transparent)]
    Aws(#[from] pstore_aws::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
