//! Error types for pstore-aws

/// Result type for pstore-aws operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while setting up the AWS client
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The runtime that drives SDK calls could not be started
    #[error("Failed to start AWS client runtime: {0}")]
    Runtime(#[source] std::io::Error),
}
