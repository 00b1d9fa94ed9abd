//! Error types for pstore-core

use crate::store::StoreError;

/// Result type for pstore-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while synchronizing with the parameter store
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input rejected before any remote call was made
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// A document value that cannot be stored as requested
    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: String, reason: String },

    /// The remote listing handed back the token it was just given
    #[error("{operation} returned the same continuation token twice ({token})")]
    PaginationLoop {
        operation: &'static str,
        token: String,
    },

    /// Remote store failure
    #[error(transparent)]
    Store(#[from] StoreError),
}
