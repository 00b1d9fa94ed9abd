//! Remote parameter store port
//!
//! [`ParameterStore`] is the seam between the synchronizer and whatever
//! service actually holds the parameters. Calls are blocking and issued one
//! at a time.

mod memory;

pub use memory::{CallCounts, MemoryStore, Operation};

use crate::model::{Parameter, ParameterMetadata, StorageClass};

/// Largest number of names a single delete call accepts.
pub const MAX_DELETE_BATCH: usize = 10;

/// Largest page the listing calls return.
pub const MAX_PAGE_SIZE: u8 = 10;

/// Result type for remote store calls
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors reported by a remote store
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The named parameter does not exist
    #[error("Parameter not found: {name}")]
    ParameterNotFound { name: String },

    /// A create without overwrite hit an existing parameter
    #[error("Parameter already exists: {name}")]
    AlreadyExists { name: String },

    /// The store rejected the request as malformed
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Any other remote failure (permissions, network, throttling)
    #[error("{operation} failed: {message}")]
    Remote {
        operation: &'static str,
        message: String,
    },
}

impl StoreError {
    pub fn remote(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Remote {
            operation,
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ParameterNotFound { .. })
    }
}

/// A single write request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutParameter {
    pub name: String,
    pub value: String,
    pub storage: StorageClass,
    /// Replace an existing parameter instead of failing with `AlreadyExists`
    pub overwrite: bool,
}

/// One request against the by-path listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathQuery {
    pub path: String,
    pub recursive: bool,
    pub decrypt: bool,
    pub page_size: Option<u8>,
    pub next_token: Option<String>,
}

/// A page of listing results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Present while more results remain
    pub next_token: Option<String>,
}

/// Per-call result of a bulk delete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub deleted: Vec<String>,
    /// Names the store did not recognise
    pub invalid: Vec<String>,
}

/// Operations the synchronizer needs from a parameter store.
pub trait ParameterStore {
    /// Read one parameter.
    ///
    /// Returns [`StoreError::ParameterNotFound`] when the name does not exist.
    fn get_parameter(&self, name: &str, decrypt: bool) -> StoreResult<Parameter>;

    /// Create or overwrite one parameter, returning the new version.
    fn put_parameter(&self, request: &PutParameter) -> StoreResult<i64>;

    /// Fetch one page of parameters under a path.
    fn get_parameters_by_path(&self, query: &PathQuery) -> StoreResult<Page<Parameter>>;

    /// Delete up to [`MAX_DELETE_BATCH`] parameters.
    fn delete_parameters(&self, names: &[String]) -> StoreResult<DeleteOutcome>;

    /// Fetch one page of metadata for every parameter.
    fn describe_parameters(
        &self,
        page_size: Option<u8>,
        next_token: Option<&str>,
    ) -> StoreResult<Page<ParameterMetadata>>;
}

impl<S: ParameterStore + ?Sized> ParameterStore for &S {
    fn get_parameter(&self, name: &str, decrypt: bool) -> StoreResult<Parameter> {
        (**self).get_parameter(name, decrypt)
    }

    fn put_parameter(&self, request: &PutParameter) -> StoreResult<i64> {
        (**self).put_parameter(request)
    }

    fn get_parameters_by_path(&self, query: &PathQuery) -> StoreResult<Page<Parameter>> {
        (**self).get_parameters_by_path(query)
    }

    fn delete_parameters(&self, names: &[String]) -> StoreResult<DeleteOutcome> {
        (**self).delete_parameters(names)
    }

    fn describe_parameters(
        &self,
        page_size: Option<u8>,
        next_token: Option<&str>,
    ) -> StoreResult<Page<ParameterMetadata>> {
        (**self).describe_parameters(page_size, next_token)
    }
}

impl<S: ParameterStore + ?Sized> ParameterStore for Box<S> {
    fn get_parameter(&self, name: &str, decrypt: bool) -> StoreResult<Parameter> {
        (**self).get_parameter(name, decrypt)
    }

    fn put_parameter(&self, request: &PutParameter) -> StoreResult<i64> {
        (**self).put_parameter(request)
    }

    fn get_parameters_by_path(&self, query: &PathQuery) -> StoreResult<Page<Parameter>> {
        (**self).get_parameters_by_path(query)
    }

    fn delete_parameters(&self, names: &[String]) -> StoreResult<DeleteOutcome> {
        (**self).delete_parameters(names)
    }

    fn describe_parameters(
        &self,
        page_size: Option<u8>,
        next_token: Option<&str>,
    ) -> StoreResult<Page<ParameterMetadata>> {
        (**self).describe_parameters(page_size, next_token)
    }
}
