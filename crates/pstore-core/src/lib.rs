//! Core synchronization layer for aws-parameter-store
//!
//! This crate provides:
//!
//! - **Domain model**: parameters, storage classes, encryption directives
//! - **Store port**: the [`ParameterStore`] trait and an in-memory [`MemoryStore`]
//! - **Synchronizer**: export, import, delete, and list against any store
//!
//! # Architecture
//!
//! ```text
//!               pstore-cli
//!                   |
//!        +----------+----------+
//!        |                     |
//!   pstore-core  <------  pstore-aws
//!        |
//!    pstore-fs
//! ```
//!
//! # Example
//!
//! ```
//! use pstore_core::{ImportOptions, MemoryStore, Synchronizer};
//! use pstore_fs::ImportDocument;
//!
//! let store = MemoryStore::new();
//! let sync = Synchronizer::new(&store);
//! let document = ImportDocument::from_entries([("/app/db/host", "db.internal")]);
//!
//! let report = sync.import(&document, &ImportOptions::default()).unwrap();
//! assert_eq!(report.added, vec!["/app/db/host"]);
//! ```

pub mod error;
pub mod model;
pub mod store;
pub mod sync;

pub use error::{Error, Result};
pub use model::{EncryptionDirective, Parameter, ParameterMetadata, ParameterType, StorageClass};
pub use store::{
    CallCounts, DeleteOutcome, MAX_DELETE_BATCH, MAX_PAGE_SIZE, MemoryStore, Operation, Page,
    ParameterStore, PathQuery, PutParameter, StoreError, StoreResult,
};
pub use sync::{
    BatchResult, DeleteOptions, DeleteReport, ImportOptions, ImportReport, KeyAction, KeyOutcome,
    Synchronizer, check_export_path,
};
