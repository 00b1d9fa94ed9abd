//! Synchronizer for reconciling documents with a parameter store
//!
//! This module provides:
//! - **export**: Snapshot a path into a sorted document, following pagination
//! - **import**: Create missing, update changed, and skip unchanged parameters
//! - **delete**: Remove named parameters in batches of at most ten
//! - **list**: Describe every parameter in the store

mod delete;
mod engine;
mod import;
mod report;

pub use engine::{DeleteOptions, ImportOptions, Synchronizer, check_export_path};
pub use report::{BatchResult, DeleteReport, ImportReport, KeyAction, KeyOutcome};
