//! Shared test utilities for the aws-parameter-store workspace.
//!
//! This crate provides standardised fixtures to avoid duplication across
//! crate test suites. It is a dev-dependency only — never published.
//!
//! # Modules
//!
//! - [`documents`] — [`TestDocuments`] builder for document files on disk
//! - [`store`] — seeded [`MemoryStore`](pstore_core::MemoryStore) helpers

pub mod documents;
pub mod store;

pub use documents::TestDocuments;
pub use store::{bulk_names, seeded_store};
