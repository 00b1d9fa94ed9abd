//! Local files for aws-parameter-store
//!
//! Reads import and deletion documents, renders export documents, and loads
//! settings files. Writes go through [`io::write_atomic`].

pub mod config;
pub mod document;
pub mod error;
pub mod format;
pub mod io;

pub use config::ConfigStore;
pub use document::{DeletionDocument, ExportDocument, ImportDocument, ParameterValue, render_export};
pub use error::{Error, Result};
pub use format::DocumentFormat;
