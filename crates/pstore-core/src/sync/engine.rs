//! Synchronizer implementation
//!
//! The Synchronizer reconciles local documents with a remote parameter store
//! through the [`ParameterStore`] port it is constructed with.

use std::collections::HashSet;

use pstore_fs::ExportDocument;

use crate::model::{EncryptionDirective, ParameterMetadata};
use crate::store::{MAX_PAGE_SIZE, Page, ParameterStore, PathQuery, StoreResult};
use crate::{Error, Result};

/// Options for an import run
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Storage class requested for every written parameter
    pub encryption: EncryptionDirective,
    /// If true, read current values but issue no writes
    pub dry_run: bool,
}

/// Options for a delete run
#[derive(Debug, Clone, Default)]
pub struct DeleteOptions {
    /// If true, report the batches without calling the store
    pub dry_run: bool,
}

/// Reconciles documents with a parameter store.
///
/// The Synchronizer provides four operations:
/// - **export**: Read every parameter under a path into a sorted document
/// - **import**: Upsert every entry of a document
/// - **delete**: Remove every name of a document, in batches
/// - **list**: Describe every parameter in the store
pub struct Synchronizer<S> {
    pub(super) store: S,
    pub(super) page_size: Option<u8>,
}

impl<S: ParameterStore> Synchronizer<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            page_size: None,
        }
    }

    /// Request listing pages of at most `page_size` entries.
    ///
    /// # Errors
    ///
    /// Returns an error if `page_size` is outside 1 to 10.
    pub fn with_page_size(mut self, page_size: u8) -> Result<Self> {
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(Error::InvalidInput {
                message: format!(
                    "page size must be between 1 and {}, got {}",
                    MAX_PAGE_SIZE, page_size
                ),
            });
        }
        self.page_size = Some(page_size);
        Ok(self)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Export every parameter under `path`, recursively and decrypted.
    ///
    /// All pages are fetched before anything is returned; a failure on any
    /// page discards what was accumulated.
    pub fn export(&self, path: &str) -> Result<ExportDocument> {
        check_export_path(path)?;

        let parameters = collect_pages("GetParametersByPath", |next_token| {
            self.store.get_parameters_by_path(&PathQuery {
                path: path.to_string(),
                recursive: true,
                decrypt: true,
                page_size: self.page_size,
                next_token,
            })
        })?;

        tracing::debug!(path, count = parameters.len(), "Exported parameters");
        Ok(parameters
            .into_iter()
            .map(|p| (p.name, p.value))
            .collect())
    }

    /// Describe every parameter in the store.
    pub fn list(&self) -> Result<Vec<ParameterMetadata>> {
        let mut metadata = collect_pages("DescribeParameters", |next_token| {
            self.store
                .describe_parameters(self.page_size, next_token.as_deref())
        })?;
        metadata.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(metadata)
    }
}

/// Reject an export path before any remote call is made.
pub fn check_export_path(path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(Error::InvalidInput {
            message: "export path must not be empty".into(),
        });
    }
    Ok(())
}

/// Follow continuation tokens until a page arrives without one.
///
/// A token handed out twice in the same listing is a cycle and fails with
/// [`Error::PaginationLoop`].
fn collect_pages<T, F>(operation: &'static str, mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(Option<String>) -> StoreResult<Page<T>>,
{
    let mut items = Vec::new();
    let mut token: Option<String> = None;
    let mut seen = HashSet::new();
    let mut pages = 0usize;

    loop {
        let page = fetch(token.take())?;
        pages += 1;
        tracing::debug!(operation, page = pages, items = page.items.len(), "Fetched page");
        items.extend(page.items);

        match page.next_token {
            None => break,
            Some(next) if !seen.insert(next.clone()) => {
                return Err(Error::PaginationLoop {
                    operation,
                    token: next,
                });
            }
            Some(next) => token = Some(next),
        }
    }

    Ok(items)
}
