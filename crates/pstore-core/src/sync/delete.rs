//! Delete: remove every name of a document in capped batches

use pstore_fs::DeletionDocument;

use super::engine::{DeleteOptions, Synchronizer};
use super::report::{BatchResult, DeleteReport};
use crate::Result;
use crate::store::{MAX_DELETE_BATCH, ParameterStore};

impl<S: ParameterStore> Synchronizer<S> {
    /// Delete every name listed in `document`.
    pub fn delete(&self, document: &DeletionDocument, options: &DeleteOptions) -> Result<DeleteReport> {
        self.delete_with(document, options, |_| {})
    }

    /// Delete every name listed in `document`, calling `on_batch` after each
    /// delete call.
    ///
    /// Names are sent in batches of at most ten. A failing batch aborts the
    /// run; batches already sent stay applied.
    pub fn delete_with<F>(
        &self,
        document: &DeletionDocument,
        options: &DeleteOptions,
        mut on_batch: F,
    ) -> Result<DeleteReport>
    where
        F: FnMut(&BatchResult),
    {
        let mut report = DeleteReport {
            dry_run: options.dry_run,
            ..DeleteReport::default()
        };

        for (index, chunk) in document.names().chunks(MAX_DELETE_BATCH).enumerate() {
            let batch = if options.dry_run {
                tracing::info!(batch = index, size = chunk.len(), "[dry-run] Skipping delete");
                BatchResult {
                    index,
                    requested: chunk.to_vec(),
                    deleted: Vec::new(),
                    invalid: Vec::new(),
                    dry_run: true,
                }
            } else {
                let outcome = self.store.delete_parameters(chunk)?;
                tracing::info!(
                    batch = index,
                    deleted = outcome.deleted.len(),
                    invalid = outcome.invalid.len(),
                    "Deleted batch"
                );
                if !outcome.invalid.is_empty() {
                    tracing::warn!(names = ?outcome.invalid, "Store reported unknown parameters");
                }
                BatchResult {
                    index,
                    requested: chunk.to_vec(),
                    deleted: outcome.deleted,
                    invalid: outcome.invalid,
                    dry_run: false,
                }
            };

            on_batch(&batch);
            report.record(&batch);
        }

        Ok(report)
    }
}
