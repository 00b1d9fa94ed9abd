//! Import: upsert every entry of a document

use pstore_fs::{ImportDocument, ParameterValue};

use super::engine::{ImportOptions, Synchronizer};
use super::report::{ImportReport, KeyAction, KeyOutcome};
use crate::model::{EncryptionDirective, StorageClass};
use crate::store::{ParameterStore, PutParameter};
use crate::{Error, Result};

/// Separator the store uses between `StringList` elements
const LIST_SEPARATOR: &str = ",";

impl<S: ParameterStore> Synchronizer<S> {
    /// Upsert every entry of `document`.
    pub fn import(&self, document: &ImportDocument, options: &ImportOptions) -> Result<ImportReport> {
        self.import_with(document, options, |_| {})
    }

    /// Upsert every entry of `document`, calling `on_key` after each one.
    ///
    /// Every value is validated before the first remote call, so an invalid
    /// entry anywhere in the document leaves the store untouched. Entries are
    /// then processed in document order with one read and at most one write
    /// each. The first error other than "not found" on the read aborts the
    /// run; entries already written stay written.
    pub fn import_with<F>(
        &self,
        document: &ImportDocument,
        options: &ImportOptions,
        mut on_key: F,
    ) -> Result<ImportReport>
    where
        F: FnMut(&KeyOutcome),
    {
        let mut report = ImportReport {
            dry_run: options.dry_run,
            ..ImportReport::default()
        };

        let resolved = document
            .iter()
            .map(|(name, value)| {
                resolve_storage(name, value, &options.encryption)
                    .map(|(storage, desired)| (name, storage, desired))
            })
            .collect::<Result<Vec<_>>>()?;

        for (name, storage, desired) in resolved {
            let outcome = self.upsert(name, storage, desired, options)?;
            on_key(&outcome);
            report.record(&outcome);
        }

        Ok(report)
    }

    fn upsert(
        &self,
        name: &str,
        storage: StorageClass,
        desired: String,
        options: &ImportOptions,
    ) -> Result<KeyOutcome> {
        let current = match self.store.get_parameter(name, true) {
            Ok(parameter) => Some(parameter.value),
            Err(e) if e.is_not_found() => None,
            Err(e) => return Err(e.into()),
        };

        let action = match current {
            None => KeyAction::Added,
            // Encrypted imports always rewrite, even when the decrypted value matches
            Some(current) if current == desired && options.encryption.is_unencrypted() => {
                tracing::debug!(name, "Value unchanged");
                return Ok(KeyOutcome {
                    name: name.to_string(),
                    action: KeyAction::Unchanged,
                    storage,
                    dry_run: options.dry_run,
                });
            }
            Some(_) => KeyAction::Updated,
        };

        if options.dry_run {
            tracing::info!(name, %storage, ?action, "[dry-run] Skipping write");
        } else {
            let version = self.store.put_parameter(&PutParameter {
                name: name.to_string(),
                value: desired,
                storage: storage.clone(),
                overwrite: action == KeyAction::Updated,
            })?;
            tracing::info!(name, %storage, version, ?action, "Wrote parameter");
        }

        Ok(KeyOutcome {
            name: name.to_string(),
            action,
            storage,
            dry_run: options.dry_run,
        })
    }
}

/// Pick the storage class and wire value for one document entry.
fn resolve_storage(
    name: &str,
    value: &ParameterValue,
    encryption: &EncryptionDirective,
) -> Result<(StorageClass, String)> {
    match value {
        ParameterValue::Text(text) => Ok((encryption.text_storage(), text.clone())),
        ParameterValue::List(items) => {
            let invalid = |reason: &str| Error::InvalidValue {
                name: name.to_string(),
                reason: reason.to_string(),
            };

            if !encryption.is_unencrypted() {
                return Err(invalid("list values cannot be stored encrypted"));
            }
            if items.is_empty() {
                return Err(invalid("list must contain at least one element"));
            }
            if items.iter().any(|item| item.contains(LIST_SEPARATOR)) {
                return Err(invalid("list elements must not contain ','"));
            }

            let joined = items.join(LIST_SEPARATOR);
            Ok((StorageClass::PlainList, joined))
        }
    }
}
