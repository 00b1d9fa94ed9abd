//! Outcome types for import and delete runs

use std::collections::BTreeSet;

use serde::Serialize;

use crate::model::StorageClass;

/// What an import did (or would do) with one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    Added,
    Updated,
    Unchanged,
}

/// Result for a single parameter of an import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyOutcome {
    pub name: String,
    pub action: KeyAction,
    pub storage: StorageClass,
    /// True when the write was skipped because of a dry run
    pub dry_run: bool,
}

impl KeyOutcome {
    /// Human-readable line for this outcome.
    pub fn message(&self) -> String {
        match (self.action, self.dry_run) {
            (KeyAction::Unchanged, _) => format!("No update for {}", self.name),
            (KeyAction::Added, false) => format!("Parameter {} has been added", self.name),
            (KeyAction::Updated, false) => format!("Parameter {} has been updated", self.name),
            (KeyAction::Added, true) => format!("Parameter {} would be added", self.name),
            (KeyAction::Updated, true) => format!("Parameter {} would be updated", self.name),
        }
    }
}

/// Summary of an import run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub added: Vec<String>,
    pub updated: Vec<String>,
    pub unchanged: Vec<String>,
    pub dry_run: bool,
}

impl ImportReport {
    pub(crate) fn record(&mut self, outcome: &KeyOutcome) {
        let bucket = match outcome.action {
            KeyAction::Added => &mut self.added,
            KeyAction::Updated => &mut self.updated,
            KeyAction::Unchanged => &mut self.unchanged,
        };
        bucket.push(outcome.name.clone());
    }

    /// Number of parameters written (or that would be written).
    pub fn written(&self) -> usize {
        self.added.len() + self.updated.len()
    }

    pub fn total(&self) -> usize {
        self.written() + self.unchanged.len()
    }
}

/// Result of one delete call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    /// Zero-based batch number
    pub index: usize,
    pub requested: Vec<String>,
    pub deleted: Vec<String>,
    /// Names the store did not know
    pub invalid: Vec<String>,
    pub dry_run: bool,
}

/// Summary of a delete run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeleteReport {
    pub deleted: BTreeSet<String>,
    pub invalid: BTreeSet<String>,
    pub batches: usize,
    pub dry_run: bool,
}

impl DeleteReport {
    pub(crate) fn record(&mut self, batch: &BatchResult) {
        self.batches += 1;
        self.deleted.extend(batch.deleted.iter().cloned());
        self.invalid.extend(batch.invalid.iter().cloned());
    }
}
