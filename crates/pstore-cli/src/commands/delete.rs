//! Delete command implementation

use std::path::Path;

use colored::Colorize;
use pstore_core::{BatchResult, DeleteOptions, DeleteReport, ParameterStore, Synchronizer};
use pstore_fs::DeletionDocument;

use crate::error::Result;
use crate::settings::Settings;

/// Run the delete command
pub fn run_delete(settings: &Settings, file: &Path, dry_run: bool) -> Result<()> {
    let document = DeletionDocument::load(file)?;
    if document.is_empty() {
        println!("{} Nothing to delete", "OK".green().bold());
        return Ok(());
    }

    let sync = super::connect(settings)?;
    let report = delete(&sync, &document, &DeleteOptions { dry_run })?;

    let verb = if report.dry_run { "Would delete" } else { "Deleted" };
    println!(
        "{} {} {} parameters in {} batches",
        "OK".green().bold(),
        verb,
        if report.dry_run { document.len() } else { report.deleted.len() },
        report.batches
    );
    Ok(())
}

/// Delete every name in `document`, printing each batch as it completes.
pub fn delete<S: ParameterStore>(
    sync: &Synchronizer<S>,
    document: &DeletionDocument,
    options: &DeleteOptions,
) -> Result<DeleteReport> {
    Ok(sync.delete_with(document, options, print_batch)?)
}

fn print_batch(batch: &BatchResult) {
    if batch.dry_run {
        println!("   {} Would delete: {:?}", "-".dimmed(), batch.requested);
        return;
    }

    println!(
        "   {} The following parameters have been deleted: {:?}",
        "-".red(),
        batch.deleted
    );
    if !batch.invalid.is_empty() {
        println!("   {} Not found: {:?}", "!".yellow(), batch.invalid);
    }
}
