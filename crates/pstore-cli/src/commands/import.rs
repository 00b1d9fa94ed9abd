//! Import command implementation

use std::path::Path;

use colored::Colorize;
use pstore_core::{
    EncryptionDirective, ImportOptions, ImportReport, KeyAction, KeyOutcome, ParameterStore,
    Synchronizer,
};
use pstore_fs::ImportDocument;

use crate::error::Result;
use crate::settings::Settings;

/// Run the import command
///
/// The document and key flag are validated before any connection is made.
pub fn run_import(settings: &Settings, file: &Path, key: Option<&str>, dry_run: bool) -> Result<()> {
    let document = ImportDocument::load(file)?;
    let options = ImportOptions {
        encryption: EncryptionDirective::from_flag(key)?,
        dry_run,
    };

    if dry_run {
        println!("{} Dry run, no parameters will be written", "=>".blue().bold());
    }

    let sync = super::connect(settings)?;
    let report = import(&sync, &document, &options)?;
    print_summary(&report);
    Ok(())
}

/// Import `document`, printing one line per key as it completes.
pub fn import<S: ParameterStore>(
    sync: &Synchronizer<S>,
    document: &ImportDocument,
    options: &ImportOptions,
) -> Result<ImportReport> {
    Ok(sync.import_with(document, options, print_outcome)?)
}

fn print_outcome(outcome: &KeyOutcome) {
    let marker = match outcome.action {
        KeyAction::Added => "+".green(),
        KeyAction::Updated => "~".yellow(),
        KeyAction::Unchanged => "=".dimmed(),
    };
    println!("   {} {}", marker, outcome.message());
}

fn print_summary(report: &ImportReport) {
    let verb = if report.dry_run { "Would write" } else { "Wrote" };
    println!(
        "{} {} {} of {} parameters ({} added, {} updated, {} unchanged)",
        "OK".green().bold(),
        verb,
        report.written(),
        report.total(),
        report.added.len(),
        report.updated.len(),
        report.unchanged.len()
    );
}
