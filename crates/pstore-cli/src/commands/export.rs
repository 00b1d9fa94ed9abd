//! Export command implementation

use std::path::Path;

use colored::Colorize;
use pstore_core::{ParameterStore, Synchronizer, check_export_path};
use pstore_fs::{io, render_export};

use crate::error::Result;
use crate::settings::Settings;

/// Run the export command
///
/// Prints the document to stdout, or writes it atomically to `output`.
pub fn run_export(settings: &Settings, path: &str, output: Option<&Path>) -> Result<()> {
    check_export_path(path)?;
    let sync = super::connect(settings)?;
    let rendered = export(&sync, path)?;

    match output {
        Some(file) => {
            io::write_text(file, &rendered)?;
            eprintln!(
                "{} Exported {} to {}",
                "OK".green().bold(),
                path.cyan(),
                file.display()
            );
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Export `path` and render it as the JSON document.
pub fn export<S: ParameterStore>(sync: &Synchronizer<S>, path: &str) -> Result<String> {
    let document = sync.export(path)?;
    tracing::debug!(path, count = document.len(), "Rendering export");
    Ok(render_export(&document)?)
}
