//! List command implementation

use colored::Colorize;
use pstore_core::{ParameterMetadata, ParameterStore, Synchronizer};

use crate::error::Result;
use crate::settings::Settings;

/// Run the list command
pub fn run_list(settings: &Settings) -> Result<()> {
    let sync = super::connect(settings)?;
    let parameters = list(&sync)?;

    if parameters.is_empty() {
        println!("No parameters found.");
        return Ok(());
    }

    println!("{}", "Parameters".bold());
    println!();
    let width = parameters.iter().map(|p| p.name.len()).max().unwrap_or(0);
    for parameter in &parameters {
        println!("  {}", format_row(parameter, width));
    }
    println!();
    println!("{} parameters", parameters.len());
    Ok(())
}

/// Describe every parameter in the store, sorted by name.
pub fn list<S: ParameterStore>(sync: &Synchronizer<S>) -> Result<Vec<ParameterMetadata>> {
    Ok(sync.list()?)
}

fn format_row(parameter: &ParameterMetadata, width: usize) -> String {
    let mut row = format!(
        "{}  {}  v{}",
        format!("{:<width$}", parameter.name).cyan(),
        format!("{:<12}", parameter.parameter_type.as_str()).dimmed(),
        parameter.version
    );
    if let Some(key_id) = &parameter.key_id {
        row.push_str(&format!("  ({})", key_id));
    }
    row
}
