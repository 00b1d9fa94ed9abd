//! Command implementations for pstore-cli
//!
//! Each `run_*` entry point loads its local inputs first, then connects to
//! SSM. The store-generic halves are what the unit tests drive.

pub mod delete;
pub mod export;
pub mod import;
pub mod list;

pub use delete::run_delete;
pub use export::run_export;
pub use import::run_import;
pub use list::run_list;

use pstore_aws::SsmStore;
use pstore_core::Synchronizer;

use crate::error::Result;
use crate::settings::Settings;

/// Build a synchronizer over SSM from resolved settings.
fn connect(settings: &Settings) -> Result<Synchronizer<SsmStore>> {
    let store = SsmStore::connect(&settings.aws)?;
    let sync = Synchronizer::new(store);
    Ok(match settings.page_size {
        Some(page_size) => sync.with_page_size(page_size)?,
        None => sync,
    })
}
