//! Format-agnostic settings loading

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::{DocumentFormat, Error, Result, io};

/// Loads settings files, picking the format from the file extension.
#[derive(Debug, Default)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Load settings from a file.
    ///
    /// The extension must be `.toml`, `.json`, `.yaml`, or `.yml`; anything
    /// else is rejected before the file is read.
    pub fn load<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let format =
            DocumentFormat::from_extension(extension).ok_or_else(|| Error::UnsupportedFormat {
                extension: extension.to_string(),
            })?;

        let parse_error = |message: String| Error::DocumentParse {
            path: path.to_path_buf(),
            format: format.to_string(),
            message,
        };

        let content = io::read_text(path)?;
        let value = format.parse(&content).map_err(parse_error)?;
        serde_json::from_value(value).map_err(|e| parse_error(e.to_string()))
    }
}
