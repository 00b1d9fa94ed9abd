//! Import, deletion and export documents
//!
//! All documents are flat mappings whose keys are fully-qualified parameter
//! names. Import documents carry a value per name; deletion documents only
//! use the names; export documents are rendered as sorted, 4-space indented
//! JSON.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};
use serde_json::ser::PrettyFormatter;

use crate::{DocumentFormat, Error, Result, io};

/// Exported parameters, ordered by name.
pub type ExportDocument = BTreeMap<String, String>;

/// A value supplied for one parameter in an import document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Text(String),
    List(Vec<String>),
}

impl ParameterValue {
    fn from_json(value: &Value) -> std::result::Result<Self, String> {
        match value {
            Value::String(s) => Ok(Self::Text(s.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(format!(
                        "list elements must be strings, found {}",
                        json_kind(other)
                    )),
                })
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(Self::List),
            other => Err(format!(
                "expected a string or a list of strings, found {}",
                json_kind(other)
            )),
        }
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for ParameterValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// Parameters to create or update, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportDocument {
    entries: Vec<(String, ParameterValue)>,
}

impl ImportDocument {
    /// Load an import document from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let mapping = load_mapping(path)?;
        let entries = mapping
            .into_iter()
            .map(|(name, value)| {
                ParameterValue::from_json(&value)
                    .map(|value| (name.clone(), value))
                    .map_err(|reason| Error::InvalidValue {
                        path: path.to_path_buf(),
                        name,
                        reason,
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(path = %path.display(), entries = entries.len(), "Loaded import document");
        Ok(Self { entries })
    }

    /// Build a document from in-memory entries.
    ///
    /// A repeated name replaces the earlier value in place.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ParameterValue>,
    {
        let mut document = Self::default();
        for (name, value) in entries {
            let name = name.into();
            let value = value.into();
            match document.entries.iter_mut().find(|(n, _)| *n == name) {
                Some(existing) => existing.1 = value,
                None => document.entries.push((name, value)),
            }
        }
        document
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Names of parameters to delete, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionDocument {
    names: Vec<String>,
}

impl DeletionDocument {
    /// Load a deletion document from a file. Values are ignored.
    pub fn load(path: &Path) -> Result<Self> {
        let names: Vec<String> = load_mapping(path)?.into_iter().map(|(name, _)| name).collect();
        tracing::debug!(path = %path.display(), names = names.len(), "Loaded deletion document");
        Ok(Self { names })
    }

    pub fn from_names<I, K>(names: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let mut document = Self::default();
        for name in names {
            let name = name.into();
            if !document.names.contains(&name) {
                document.names.push(name);
            }
        }
        document
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Render an export document as JSON with sorted keys and 4-space indent.
pub fn render_export(document: &ExportDocument) -> Result<String> {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    document
        .serialize(&mut serializer)
        .map_err(|e| Error::DocumentSerialize {
            message: e.to_string(),
        })?;

    let mut rendered = String::from_utf8(buffer).map_err(|e| Error::DocumentSerialize {
        message: e.to_string(),
    })?;
    rendered.push('\n');
    Ok(rendered)
}

fn load_mapping(path: &Path) -> Result<Map<String, Value>> {
    let content = io::read_text(path)?;
    let format = DocumentFormat::from_path(path);

    let value = format.parse(&content).map_err(|message| Error::DocumentParse {
        path: path.to_path_buf(),
        format: format.to_string(),
        message,
    })?;

    match value {
        Value::Object(mapping) => Ok(mapping),
        _ => Err(Error::NotAMapping {
            path: path.to_path_buf(),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
