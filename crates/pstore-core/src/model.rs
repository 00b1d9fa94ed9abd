//! Parameter store domain types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Wire-level type of a parameter as reported by the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterType {
    String,
    StringList,
    SecureString,
}

impl ParameterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::StringList => "StringList",
            Self::SecureString => "SecureString",
        }
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "String" => Ok(Self::String),
            "StringList" => Ok(Self::StringList),
            "SecureString" => Ok(Self::SecureString),
            other => Err(Error::InvalidInput {
                message: format!("unknown parameter type: {}", other),
            }),
        }
    }
}

/// How a parameter value is stored: plain or encrypted at rest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StorageClass {
    /// Plain `String`
    Plain,
    /// Plain `StringList`, elements joined with `,`
    PlainList,
    /// `SecureString` under the store's default key
    Encrypted,
    /// `SecureString` under an explicit key
    EncryptedWithKey(String),
}

impl StorageClass {
    pub fn parameter_type(&self) -> ParameterType {
        match self {
            Self::Plain => ParameterType::String,
            Self::PlainList => ParameterType::StringList,
            Self::Encrypted | Self::EncryptedWithKey(_) => ParameterType::SecureString,
        }
    }

    pub fn key_id(&self) -> Option<&str> {
        match self {
            Self::EncryptedWithKey(key) => Some(key),
            _ => None,
        }
    }

    pub fn is_encrypted(&self) -> bool {
        self.parameter_type() == ParameterType::SecureString
    }
}

impl fmt::Display for StorageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EncryptedWithKey(key) => write!(f, "SecureString (key {})", key),
            other => f.write_str(other.parameter_type().as_str()),
        }
    }
}

/// Encryption requested for an import run.
///
/// Parsed from the optional `--key` value: absent means [`Unencrypted`],
/// `default` means the store's default key, anything else is a key id or
/// alias.
///
/// [`Unencrypted`]: EncryptionDirective::Unencrypted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EncryptionDirective {
    #[default]
    Unencrypted,
    DefaultKey,
    Key(String),
}

impl EncryptionDirective {
    /// Build a directive from an optional `--key` flag value.
    pub fn from_flag(flag: Option<&str>) -> Result<Self> {
        flag.map_or(Ok(Self::Unencrypted), |key| key.parse())
    }

    pub fn is_unencrypted(&self) -> bool {
        matches!(self, Self::Unencrypted)
    }

    /// Storage class for a single text value under this directive.
    pub fn text_storage(&self) -> StorageClass {
        match self {
            Self::Unencrypted => StorageClass::Plain,
            Self::DefaultKey => StorageClass::Encrypted,
            Self::Key(key) => StorageClass::EncryptedWithKey(key.clone()),
        }
    }
}

impl FromStr for EncryptionDirective {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "" => Err(Error::InvalidInput {
                message: "encryption key id must not be empty".into(),
            }),
            "default" => Ok(Self::DefaultKey),
            key => Ok(Self::Key(key.to_string())),
        }
    }
}

/// A parameter read back from the remote store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    /// Decrypted value; `StringList` values are comma-joined
    pub value: String,
    pub parameter_type: ParameterType,
    pub version: i64,
}

/// Parameter metadata from the describe listing. Never carries the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterMetadata {
    pub name: String,
    pub parameter_type: ParameterType,
    pub key_id: Option<String>,
    pub version: i64,
}
