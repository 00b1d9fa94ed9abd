//! Settings resolution: defaults, then a settings file, then CLI flags

use std::path::{Path, PathBuf};

use pstore_aws::ClientOptions;
use pstore_core::MAX_PAGE_SIZE;
use pstore_fs::ConfigStore;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::error::{CliError, Result};

/// Directory name under the user's config dir
const APP_DIR: &str = "aws-parameter-store";

/// Persistent settings for the tool.
///
/// ```toml
/// page_size = 10
///
/// [aws]
/// region = "eu-west-1"
/// profile = "ops"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub aws: ClientOptions,
    pub page_size: Option<u8>,
}

impl Settings {
    /// Resolve settings for one invocation.
    ///
    /// An explicit `--config` must exist. Without it, the per-user settings
    /// file is read only if present.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => Some(path.clone()),
            None => default_path().filter(|path| path.is_file()),
        };

        let settings = match file {
            Some(path) => Self::load(&path)?,
            None => Self::default(),
        };

        settings.with_overrides(cli).validated()
    }

    /// Load settings from a TOML, JSON, or YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading settings");
        Ok(ConfigStore::new().load(path)?)
    }

    fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(region) = &cli.region {
            self.aws.region = Some(region.clone());
        }
        if let Some(profile) = &cli.profile {
            self.aws.profile = Some(profile.clone());
        }
        if let Some(endpoint) = &cli.endpoint_url {
            self.aws.endpoint_url = Some(endpoint.clone());
        }
        if cli.page_size.is_some() {
            self.page_size = cli.page_size;
        }
        self
    }

    fn validated(self) -> Result<Self> {
        if let Some(page_size) = self.page_size
            && !(1..=MAX_PAGE_SIZE).contains(&page_size)
        {
            return Err(CliError::user(format!(
                "page_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, page_size
            )));
        }
        Ok(self)
    }
}

/// `<config dir>/aws-parameter-store/config.toml`
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}
