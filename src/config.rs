//! Application configuration.
//!
//! Built-in defaults, then `CZYTELNIA_*` environment variables, then
//! command-line flags.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, ValueEnum};

use crate::platform;
use crate::types::errors::ConfigError;

pub const ENV_DATA_DIR: &str = "CZYTELNIA_DATA_DIR";
pub const ENV_STORIES_DIR: &str = "CZYTELNIA_STORIES_DIR";
pub const ENV_BACKEND: &str = "CZYTELNIA_BACKEND";
pub const ENV_REMOTE_URL: &str = "CZYTELNIA_REMOTE_URL";

const DATABASE_FILE: &str = "czytelnia.db";
const STORAGE_DIR: &str = "storage";
const DEFAULT_STORIES_DIR: &str = "stories";

/// Where stories come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// A directory of `<number>-<slug>.txt` files.
    Files,
    /// The local SQLite document store.
    Documents,
    /// The hosted document backend over HTTP.
    Remote,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Files => "files",
            Backend::Documents => "documents",
            Backend::Remote => "remote",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "files" => Ok(Backend::Files),
            "documents" => Ok(Backend::Documents),
            "remote" => Ok(Backend::Remote),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

/// Values given on the command line; `None` keeps the configured value.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigOverrides {
    /// Directory holding the story database and local storage
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Directory of `<number>-<slug>.txt` story files
    #[arg(long, global = true)]
    pub stories_dir: Option<PathBuf>,

    /// Where stories are read from
    #[arg(long, value_enum, global = true)]
    pub backend: Option<Backend>,

    /// Base URL of the hosted document backend
    #[arg(long, global = true)]
    pub remote_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub stories_dir: PathBuf,
    pub backend: Backend,
    pub remote_url: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: platform::get_data_dir(),
            stories_dir: PathBuf::from(DEFAULT_STORIES_DIR),
            backend: Backend::Documents,
            remote_url: None,
        }
    }
}

impl AppConfig {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overlaid with whatever `lookup` yields for each variable.
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();
        if let Some(dir) = get(ENV_DATA_DIR) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = get(ENV_STORIES_DIR) {
            config.stories_dir = PathBuf::from(dir);
        }
        if let Some(backend) = get(ENV_BACKEND) {
            config.backend = backend.parse()?;
        }
        if let Some(url) = get(ENV_REMOTE_URL) {
            config.remote_url = Some(url);
        }
        Ok(config)
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(dir) = overrides.data_dir {
            self.data_dir = dir;
        }
        if let Some(dir) = overrides.stories_dir {
            self.stories_dir = dir;
        }
        if let Some(backend) = overrides.backend {
            self.backend = backend;
        }
        if let Some(url) = overrides.remote_url {
            self.remote_url = Some(url);
        }
        self
    }

    /// Checks that the selected backend has what it needs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend == Backend::Remote {
            if self.remote_url.is_none() {
                return Err(ConfigError::MissingRemoteUrl);
            }
            if !cfg!(feature = "remote") {
                return Err(ConfigError::RemoteUnsupported);
            }
        }
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }

    pub fn storage_dir(&self) -> PathBuf {
        self.data_dir.join(STORAGE_DIR)
    }
}
