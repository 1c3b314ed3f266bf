//! Configuration for Scaffolder
//!
//! The only required setting is the confinement [`Root`], read once at startup from the
//! [`ROOT_VARIABLE`] environment variable or from a `scaffolder.toml` file:
//! ```toml
//! root = "/home/me/dev"
//!
//! [snippets]
//! "LICENSE" = "MIT\n"
//! ```
//! The environment variable, when set, takes precedence over the file's `root`.
#![warn(missing_docs)]

use std::collections::HashMap;

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

mod file;
pub use file::ConfigFile;

mod root;
pub use root::Root;

/// Environment variable naming the confinement root
pub const ROOT_VARIABLE: &str = "SCAFFOLDER_BASE";

/// A fatal problem with the configuration, reported before any request is processed
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No root was configured
    #[error("Set SCAFFOLDER_BASE to an allowed write root")]
    RootUnset,

    /// The configured root is not usable as a path
    #[error("Invalid root {root}; {reason}")]
    InvalidRoot {
        /// The offending path
        root: Utf8PathBuf,
        /// Why it was rejected
        reason: &'static str,
    },

    /// The configured root does not exist as a directory
    #[error("Root does not exist as a directory: {0}")]
    RootMissing(Utf8PathBuf),

    /// The config file could not be read
    #[error("Reading config file {path}: {source}")]
    Read {
        /// The config file path
        path: Utf8PathBuf,
        /// The underlying error
        source: std::io::Error,
    },

    /// The config file is not valid
    #[error("Parsing config file {path}: {source}")]
    Parse {
        /// The config file path
        path: Utf8PathBuf,
        /// The underlying error
        source: toml::de::Error,
    },
}

/// Application configuration, immutable once loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    root: Root,
    snippets: HashMap<String, String>,
}

impl Config {
    /// Constructs a configuration confined to the given root
    pub fn new(root: Root) -> Self {
        Config {
            root,
            snippets: HashMap::new(),
        }
    }

    /// Reads the root from the [`ROOT_VARIABLE`] environment variable
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_value(std::env::var(ROOT_VARIABLE).ok().as_deref())
    }

    fn from_env_value(value: Option<&str>) -> Result<Self, ConfigError> {
        match value {
            Some(value) if !value.trim().is_empty() => {
                let root = Root::lenient(value.trim())?;
                tracing::debug!("Root from {}: {}", ROOT_VARIABLE, root.path());
                Ok(Config::new(root))
            }
            _ => Err(ConfigError::RootUnset),
        }
    }

    /// Loads a config file; the [`ROOT_VARIABLE`] environment variable overrides its root
    pub fn load(path: impl AsRef<Utf8Path>) -> Result<Self, ConfigError> {
        let file = ConfigFile::load(path.as_ref())?;
        Self::from_file(file, std::env::var(ROOT_VARIABLE).ok().as_deref())
    }

    fn from_file(file: ConfigFile, env_value: Option<&str>) -> Result<Self, ConfigError> {
        let ConfigFile { root, snippets } = file;
        let mut config = match (Self::from_env_value(env_value), root) {
            (Ok(config), _) => config,
            (Err(ConfigError::RootUnset), Some(root)) => Config::new(root),
            (Err(err), _) => return Err(err),
        };
        config.snippets = snippets;
        Ok(config)
    }

    /// Adds or replaces the default content for files with the given name
    pub fn with_snippet(mut self, file_name: impl Into<String>, content: impl Into<String>) -> Self {
        self.snippets.insert(file_name.into(), content.into());
        self
    }

    /// The confinement root
    pub fn root(&self) -> &Root {
        &self.root
    }

    /// Configured default file contents, keyed by file name
    pub fn snippets(&self) -> &HashMap<String, String> {
        &self.snippets
    }
}
