use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;

use crate::ConfigError;

/// The absolute directory under which all writes are confined
#[derive(Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(try_from = "Utf8PathBuf")]
pub struct Root(Utf8PathBuf);

impl Root {
    /// Validates and wraps the given path
    pub fn new(path: impl AsRef<Utf8Path>) -> Result<Self, ConfigError> {
        path.as_ref().to_owned().try_into()
    }

    /// Like [`Root::new`] but tolerates trailing slashes, as commonly found in environment values
    pub fn lenient(path: impl AsRef<Utf8Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref().as_str();
        let trimmed = path.trim_end_matches('/');
        Root::new(if trimmed.is_empty() && !path.is_empty() {
            "/"
        } else {
            trimmed
        })
    }

    /// The absolute path of this root
    pub fn path(&self) -> &Utf8Path {
        &self.0
    }
}

impl AsRef<Utf8Path> for Root {
    fn as_ref(&self) -> &Utf8Path {
        &self.0
    }
}

impl TryFrom<Utf8PathBuf> for Root {
    type Error = ConfigError;

    fn try_from(value: Utf8PathBuf) -> Result<Self, Self::Error> {
        if !value.is_absolute() {
            return Err(ConfigError::InvalidRoot {
                root: value,
                reason: "path must be absolute",
            });
        }
        if !is_normalized(&value) {
            return Err(ConfigError::InvalidRoot {
                root: value,
                reason: "path must be normalized",
            });
        }
        Ok(Root(value))
    }
}

impl TryFrom<&Utf8Path> for Root {
    type Error = ConfigError;

    fn try_from(value: &Utf8Path) -> Result<Self, Self::Error> {
        value.to_owned().try_into()
    }
}

impl TryFrom<&str> for Root {
    type Error = ConfigError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Utf8PathBuf::from(value).try_into()
    }
}

fn is_normalized(path: impl AsRef<Utf8Path>) -> bool {
    let path = path.as_ref().as_str();
    !((path.ends_with('/') && path != "/")
        || path.contains("//")
        || path.contains("/./")
        || path.ends_with("/.")
        || path.split('/').any(|part| part == ".."))
}
