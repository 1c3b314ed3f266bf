use std::collections::HashMap;

use camino::Utf8Path;
use serde::Deserialize;

use crate::{ConfigError, Root};

/// Deserialization of scaffolder.toml
#[derive(Deserialize, Default, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// The absolute root directory under which all writes are confined
    pub root: Option<Root>,

    /// Default content for files, keyed by exact file name
    #[serde(default)]
    pub snippets: HashMap<String, String>,
}

impl ConfigFile {
    /// Load a configuration from the specified file
    ///
    pub fn load(path: impl AsRef<Utf8Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config_data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        toml::from_str(&config_data).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }
}

impl TryFrom<&str> for ConfigFile {
    type Error = toml::de::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        toml::from_str(value)
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    #[test]
    fn root_and_snippets() {
        let config: ConfigFile = indoc! {r##"
            root = "/srv/projects"

            [snippets]
            "LICENSE" = "MIT\n"
            "README.md" = "# Overridden\n"
        "##}
        .try_into()
        .unwrap();
        assert_eq!(config.root.unwrap().path(), "/srv/projects");
        assert_eq!(config.snippets.len(), 2);
        assert_eq!(config.snippets["LICENSE"], "MIT\n");
    }

    #[test]
    fn everything_optional() {
        let config: ConfigFile = "".try_into().unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn root_relative_disallowed() {
        let config: Result<ConfigFile, _> = "root = \"relative/path\"\n".try_into();
        assert!(config
            .unwrap_err()
            .to_string()
            .contains("path must be absolute"));
    }

    #[test]
    fn unknown_keys_rejected() {
        let config: Result<ConfigFile, _> = "roots = \"/a\"\n".try_into();
        assert!(config.is_err());
    }
}
