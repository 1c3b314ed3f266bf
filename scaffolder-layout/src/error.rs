use thiserror::Error;

/// A structural problem with a YAML or JSON layout
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The text is not valid JSON
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The text is not valid YAML
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A flat layout whose `entries` is missing or not a list
    #[error("flat layout requires an 'entries' list")]
    MissingEntries,

    /// A flat layout entry without a `path`
    #[error("entry {index} must be an object with a 'path'")]
    MissingPath {
        /// Position of the entry within `entries`, from zero
        index: usize,
    },

    /// A nested layout that is not a mapping
    #[error("nested layout must be an object, optionally under 'tree'")]
    NotAMapping,
}
