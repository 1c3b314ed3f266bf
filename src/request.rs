use scaffolder_layout::{Grammar, Mode};
use scaffolder_materialize::PlanRecord;
use serde::{Deserialize, Serialize};

/// A layout to create, and where
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScaffoldRequest {
    /// The layout, as a tree diagram, YAML or JSON
    pub prompt: String,
    /// Directory to create the layout in, relative to the configured root
    pub target_path: String,
    /// How to read the prompt
    #[serde(default)]
    pub mode: Mode,
    /// Replace the content of files that already exist
    #[serde(default)]
    pub overwrite: bool,
    /// Only report what would be created
    #[serde(default)]
    pub dry_run: bool,
}

impl ScaffoldRequest {
    /// A request with the grammar detected and both flags off
    pub fn new(prompt: impl Into<String>, target_path: impl Into<String>) -> Self {
        ScaffoldRequest {
            prompt: prompt.into(),
            target_path: target_path.into(),
            mode: Mode::Auto,
            overwrite: false,
            dry_run: false,
        }
    }
}

/// What a request did, or would do for a dry run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldResult {
    /// The grammar the prompt was parsed with
    pub selected_mode: Grammar,
    /// The confinement root, as configured
    pub base_path: String,
    /// The canonical target directory
    pub resolved_target: String,
    /// Directories ensured and files written
    pub created: Vec<String>,
    /// Existing files left alone
    pub skipped: Vec<String>,
    /// `"<path>: <reason>"` for each entry that failed
    pub errors: Vec<String>,
    /// Whether this was a dry run
    pub dry_run: bool,
    /// Every planned entry, for dry runs only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<Vec<PlanRecord>>,
}
