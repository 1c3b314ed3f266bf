use std::{fmt::Display, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Matches a first line of the form `key:` or `key: value`
static KEY_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.\-]+\s*:(\s|$)").expect("valid key line pattern"));

/// The grammar requested by the caller
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Let [detect] decide
    #[default]
    Auto,
    /// Force [Grammar::Tree]
    Tree,
    /// Force [Grammar::Yaml]
    Yaml,
    /// Force [Grammar::Json]
    Json,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Mode::Auto),
            "tree" => Ok(Mode::Tree),
            "yaml" => Ok(Mode::Yaml),
            "json" => Ok(Mode::Json),
            other => Err(format!(
                "Unsupported mode: {other} (expected auto, tree, yaml or json)"
            )),
        }
    }
}

/// The grammar a layout is parsed with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Grammar {
    /// An indented tree diagram
    Tree,
    /// YAML, which also accepts JSON
    Yaml,
    /// JSON
    Json,
}

impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Grammar::Tree => write!(f, "tree"),
            Grammar::Yaml => write!(f, "yaml"),
            Grammar::Json => write!(f, "json"),
        }
    }
}

/// Decides which grammar to parse the text with
///
/// An explicit mode is honoured as given. In [Mode::Auto] the trimmed text is inspected: a
/// leading `{` or `[` is JSON; a `key:` first line, or any `entries:` or `tree:`, is YAML;
/// everything else (including natural language lists) is treated as a tree diagram.
pub fn detect(text: &str, mode: Mode) -> Grammar {
    let grammar = match mode {
        Mode::Tree => Grammar::Tree,
        Mode::Yaml => Grammar::Yaml,
        Mode::Json => Grammar::Json,
        Mode::Auto => {
            let text = text.trim();
            let first = text.lines().next().unwrap_or_default();
            if text.starts_with('{') || text.starts_with('[') {
                Grammar::Json
            } else if KEY_LINE.is_match(first) || text.contains("entries:") || text.contains("tree:")
            {
                Grammar::Yaml
            } else {
                Grammar::Tree
            }
        }
    };
    tracing::debug!("Selected {} grammar (requested {:?})", grammar, mode);
    grammar
}
