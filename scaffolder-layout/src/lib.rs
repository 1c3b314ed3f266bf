//! This crate turns a textual description of a directory layout into an ordered list of
//! [LayoutEntry]s (see [parse_layout]).
//!
//! Three grammars are understood, and [detect] picks one when the caller does not:
//!
//! | Grammar       | Example first line | Description
//! |---------------|--------------------|---------------------------
//! | [Grammar::Tree] | `my-app/`        | An indented diagram, box-drawing connectors optional
//! | [Grammar::Yaml] | `tree:`          | A nested mapping, or a flat list under `entries:`
//! | [Grammar::Json] | `{`              | The same two shapes as JSON
//!
//! # Tree Diagrams
//!
//! Directories end in a `/`. Depth is taken from the indentation before the `├─ ` or `└─ `
//! connector, two columns per level. A first line ending in `/` only labels the root and
//! produces no entry:
//! ```
//! use scaffolder_layout::*;
//!
//! let entries = parse_layout("
//! my-app/
//! ├─ README.md
//! └─ src/
//!   └─ main.py
//! ", Grammar::Tree)?;
//!
//! let paths: Vec<_> = entries.iter().map(|entry| entry.path.as_str()).collect();
//! assert_eq!(paths, ["README.md", "src", "src/main.py"]);
//! assert_eq!(entries[1].kind, EntryKind::Directory);
//! # Ok::<(), LayoutError>(())
//! ```
//!
//! # Structured Layouts
//!
//! A nested mapping uses keys as path segments; objects are directories and anything else is
//! file content (`null` leaves the content to a default, even for a key ending in `/`):
//! ```
//! # use scaffolder_layout::*;
//! let entries = parse_layout(r##"
//! tree:
//!   README.md: "# Title\n"
//!   src:
//!     main.py: "print('hi')\n"
//! "##, Grammar::Yaml)?;
//! assert_eq!(entries.len(), 3);
//! assert_eq!(entries[2].path, "src/main.py");
//! assert_eq!(entries[2].content.as_deref(), Some("print('hi')\n"));
//! # Ok::<(), LayoutError>(())
//! ```
//!
//! A flat list gives each entry's `path`, with optional `type` and `content`:
//! ```
//! # use scaffolder_layout::*;
//! let entries = parse_layout(
//!     r#"{"entries": [{"path": "src/", "type": "dir"}, {"path": "src/main.py"}]}"#,
//!     Grammar::Json,
//! )?;
//! assert_eq!(entries[0], LayoutEntry::directory("src"));
//! assert_eq!(entries[1], LayoutEntry::file("src/main.py", None));
//! # Ok::<(), LayoutError>(())
//! ```
#![warn(missing_docs)]

use std::fmt::Display;

use serde::Serialize;

mod error;
pub use error::LayoutError;

mod grammar;
pub use grammar::{detect, Grammar, Mode};

mod structured;
pub use structured::{parse_json, parse_yaml};

mod tree;
pub use tree::{collapse, parse_tree, parse_tree_items, TreeItem};

/// Whether an entry describes a directory or a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum EntryKind {
    /// A directory, created along with any missing parents
    #[serde(rename = "dir")]
    Directory,
    /// A regular file
    #[serde(rename = "file")]
    File,
}

impl Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKind::Directory => write!(f, "dir"),
            EntryKind::File => write!(f, "file"),
        }
    }
}

/// One path to be created, independent of the grammar it was described in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutEntry {
    /// The path relative to the target, using `/` separators and no trailing `/`
    pub path: String,
    /// Directory or file
    pub kind: EntryKind,
    /// Explicit file content; `None` leaves it to a default. Always `None` for directories
    pub content: Option<String>,
}

impl LayoutEntry {
    /// Describes a directory
    pub fn directory(path: impl Into<String>) -> Self {
        LayoutEntry {
            path: path.into(),
            kind: EntryKind::Directory,
            content: None,
        }
    }

    /// Describes a file with optional explicit content
    pub fn file(path: impl Into<String>, content: Option<String>) -> Self {
        LayoutEntry {
            path: path.into(),
            kind: EntryKind::File,
            content,
        }
    }

    /// Returns true if this entry describes a directory
    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

impl Display for LayoutEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            EntryKind::Directory => write!(f, "{}/", self.path),
            EntryKind::File => write!(f, "{}", self.path),
        }
    }
}

/// Parses the text with the given grammar into layout entries, in input order
///
/// Tree diagrams never fail to parse; structured grammars report a [LayoutError] for malformed
/// input or an unexpected shape.
pub fn parse_layout(text: &str, grammar: Grammar) -> Result<Vec<LayoutEntry>, LayoutError> {
    let entries = match grammar {
        Grammar::Tree => parse_tree(text),
        Grammar::Yaml => parse_yaml(text)?,
        Grammar::Json => parse_json(text)?,
    };
    tracing::debug!("Parsed {} entries as {}", entries.len(), grammar);
    Ok(entries)
}
