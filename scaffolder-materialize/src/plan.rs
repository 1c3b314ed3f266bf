use std::collections::HashSet;

use camino::{Utf8Path, Utf8PathBuf};
use scaffolder_filesystem::Filesystem;
use scaffolder_layout::{EntryKind, LayoutEntry};
use serde::Serialize;

use crate::{ConfinementError, Confiner};

/// A layout entry resolved to the absolute path it will be created at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEntry {
    /// Canonical path, beneath the plan's target
    pub path: Utf8PathBuf,
    /// Directory or file
    pub kind: EntryKind,
    /// Explicit file content, if given
    pub content: Option<String>,
}

/// How a planned entry is reported without applying it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanRecord {
    /// Absolute path
    pub path: String,
    /// `"dir"` or `"file"`
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

/// Every entry of a layout, confined and ready to apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    target: Utf8PathBuf,
    entries: Vec<PlannedEntry>,
}

impl Plan {
    /// The directory entries are created beneath
    pub fn target(&self) -> &Utf8Path {
        &self.target
    }

    /// The entries, in layout order
    pub fn entries(&self) -> &[PlannedEntry] {
        &self.entries
    }

    /// Summarizes the plan without content
    pub fn records(&self) -> Vec<PlanRecord> {
        self.entries
            .iter()
            .map(|entry| PlanRecord {
                path: entry.path.to_string(),
                kind: entry.kind,
            })
            .collect()
    }
}

/// Resolves every layout entry beneath the target before anything is written
///
/// A single entry that escapes the target fails the whole plan. When several entries resolve
/// to the same path only the first is kept.
pub fn plan<FS>(
    fs: &FS,
    target: &Confiner,
    layout: &[LayoutEntry],
) -> Result<Plan, ConfinementError>
where
    FS: Filesystem,
{
    let mut seen = HashSet::with_capacity(layout.len());
    let mut entries = Vec::with_capacity(layout.len());
    for entry in layout {
        let path = target.resolve(fs, &entry.path)?;
        if !seen.insert(path.clone()) {
            tracing::debug!("Ignoring repeated entry {}", entry);
            continue;
        }
        tracing::debug!("Planned {} {}", entry.kind, path);
        entries.push(PlannedEntry {
            path,
            kind: entry.kind,
            content: if entry.is_directory() {
                None
            } else {
                entry.content.clone()
            },
        });
    }
    Ok(Plan {
        target: target.root().to_owned(),
        entries,
    })
}
