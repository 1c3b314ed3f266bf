use scaffolder_filesystem::{Filesystem, Result};
use scaffolder_layout::EntryKind;

use crate::{Plan, PlannedEntry, Snippets};

/// What happened to each entry of a plan, as absolute paths
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Directories ensured and files written
    pub created: Vec<String>,
    /// Files left untouched because they already existed
    pub skipped: Vec<String>,
    /// Entries that failed, as `"<path>: <reason>"`
    pub errors: Vec<String>,
}

enum Effect {
    Created,
    Skipped,
}

/// Applies a plan to the filesystem, entry by entry
///
/// A failure is recorded against its entry and does not stop the entries after it. Nothing that
/// was written is rolled back.
pub fn materialize<FS>(fs: &mut FS, plan: &Plan, overwrite: bool, snippets: &Snippets) -> Outcome
where
    FS: Filesystem,
{
    let mut outcome = Outcome::default();
    for entry in plan.entries() {
        let path = entry.path.to_string();
        match apply(fs, entry, overwrite, snippets) {
            Ok(Effect::Created) => {
                tracing::info!("Created {}", path);
                outcome.created.push(path);
            }
            Ok(Effect::Skipped) => {
                tracing::debug!("Skipped existing {}", path);
                outcome.skipped.push(path);
            }
            Err(err) => {
                tracing::warn!("Failed to create {}: {}", path, err);
                outcome.errors.push(format!("{path}: {err}"));
            }
        }
    }
    outcome
}

fn apply<FS>(
    fs: &mut FS,
    entry: &PlannedEntry,
    overwrite: bool,
    snippets: &Snippets,
) -> Result<Effect>
where
    FS: Filesystem,
{
    match entry.kind {
        EntryKind::Directory => {
            fs.create_directory_all(&entry.path)?;
        }
        EntryKind::File => {
            if fs.exists(&entry.path) && !overwrite {
                return Ok(Effect::Skipped);
            }
            if let Some(parent) = entry.path.parent() {
                fs.create_directory_all(parent)?;
            }
            let content = entry
                .content
                .as_deref()
                .or_else(|| entry.path.file_name().and_then(|name| snippets.get(name)))
                .unwrap_or_default();
            fs.write_file(&entry.path, content)?;
        }
    }
    Ok(Effect::Created)
}
