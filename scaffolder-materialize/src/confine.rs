use camino::{Utf8Path, Utf8PathBuf};
use scaffolder_filesystem::{Filesystem, FsError};
use thiserror::Error;

/// A path that would be written outside of its root, or could not be resolved
#[derive(Debug, Error)]
pub enum ConfinementError {
    /// The canonical path is neither the root nor beneath it
    #[error("path escapes confinement root: {path} not under {root}")]
    Escape {
        /// Where the path resolved to
        path: Utf8PathBuf,
        /// The canonical root it had to stay within
        root: Utf8PathBuf,
    },

    /// The path could not be canonicalized
    #[error("cannot resolve {path}: {source}")]
    Resolve {
        /// The path as joined, before resolution
        path: Utf8PathBuf,
        /// The underlying error
        source: FsError,
    },
}

/// Resolves paths beneath a canonical root, refusing any that end up outside of it
///
/// Resolution follows symlinks that already exist, so a link inside the root pointing elsewhere
/// cannot be used to escape it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confiner {
    root: Utf8PathBuf,
}

impl Confiner {
    /// Confines to the given absolute root, after resolving it
    pub fn new<FS>(fs: &FS, root: impl AsRef<Utf8Path>) -> Result<Self, ConfinementError>
    where
        FS: Filesystem,
    {
        let root = canonicalize(fs, root.as_ref())?;
        Ok(Confiner { root })
    }

    /// The canonical root
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Confines to a subdirectory of this root, given as a path relative to it
    ///
    /// Surrounding whitespace and leading `/`s are ignored, so `"/proj "` names `<root>/proj`.
    pub fn descend<FS>(&self, fs: &FS, subpath: &str) -> Result<Self, ConfinementError>
    where
        FS: Filesystem,
    {
        let subpath = subpath.trim().trim_start_matches('/');
        let root = self.resolve(fs, subpath)?;
        tracing::debug!("Confined {} to {}", self.root, root);
        Ok(Confiner { root })
    }

    /// Returns the canonical location of a path relative to this root
    ///
    /// An absolute path replaces the root entirely and so is only accepted if it already lies
    /// within it.
    pub fn resolve<FS>(
        &self,
        fs: &FS,
        path: impl AsRef<Utf8Path>,
    ) -> Result<Utf8PathBuf, ConfinementError>
    where
        FS: Filesystem,
    {
        let resolved = canonicalize(fs, &self.root.join(path))?;
        if resolved.starts_with(&self.root) {
            Ok(resolved)
        } else {
            Err(ConfinementError::Escape {
                path: resolved,
                root: self.root.clone(),
            })
        }
    }
}

fn canonicalize<FS>(fs: &FS, path: &Utf8Path) -> Result<Utf8PathBuf, ConfinementError>
where
    FS: Filesystem,
{
    fs.canonicalize(path).map_err(|source| ConfinementError::Resolve {
        path: path.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use scaffolder_filesystem::MemoryFilesystem;

    use super::*;

    fn filesystem() -> MemoryFilesystem {
        let mut fs = MemoryFilesystem::new();
        fs.create_directory_all("/base/project").unwrap();
        fs.create_directory("/outside").unwrap();
        fs
    }

    #[test]
    fn resolve_within() {
        let fs = filesystem();
        let confiner = Confiner::new(&fs, "/base").unwrap();
        assert_eq!(confiner.resolve(&fs, "project/src").unwrap(), "/base/project/src");
        assert_eq!(confiner.resolve(&fs, "a/../b").unwrap(), "/base/b");
        assert_eq!(confiner.resolve(&fs, "").unwrap(), "/base");
        assert_eq!(confiner.resolve(&fs, ".").unwrap(), "/base");
    }

    #[test]
    fn resolve_escapes() {
        let fs = filesystem();
        let confiner = Confiner::new(&fs, "/base").unwrap();
        for path in ["..", "../outside", "project/../../etc", "/etc/passwd"] {
            assert!(
                matches!(confiner.resolve(&fs, path), Err(ConfinementError::Escape { .. })),
                "{path} should escape"
            );
        }
        // An absolute path inside the root is accepted as is
        assert_eq!(
            confiner.resolve(&fs, "/base/project").unwrap(),
            "/base/project"
        );
    }

    #[test]
    fn sibling_with_common_prefix_is_outside() {
        let mut fs = filesystem();
        fs.create_directory("/base-other").unwrap();
        let confiner = Confiner::new(&fs, "/base").unwrap();
        let err = confiner.resolve(&fs, "../base-other/file").unwrap_err();
        assert_eq!(
            err.to_string(),
            "path escapes confinement root: /base-other/file not under /base"
        );
    }

    #[test]
    fn symlinks_followed() {
        let mut fs = filesystem();
        fs.create_symlink("/base/project/out", "/outside").unwrap();
        fs.create_symlink("/base/project/in", "../project").unwrap();
        let confiner = Confiner::new(&fs, "/base").unwrap();
        assert!(matches!(
            confiner.resolve(&fs, "project/out/file"),
            Err(ConfinementError::Escape { .. })
        ));
        assert_eq!(
            confiner.resolve(&fs, "project/in/file").unwrap(),
            "/base/project/file"
        );
    }

    #[test]
    fn linked_root_is_resolved() {
        let mut fs = filesystem();
        fs.create_symlink("/link", "/base").unwrap();
        let confiner = Confiner::new(&fs, "/link").unwrap();
        assert_eq!(confiner.root(), "/base");
        assert_eq!(confiner.resolve(&fs, "x").unwrap(), "/base/x");
    }

    #[test]
    fn descend_strips_and_confines() {
        let fs = filesystem();
        let base = Confiner::new(&fs, "/base").unwrap();
        let target = base.descend(&fs, "  /project ").unwrap();
        assert_eq!(target.root(), "/base/project");
        assert_eq!(base.descend(&fs, "").unwrap().root(), "/base");
        assert!(matches!(
            base.descend(&fs, "../outside"),
            Err(ConfinementError::Escape { .. })
        ));
        // Entries are confined to the target, not the base
        assert!(matches!(
            target.resolve(&fs, "../sibling"),
            Err(ConfinementError::Escape { .. })
        ));
    }

    #[test]
    fn symlink_loop_is_resolve_error() {
        let mut fs = filesystem();
        fs.create_symlink("/base/a", "/base/b").unwrap();
        fs.create_symlink("/base/b", "/base/a").unwrap();
        let confiner = Confiner::new(&fs, "/base").unwrap();
        assert!(matches!(
            confiner.resolve(&fs, "a/file"),
            Err(ConfinementError::Resolve {
                source: FsError::SymlinkLoop,
                ..
            })
        ));
    }
}
