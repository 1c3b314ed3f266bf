//! Provides an abstract [`Filesystem`] trait, together with a physical ([`DiskFilesystem`])
//! and virtual ([`MemoryFilesystem`]) implementation.
#![warn(missing_docs)]

use std::io;

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use thiserror::Error;

mod memory;
mod physical;

pub use self::{memory::MemoryFilesystem, physical::DiskFilesystem};

/// The number of symlinks that may be followed while resolving a single path
pub const MAX_SYMLINK_HOPS: usize = 40;

/// Why a filesystem operation failed
///
/// The message deliberately excludes the path, callers report it alongside.
#[derive(Debug, Error)]
pub enum FsError {
    /// The process is not allowed to perform the operation
    #[error("permission denied")]
    PermissionDenied,

    /// Something other than a directory stands where a directory is needed
    #[error("not a directory")]
    NotADirectory,

    /// A file was to be written where a directory already exists
    #[error("is a directory")]
    IsADirectory,

    /// The path, or its parent, does not exist
    #[error("no such file or directory")]
    NotFound,

    /// The entry already exists
    #[error("file exists")]
    AlreadyExists,

    /// Symlinks could not be resolved within [`MAX_SYMLINK_HOPS`]
    #[error("too many levels of symbolic links")]
    SymlinkLoop,

    /// Only absolute paths can be resolved
    #[error("only absolute paths supported")]
    RelativePath,

    /// A path on disk is not valid UTF-8
    #[error("path is not valid UTF-8")]
    NonUtf8,

    /// Any other I/O failure
    #[error(transparent)]
    Io(io::Error),
}

impl From<io::Error> for FsError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied,
            io::ErrorKind::NotFound => FsError::NotFound,
            io::ErrorKind::AlreadyExists => FsError::AlreadyExists,
            _ => FsError::Io(err),
        }
    }
}

/// Result of a filesystem operation
pub type Result<T> = std::result::Result<T, FsError>;

/// Operations of a file system
pub trait Filesystem {
    /// Create a single directory, whose parent must exist
    fn create_directory(&mut self, path: impl AsRef<Utf8Path>) -> Result<()>;

    /// Create a directory and all of its parents, succeeding if it already exists
    fn create_directory_all(&mut self, path: impl AsRef<Utf8Path>) -> Result<()> {
        let path = path.as_ref();
        if self.is_directory(path) {
            return Ok(());
        }
        if self.exists(path) {
            return Err(FsError::NotADirectory);
        }
        if let Some(parent) = path.parent() {
            if !parent.as_str().is_empty() {
                self.create_directory_all(parent)?;
            }
        }
        self.create_directory(path)
    }

    /// Create a file with the given content, replacing the content of an existing file
    fn write_file(&mut self, path: impl AsRef<Utf8Path>, content: &str) -> Result<()>;

    /// Create a symlink pointing to the given target
    fn create_symlink(
        &mut self,
        path: impl AsRef<Utf8Path>,
        target: impl AsRef<Utf8Path>,
    ) -> Result<()>;

    /// Returns true if the path exists (following symlinks)
    fn exists(&self, path: impl AsRef<Utf8Path>) -> bool;

    /// Returns true if the path is a directory
    fn is_directory(&self, path: impl AsRef<Utf8Path>) -> bool;

    /// Returns true if the path is a regular file
    fn is_file(&self, path: impl AsRef<Utf8Path>) -> bool;

    /// Returns true if the path is a symbolic link
    fn is_link(&self, path: impl AsRef<Utf8Path>) -> bool;

    /// Lists the contents of the given directory
    fn list_directory(&self, path: impl AsRef<Utf8Path>) -> Result<Vec<String>>;

    /// Reads the contents of the given file
    fn read_file(&self, path: impl AsRef<Utf8Path>) -> Result<String>;

    /// Reads the path pointed to by the given symbolic link
    fn read_link(&self, path: impl AsRef<Utf8Path>) -> Result<Utf8PathBuf>;

    /// Returns the path after following all symlinks, normalized and absolute
    ///
    /// Parts of the path that do not exist are resolved lexically, so this can be used to
    /// determine where something *would* be created.
    fn canonicalize(&self, path: impl AsRef<Utf8Path>) -> Result<Utf8PathBuf> {
        let mut hops = 0;
        canonicalize_with(self, path.as_ref(), &mut hops)
    }
}

fn canonicalize_with<FS>(fs: &FS, path: &Utf8Path, hops: &mut usize) -> Result<Utf8PathBuf>
where
    FS: Filesystem + ?Sized,
{
    if !path.is_absolute() {
        return Err(FsError::RelativePath);
    }
    let mut canon = Utf8PathBuf::with_capacity(path.as_str().len());
    for part in path.components() {
        match part {
            Utf8Component::CurDir => continue,
            Utf8Component::ParentDir => {
                // Going above "/" stays at "/"
                canon.pop();
                continue;
            }
            _ => canon.push(part),
        }
        if fs.is_link(&canon) {
            *hops += 1;
            if *hops > MAX_SYMLINK_HOPS {
                return Err(FsError::SymlinkLoop);
            }
            let link = fs.read_link(&canon)?;
            if link.is_absolute() {
                canon.clear();
            } else {
                canon.pop();
            }
            canon.push(link);
            canon = canonicalize_with(fs, &canon, hops)?;
        }
    }
    Ok(canon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalize() -> Result<()> {
        let mut fs = MemoryFilesystem::new();
        assert_eq!(fs.canonicalize("/")?, "/");

        fs.create_directory("/dir")?;
        fs.create_symlink("/dir/sym", "../dir2/deeper")?;

        //   /
        //     dir/
        //       sym -> ../dir2/deeper    (Doesn't exist so path is kept)

        assert_eq!(fs.canonicalize("/dir/./sym//final")?, "/dir2/deeper/final");

        fs.create_directory("/dir2")?;
        fs.create_directory("/dir2/deeper")?;
        fs.create_symlink("/dir2/deeper/final", "/end")?;

        //   /
        //     dir/
        //       sym -> ../dir2/deeper    (Exists, so path is replaced)
        //     dir2/
        //       deeper/
        //         final -> /end

        assert_eq!(fs.canonicalize("/dir/./sym//final")?, "/end");

        assert_eq!(fs.canonicalize("/dir/sym")?, "/dir2/deeper");
        assert_eq!(fs.canonicalize("/dir/sym/.")?, "/dir2/deeper");
        assert_eq!(fs.canonicalize("/dir/sym/..")?, "/dir2");

        Ok(())
    }

    #[test]
    fn canonicalize_above_root() -> Result<()> {
        let fs = MemoryFilesystem::new();
        assert_eq!(fs.canonicalize("/../../etc")?, "/etc");
        assert_eq!(fs.canonicalize("/a/b/../../../c")?, "/c");
        Ok(())
    }

    #[test]
    fn canonicalize_relative_rejected() {
        let fs = MemoryFilesystem::new();
        assert!(matches!(
            fs.canonicalize("relative/path"),
            Err(FsError::RelativePath)
        ));
    }

    #[test]
    fn canonicalize_symlink_loop() -> Result<()> {
        let mut fs = MemoryFilesystem::new();
        fs.create_symlink("/a", "/b")?;
        fs.create_symlink("/b", "/a")?;
        assert!(matches!(
            fs.canonicalize("/a/inside"),
            Err(FsError::SymlinkLoop)
        ));
        Ok(())
    }

    #[test]
    fn create_directory_all() -> Result<()> {
        let mut fs = MemoryFilesystem::new();
        fs.create_directory_all("/one/two/three")?;
        assert!(fs.is_directory("/one"));
        assert!(fs.is_directory("/one/two/three"));
        // Idempotent
        fs.create_directory_all("/one/two/three")?;

        fs.write_file("/one/file", "")?;
        assert!(matches!(
            fs.create_directory_all("/one/file/below"),
            Err(FsError::NotADirectory)
        ));
        assert!(matches!(
            fs.create_directory_all("/one/file"),
            Err(FsError::NotADirectory)
        ));
        Ok(())
    }
}
