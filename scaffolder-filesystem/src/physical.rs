use std::fs;

use camino::{Utf8Path, Utf8PathBuf};

use super::{Filesystem, FsError, Result};

/// Access to a real file system
#[derive(Debug, Default)]
pub struct DiskFilesystem;

impl DiskFilesystem {
    /// Constructs access to the real file system
    pub fn new() -> Self {
        DiskFilesystem
    }
}

impl Filesystem for DiskFilesystem {
    fn create_directory(&mut self, path: impl AsRef<Utf8Path>) -> Result<()> {
        Ok(fs::create_dir(path.as_ref())?)
    }

    fn write_file(&mut self, path: impl AsRef<Utf8Path>, content: &str) -> Result<()> {
        let path = path.as_ref();
        if self.is_directory(path) {
            return Err(FsError::IsADirectory);
        }
        if let Some(parent) = path.parent() {
            if self.exists(parent) && !self.is_directory(parent) {
                return Err(FsError::NotADirectory);
            }
        }
        Ok(fs::write(path, content)?)
    }

    fn create_symlink(
        &mut self,
        path: impl AsRef<Utf8Path>,
        target: impl AsRef<Utf8Path>,
    ) -> Result<()> {
        Ok(std::os::unix::fs::symlink(target.as_ref(), path.as_ref())?)
    }

    fn exists(&self, path: impl AsRef<Utf8Path>) -> bool {
        fs::metadata(path.as_ref()).is_ok()
    }

    fn is_directory(&self, path: impl AsRef<Utf8Path>) -> bool {
        fs::metadata(path.as_ref())
            .map(|m| m.file_type().is_dir())
            .unwrap_or(false)
    }

    fn is_file(&self, path: impl AsRef<Utf8Path>) -> bool {
        fs::metadata(path.as_ref())
            .map(|m| m.file_type().is_file())
            .unwrap_or(false)
    }

    fn is_link(&self, path: impl AsRef<Utf8Path>) -> bool {
        fs::symlink_metadata(path.as_ref())
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false)
    }

    fn list_directory(&self, path: impl AsRef<Utf8Path>) -> Result<Vec<String>> {
        let mut listing = Vec::new();
        for entry in fs::read_dir(path.as_ref())? {
            let entry = entry?;
            listing.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(listing)
    }

    fn read_file(&self, path: impl AsRef<Utf8Path>) -> Result<String> {
        Ok(fs::read_to_string(path.as_ref())?)
    }

    fn read_link(&self, path: impl AsRef<Utf8Path>) -> Result<Utf8PathBuf> {
        let target = fs::read_link(path.as_ref())?;
        Utf8PathBuf::from_path_buf(target).map_err(|_| FsError::NonUtf8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().to_owned()).unwrap();
        (dir, path)
    }

    #[test]
    fn create_and_read() -> Result<()> {
        let (_dir, root) = temp_root();
        let mut fs = DiskFilesystem::new();
        fs.create_directory_all(root.join("a/b"))?;
        fs.write_file(root.join("a/b/file.txt"), "content")?;
        assert!(fs.is_directory(root.join("a/b")));
        assert!(fs.is_file(root.join("a/b/file.txt")));
        assert_eq!(fs.read_file(root.join("a/b/file.txt"))?, "content");
        assert_eq!(fs.list_directory(root.join("a"))?, vec!["b".to_owned()]);
        Ok(())
    }

    #[test]
    fn write_onto_directory() -> Result<()> {
        let (_dir, root) = temp_root();
        let mut fs = DiskFilesystem::new();
        fs.create_directory(root.join("dir"))?;
        assert!(matches!(
            fs.write_file(root.join("dir"), ""),
            Err(FsError::IsADirectory)
        ));
        fs.write_file(root.join("file"), "")?;
        assert!(matches!(
            fs.write_file(root.join("file/below"), ""),
            Err(FsError::NotADirectory)
        ));
        Ok(())
    }

    #[test]
    fn canonicalize_through_symlink() -> Result<()> {
        let (_dir, root) = temp_root();
        let root = fs::canonicalize(&root)
            .map(|p| Utf8PathBuf::from_path_buf(p).unwrap())
            .unwrap();
        let mut fs = DiskFilesystem::new();
        fs.create_directory(root.join("real"))?;
        fs.create_symlink(root.join("link"), "real")?;
        assert!(fs.is_link(root.join("link")));
        assert_eq!(
            fs.canonicalize(root.join("link/not/yet"))?,
            root.join("real/not/yet")
        );
        Ok(())
    }
}
