use std::collections::{HashMap, HashSet};

use camino::{Utf8Path, Utf8PathBuf};

use super::{Filesystem, FsError, Result};

/// An in-memory representation of a file system
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    map: HashMap<Utf8PathBuf, Node>,
}

#[derive(Debug, Clone)]
enum Node {
    File { content: String },
    Directory { children: Vec<String> },
    Symlink { target: Utf8PathBuf },
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFilesystem {
    /// Constructs a new, empty filesystem containing only the root directory
    pub fn new() -> Self {
        let mut map = HashMap::new();
        map.insert("/".into(), Node::Directory { children: vec![] });
        MemoryFilesystem { map }
    }

    /// Every path present, for checking the full effect of an operation
    pub fn to_path_set(&self) -> HashSet<String> {
        self.map.keys().map(|path| path.to_string()).collect()
    }

    fn canonical_split(&self, path: &Utf8Path) -> Result<(Utf8PathBuf, String)> {
        match (path.parent(), path.file_name()) {
            (Some(parent), Some(name)) => Ok((self.canonicalize(parent)?, name.to_owned())),
            _ => Err(FsError::AlreadyExists),
        }
    }

    fn node(&self, path: impl AsRef<Utf8Path>) -> Option<&Node> {
        let path = self.canonicalize(path).ok()?;
        self.map.get(&path)
    }

    /// Inserts a new entry into the filesystem, under the given *canonical* parent
    fn insert_node(&mut self, parent: &Utf8Path, name: &str, node: Node) -> Result<()> {
        let path = parent.join(name);
        if self.map.contains_key(&path) {
            return Err(FsError::AlreadyExists);
        }
        match self.map.get_mut(parent) {
            None => return Err(FsError::NotFound),
            Some(Node::Directory { children }) => children.push(name.to_owned()),
            Some(_) => return Err(FsError::NotADirectory),
        }
        self.map.insert(path, node);
        Ok(())
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_directory(&mut self, path: impl AsRef<Utf8Path>) -> Result<()> {
        let path = self.canonicalize(path)?;
        let (parent, name) = self.canonical_split(&path)?;
        self.insert_node(&parent, &name, Node::Directory { children: vec![] })
    }

    fn write_file(&mut self, path: impl AsRef<Utf8Path>, content: &str) -> Result<()> {
        let path = self.canonicalize(path)?;
        match self.map.get_mut(&path) {
            Some(Node::File { content: existing }) => {
                content.clone_into(existing);
                Ok(())
            }
            Some(_) => Err(FsError::IsADirectory),
            None => {
                let (parent, name) = self.canonical_split(&path)?;
                self.insert_node(
                    &parent,
                    &name,
                    Node::File {
                        content: content.to_owned(),
                    },
                )
            }
        }
    }

    fn create_symlink(
        &mut self,
        path: impl AsRef<Utf8Path>,
        target: impl AsRef<Utf8Path>,
    ) -> Result<()> {
        let (parent, name) = self.canonical_split(path.as_ref())?;
        self.insert_node(
            &parent,
            &name,
            Node::Symlink {
                target: target.as_ref().to_owned(),
            },
        )
    }

    fn exists(&self, path: impl AsRef<Utf8Path>) -> bool {
        self.node(path).is_some()
    }

    fn is_directory(&self, path: impl AsRef<Utf8Path>) -> bool {
        matches!(self.node(path), Some(Node::Directory { .. }))
    }

    fn is_file(&self, path: impl AsRef<Utf8Path>) -> bool {
        matches!(self.node(path), Some(Node::File { .. }))
    }

    fn is_link(&self, path: impl AsRef<Utf8Path>) -> bool {
        matches!(self.map.get(path.as_ref()), Some(Node::Symlink { .. }))
    }

    fn list_directory(&self, path: impl AsRef<Utf8Path>) -> Result<Vec<String>> {
        match self.node(path) {
            None => Err(FsError::NotFound),
            Some(Node::Directory { children }) => Ok(children.clone()),
            Some(_) => Err(FsError::NotADirectory),
        }
    }

    fn read_file(&self, path: impl AsRef<Utf8Path>) -> Result<String> {
        match self.node(path) {
            None => Err(FsError::NotFound),
            Some(Node::File { content }) => Ok(content.clone()),
            Some(_) => Err(FsError::IsADirectory),
        }
    }

    fn read_link(&self, path: impl AsRef<Utf8Path>) -> Result<Utf8PathBuf> {
        match self.map.get(path.as_ref()) {
            None => Err(FsError::NotFound),
            Some(Node::Symlink { target }) => Ok(target.clone()),
            Some(_) => Err(FsError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "not a symbolic link",
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exists() {
        let mut fs = MemoryFilesystem::new();
        assert!(fs.exists("/"));
        assert!(!fs.exists("/entry"));
        fs.create_directory("/entry").unwrap();
        assert!(fs.exists("/entry"));
    }

    #[test]
    fn test_symlink_make_sub_directory() {
        let mut fs = MemoryFilesystem::new();
        fs.create_directory("/primary").unwrap();
        fs.create_directory("/secondary").unwrap();
        fs.create_symlink("/primary/link", "/secondary/target")
            .unwrap();
        fs.create_directory("/secondary/target").unwrap();
        fs.create_directory("/primary/link/through").unwrap();
        assert!(fs.exists("/primary/link/through"));
        assert!(fs.is_directory("/secondary/target/through"));
    }

    #[test]
    fn test_write_file_replaces_content() {
        let mut fs = MemoryFilesystem::new();
        fs.write_file("/file", "one").unwrap();
        fs.write_file("/file", "two").unwrap();
        assert_eq!(fs.read_file("/file").unwrap(), "two");
        assert_eq!(fs.list_directory("/").unwrap(), vec!["file".to_owned()]);
    }

    #[test]
    fn test_write_file_errors() {
        let mut fs = MemoryFilesystem::new();
        fs.create_directory("/dir").unwrap();
        assert!(matches!(
            fs.write_file("/dir", "x"),
            Err(FsError::IsADirectory)
        ));
        assert!(matches!(
            fs.write_file("/missing/file", "x"),
            Err(FsError::NotFound)
        ));
        fs.write_file("/file", "x").unwrap();
        assert!(matches!(
            fs.write_file("/file/below", "x"),
            Err(FsError::NotADirectory)
        ));
    }

    #[test]
    fn test_create_directory_twice() {
        let mut fs = MemoryFilesystem::new();
        fs.create_directory("/dir").unwrap();
        assert!(matches!(
            fs.create_directory("/dir"),
            Err(FsError::AlreadyExists)
        ));
    }
}
