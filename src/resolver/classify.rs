//! Entry classification
//!
//! Decides whether a confined path is a file, a directory carrying an index
//! document, or a plain directory to enumerate.

use super::confine::ResolvedPath;
use super::error::{is_missing, BrowseError};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Kind of a directory child
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// Immediate child of a listed directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl DirectoryEntry {
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Classification of an existing, confined path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// Anything that is not a directory
    File(PathBuf),
    /// Directory holding the index document
    DirectoryWithIndex { dir: PathBuf, index: PathBuf },
    /// Directory without an index document, children in filesystem order
    DirectoryPlain {
        dir: PathBuf,
        entries: Vec<DirectoryEntry>,
    },
}

/// Classify `resolved`, looking for `index_file` inside directories.
///
/// A missing target is [`BrowseError::NotFound`]; any other failure to stat
/// or enumerate propagates as [`BrowseError::IoFailure`].
pub async fn classify(resolved: &ResolvedPath, index_file: &str) -> Result<Entry, BrowseError> {
    let path = resolved.as_path();

    let metadata = match fs::metadata(path).await {
        Ok(m) => m,
        Err(e) if is_missing(&e) => return Err(BrowseError::NotFound),
        Err(e) => return Err(BrowseError::IoFailure(e)),
    };

    if !metadata.is_dir() {
        return Ok(Entry::File(path.to_path_buf()));
    }

    let index = path.join(index_file);
    if is_regular_file(&index).await? {
        return Ok(Entry::DirectoryWithIndex {
            dir: path.to_path_buf(),
            index,
        });
    }

    let entries = read_entries(path).await?;
    Ok(Entry::DirectoryPlain {
        dir: path.to_path_buf(),
        entries,
    })
}

/// Read the immediate children of `dir` in the order the filesystem returns them.
///
/// Symlinks are followed to decide their kind; a dangling link counts as a file.
pub async fn read_entries(dir: &Path) -> io::Result<Vec<DirectoryEntry>> {
    let mut read_dir = fs::read_dir(dir).await?;
    let mut entries = Vec::new();

    while let Some(child) = read_dir.next_entry().await? {
        let file_type = child.file_type().await?;
        let is_dir = if file_type.is_symlink() {
            fs::metadata(child.path())
                .await
                .is_ok_and(|m| m.is_dir())
        } else {
            file_type.is_dir()
        };

        entries.push(DirectoryEntry {
            name: child.file_name().to_string_lossy().into_owned(),
            kind: if is_dir {
                EntryKind::Directory
            } else {
                EntryKind::File
            },
        });
    }

    Ok(entries)
}

async fn is_regular_file(path: &Path) -> Result<bool, BrowseError> {
    match fs::metadata(path).await {
        Ok(m) => Ok(m.is_file()),
        Err(e) if is_missing(&e) => Ok(false),
        Err(e) => Err(BrowseError::IoFailure(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{ContentRoot, LogicalPath};
    use std::fs as stdfs;

    fn setup() -> (tempfile::TempDir, ContentRoot) {
        let dir = tempfile::tempdir().unwrap();
        let root = ContentRoot::new(dir.path().canonicalize().unwrap()).unwrap();
        (dir, root)
    }

    async fn classify_str(root: &ContentRoot, path: &str) -> Result<Entry, BrowseError> {
        let resolved = root.resolve(&LogicalPath::new(path)).unwrap();
        classify(&resolved, "index.html").await
    }

    fn sorted_names(entries: &[DirectoryEntry]) -> Vec<&str> {
        let mut names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    #[tokio::test]
    async fn test_missing_is_not_found() {
        let (_dir, root) = setup();
        assert!(matches!(
            classify_str(&root, "nope.txt").await,
            Err(BrowseError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_path_through_file_is_not_found() {
        let (dir, root) = setup();
        stdfs::write(dir.path().join("a.txt"), b"a").unwrap();
        assert!(matches!(
            classify_str(&root, "a.txt/child").await,
            Err(BrowseError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_regular_file() {
        let (dir, root) = setup();
        stdfs::write(dir.path().join("style.css"), b"body{}").unwrap();
        match classify_str(&root, "style.css").await.unwrap() {
            Entry::File(path) => assert!(path.ends_with("style.css")),
            other => panic!("expected file, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_root_is_directory() {
        let (dir, root) = setup();
        stdfs::write(dir.path().join("a.txt"), b"a").unwrap();
        match classify_str(&root, "").await.unwrap() {
            Entry::DirectoryPlain { dir: listed, .. } => assert_eq!(listed, root.path()),
            other => panic!("expected plain directory, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_index_takes_precedence() {
        let (dir, root) = setup();
        let site = dir.path().join("site");
        stdfs::create_dir_all(site.join("assets")).unwrap();
        stdfs::create_dir_all(site.join("pages")).unwrap();
        stdfs::write(site.join("index.html"), b"<h1>hi</h1>").unwrap();
        stdfs::write(site.join("about.html"), b"about").unwrap();
        stdfs::write(site.join("main.js"), b"").unwrap();

        match classify_str(&root, "site").await.unwrap() {
            Entry::DirectoryWithIndex { index, .. } => assert!(index.ends_with("site/index.html")),
            other => panic!("expected directory with index, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_index_directory_is_not_an_index() {
        let (dir, root) = setup();
        stdfs::create_dir_all(dir.path().join("site/index.html")).unwrap();
        assert!(matches!(
            classify_str(&root, "site").await.unwrap(),
            Entry::DirectoryPlain { .. }
        ));
    }

    #[tokio::test]
    async fn test_plain_directory_lists_children() {
        let (dir, root) = setup();
        stdfs::write(dir.path().join("a.txt"), b"a").unwrap();
        stdfs::create_dir(dir.path().join("sub")).unwrap();

        let Entry::DirectoryPlain { entries, .. } = classify_str(&root, "").await.unwrap() else {
            panic!("expected plain directory");
        };
        assert_eq!(sorted_names(&entries), vec!["a.txt", "sub"]);
        let sub = entries.iter().find(|e| e.name == "sub").unwrap();
        assert!(sub.is_dir());
        let file = entries.iter().find(|e| e.name == "a.txt").unwrap();
        assert_eq!(file.kind, EntryKind::File);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlinked_directory_counts_as_directory() {
        let (dir, root) = setup();
        stdfs::create_dir(dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("link")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("dangling")).unwrap();

        let entries = read_entries(root.path()).await.unwrap();
        let link = entries.iter().find(|e| e.name == "link").unwrap();
        assert!(link.is_dir());
        let dangling = entries.iter().find(|e| e.name == "dangling").unwrap();
        assert_eq!(dangling.kind, EntryKind::File);
    }

    #[tokio::test]
    async fn test_custom_index_name() {
        let (dir, root) = setup();
        stdfs::write(dir.path().join("default.htm"), b"x").unwrap();
        let resolved = root.resolve(&LogicalPath::root()).unwrap();
        assert!(matches!(
            classify(&resolved, "default.htm").await.unwrap(),
            Entry::DirectoryWithIndex { .. }
        ));
        assert!(matches!(
            classify(&resolved, "index.html").await.unwrap(),
            Entry::DirectoryPlain { .. }
        ));
    }
}
