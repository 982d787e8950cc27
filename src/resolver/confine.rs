//! Content root confinement
//!
//! Resolution is purely lexical: the logical path is folded onto the root
//! component by component and checked before anything touches the disk, so
//! out-of-root requests never reveal whether their target exists.

use super::error::{BrowseError, RootError};
use super::path::LogicalPath;
use std::path::{Component, Path, PathBuf};

/// Absolute base directory all content is served from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRoot {
    path: PathBuf,
}

impl ContentRoot {
    /// Wrap an absolute path without touching the filesystem.
    ///
    /// `.` and `..` components are folded away so the stored root is in the
    /// same normalized form as every resolved path.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, RootError> {
        let path = path.into();
        if !path.is_absolute() {
            return Err(RootError::Relative(path));
        }
        Ok(Self {
            path: normalize(&path),
        })
    }

    /// Canonicalize an existing directory for use as the root.
    ///
    /// Relative paths are taken from the working directory and symlinks are
    /// resolved once, here, at startup.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, RootError> {
        let path = path.as_ref();
        let canonical =
            tokio::fs::canonicalize(path)
                .await
                .map_err(|source| RootError::Unavailable {
                    path: path.to_path_buf(),
                    source,
                })?;
        let metadata =
            tokio::fs::metadata(&canonical)
                .await
                .map_err(|source| RootError::Unavailable {
                    path: canonical.clone(),
                    source,
                })?;
        if !metadata.is_dir() {
            return Err(RootError::NotADirectory(canonical));
        }
        Ok(Self { path: canonical })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve a logical path under this root
    pub fn resolve(&self, logical: &LogicalPath) -> Result<ResolvedPath, BrowseError> {
        resolve(self, logical)
    }
}

/// Absolute path known to lie inside a [`ContentRoot`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    path: PathBuf,
    logical: LogicalPath,
}

impl ResolvedPath {
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// The logical path this was resolved from
    pub const fn logical(&self) -> &LogicalPath {
        &self.logical
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.path
    }
}

impl AsRef<Path> for ResolvedPath {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// Join `logical` onto `root` and enforce confinement.
///
/// Leading `/` and `.` segments are ignored. A `..` that would climb above
/// the root fails immediately, even if later segments would climb back in:
/// otherwise `../<root name>/x` would let a client probe the root's name.
/// The final containment test compares whole path components, so a sibling
/// such as `/srv/sites-evil` never passes for a root of `/srv/sites`.
pub fn resolve(root: &ContentRoot, logical: &LogicalPath) -> Result<ResolvedPath, BrowseError> {
    let mut resolved = root.path.clone();
    let mut depth = 0usize;

    for component in Path::new(logical.as_str()).components() {
        match component {
            Component::Normal(segment) => {
                resolved.push(segment);
                depth += 1;
            }
            Component::ParentDir => {
                if depth == 0 {
                    return Err(BrowseError::ConfinementViolation);
                }
                resolved.pop();
                depth -= 1;
            }
            Component::CurDir | Component::RootDir => {}
            Component::Prefix(_) => return Err(BrowseError::ConfinementViolation),
        }
    }

    if !resolved.starts_with(&root.path) {
        return Err(BrowseError::ConfinementViolation);
    }

    Ok(ResolvedPath {
        path: resolved,
        logical: logical.clone(),
    })
}

/// Lexically fold `.` and `..` out of an absolute path
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> ContentRoot {
        ContentRoot::new("/srv/sites").expect("absolute root")
    }

    fn resolve_str(path: &str) -> Result<PathBuf, BrowseError> {
        root()
            .resolve(&LogicalPath::new(path))
            .map(ResolvedPath::into_path_buf)
    }

    #[test]
    fn test_empty_path_is_root() {
        assert_eq!(resolve_str("").unwrap(), PathBuf::from("/srv/sites"));
        assert_eq!(resolve_str("/").unwrap(), PathBuf::from("/srv/sites"));
        assert_eq!(resolve_str("./").unwrap(), PathBuf::from("/srv/sites"));
    }

    #[test]
    fn test_nested_path() {
        assert_eq!(
            resolve_str("blog/posts/first.html").unwrap(),
            PathBuf::from("/srv/sites/blog/posts/first.html")
        );
    }

    #[test]
    fn test_dot_segments_inside_root() {
        assert_eq!(
            resolve_str("blog/./drafts/../posts").unwrap(),
            PathBuf::from("/srv/sites/blog/posts")
        );
        assert_eq!(resolve_str("blog/..").unwrap(), PathBuf::from("/srv/sites"));
    }

    #[test]
    fn test_leading_slash_stays_inside() {
        assert_eq!(
            resolve_str("/etc/passwd").unwrap(),
            PathBuf::from("/srv/sites/etc/passwd")
        );
    }

    #[test]
    fn test_traversal_is_forbidden() {
        for path in [
            "..",
            "../secret",
            "../../../../etc/passwd",
            "a/../../secret",
            "a/b/../../../x",
            "./../sites/index.html",
        ] {
            assert!(
                matches!(resolve_str(path), Err(BrowseError::ConfinementViolation)),
                "expected {path} to be rejected"
            );
        }
    }

    #[test]
    fn test_sibling_prefix_is_forbidden() {
        assert!(matches!(
            resolve_str("../sites-evil/index.html"),
            Err(BrowseError::ConfinementViolation)
        ));
    }

    #[test]
    fn test_decoded_traversal_is_forbidden() {
        let logical = LogicalPath::decode("%2E%2E/%2E%2E/etc/passwd");
        assert!(matches!(
            root().resolve(&logical),
            Err(BrowseError::ConfinementViolation)
        ));
    }

    #[test]
    fn test_resolved_keeps_logical_path() {
        let logical = LogicalPath::new("a/b.txt");
        let resolved = root().resolve(&logical).unwrap();
        assert_eq!(resolved.logical(), &logical);
    }

    #[test]
    fn test_relative_root_rejected() {
        assert!(matches!(
            ContentRoot::new("sites"),
            Err(RootError::Relative(_))
        ));
    }

    #[test]
    fn test_root_is_normalized() {
        let root = ContentRoot::new("/srv/./other/../sites").unwrap();
        assert_eq!(root.path(), Path::new("/srv/sites"));
    }

    #[tokio::test]
    async fn test_open_canonicalizes_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = ContentRoot::open(dir.path()).await.unwrap();
        assert!(root.path().is_absolute());
        assert_eq!(root.path(), dir.path().canonicalize().unwrap());
    }

    #[tokio::test]
    async fn test_open_rejects_missing_and_files() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ContentRoot::open(dir.path().join("missing")).await,
            Err(RootError::Unavailable { .. })
        ));

        let file = dir.path().join("file.txt");
        std::fs::write(&file, b"x").unwrap();
        assert!(matches!(
            ContentRoot::open(&file).await,
            Err(RootError::NotADirectory(_))
        ));
    }
}
