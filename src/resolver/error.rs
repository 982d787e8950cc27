//! Error types for content resolution

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Terminal outcome of a failed browse request.
///
/// Each variant maps to exactly one client-visible status; none is retried.
#[derive(Debug, Error)]
pub enum BrowseError {
    /// The logical path leaves the content root.
    #[error("path escapes the content root")]
    ConfinementViolation,
    /// The resolved path does not exist.
    #[error("no such file or directory")]
    NotFound,
    /// Reading an existing, in-bounds path failed.
    #[error("filesystem failure: {0}")]
    IoFailure(#[from] io::Error),
}

impl BrowseError {
    /// HTTP status code surfaced to the client
    pub const fn status(&self) -> u16 {
        match self {
            Self::ConfinementViolation => 403,
            Self::NotFound => 404,
            Self::IoFailure(_) => 500,
        }
    }
}

/// Failure to set up the content root at startup
#[derive(Debug, Error)]
pub enum RootError {
    #[error("content root must be an absolute path: {}", .0.display())]
    Relative(PathBuf),
    #[error("content root '{}' is not accessible: {source}", .path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("content root '{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),
}

/// Whether an I/O error means the target simply is not there.
///
/// `NotADirectory` covers lookups through a regular file (`a.txt/b`), and
/// `InvalidInput` covers names the OS refuses outright (embedded NUL).
pub(crate) fn is_missing(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory | io::ErrorKind::InvalidInput
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(BrowseError::ConfinementViolation.status(), 403);
        assert_eq!(BrowseError::NotFound.status(), 404);
        let io = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(BrowseError::from(io).status(), 500);
    }

    #[test]
    fn test_missing_kinds() {
        assert!(is_missing(&io::Error::from(io::ErrorKind::NotFound)));
        assert!(is_missing(&io::Error::from(io::ErrorKind::NotADirectory)));
        assert!(!is_missing(&io::Error::from(io::ErrorKind::PermissionDenied)));
    }
}
