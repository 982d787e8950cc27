//! Logical path handling
//!
//! A logical path is what the client asks for, relative to the content root,
//! with `/` as the only separator. It is never touched by the filesystem here.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use std::fmt;

/// Bytes escaped when a logical path is embedded as a query value.
/// `/` stays literal so generated links remain readable.
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'\'')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// User-supplied path relative to the content root (already percent-decoded)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LogicalPath(String);

impl LogicalPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The empty path, i.e. the content root
    pub const fn root() -> Self {
        Self(String::new())
    }

    /// Percent-decode a raw query value.
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected; the result
    /// simply won't name an existing entry.
    pub fn decode(raw: &str) -> Self {
        Self(percent_decode_str(raw).decode_utf8_lossy().into_owned())
    }

    /// Percent-encode for use as a query value
    pub fn encode(&self) -> String {
        utf8_percent_encode(&self.0, QUERY_VALUE).to_string()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Non-empty `/`-separated segments
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    pub fn is_root(&self) -> bool {
        self.segments().next().is_none()
    }

    /// Same path with redundant slashes removed (`/a//b/` -> `a/b`)
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self(self.segments().collect::<Vec<_>>().join("/"))
    }

    /// Path with the last segment dropped; `None` at the root
    pub fn parent(&self) -> Option<Self> {
        let segments: Vec<&str> = self.segments().collect();
        let (_, rest) = segments.split_last()?;
        Some(Self(rest.join("/")))
    }

    /// Append a child name
    #[must_use]
    pub fn join(&self, name: &str) -> Self {
        let mut segments: Vec<&str> = self.segments().collect();
        segments.push(name);
        Self(segments.join("/"))
    }
}

impl fmt::Display for LogicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LogicalPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}
