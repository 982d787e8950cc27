//! Content responses
//!
//! File bytes with their content type, and the data behind a directory
//! listing. Turning a [`Listing`] into markup is left to [`crate::render`].

use super::classify::{DirectoryEntry, EntryKind};
use super::error::BrowseError;
use super::path::LogicalPath;
use crate::http::mime;
use crate::render;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::Path;
use tokio::fs;

/// What to do with a directory that holds the index document.
/// Chosen once per deployment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexPolicy {
    /// Send the client to `<dir>/index.html`
    #[default]
    Redirect,
    /// Return the index document directly as HTML
    Serve,
    /// List the directory as if there were no index document
    Ignore,
}

/// Order of entries in a directory listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingOrder {
    /// Whatever order the filesystem returns (not stable across platforms)
    Fs,
    /// Lexicographic by name
    Name,
    /// Directories first, then lexicographic by name
    #[default]
    DirsFirst,
}

/// One navigable row of a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingItem {
    pub name: String,
    /// Logical path of the child
    pub target: LogicalPath,
    pub kind: EntryKind,
}

/// Listing data for one directory, independent of presentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    /// Normalized logical path of the listed directory
    pub path: LogicalPath,
    /// Parent reference, absent at the root
    pub parent: Option<LogicalPath>,
    pub items: Vec<ListingItem>,
}

/// Read a file whole and pick its content type from the extension
pub async fn respond_file(path: &Path) -> Result<(Vec<u8>, &'static str), BrowseError> {
    let bytes = fs::read(path).await?;
    Ok((bytes, mime::content_type_for_path(path)))
}

/// Build listing data; entries keep the order they are given in
pub fn build_listing(logical: &LogicalPath, entries: Vec<DirectoryEntry>) -> Listing {
    let path = logical.normalized();
    let items = entries
        .into_iter()
        .map(|entry| ListingItem {
            target: path.join(&entry.name),
            name: entry.name,
            kind: entry.kind,
        })
        .collect();

    Listing {
        parent: path.parent(),
        path,
        items,
    }
}

/// Render the listing page for `entries` under `logical`.
///
/// Links address the content through the `query_param` query parameter.
pub fn respond_listing(
    logical: &LogicalPath,
    entries: Vec<DirectoryEntry>,
    query_param: &str,
) -> String {
    render::render_listing(&build_listing(logical, entries), query_param)
}

/// Sort entries in place according to `order`
pub fn sort_entries(entries: &mut [DirectoryEntry], order: ListingOrder) {
    match order {
        ListingOrder::Fs => {}
        ListingOrder::Name => entries.sort_by(|a, b| a.name.cmp(&b.name)),
        ListingOrder::DirsFirst => entries.sort_by(|a, b| match (a.is_dir(), b.is_dir()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => a.name.cmp(&b.name),
        }),
    }
}
