//! Browse pipeline
//!
//! Path Resolver -> Entry Classifier -> Content Responder, with no HTTP types
//! involved. The first failing stage short-circuits the rest.

use crate::config::ContentConfig;
use crate::http::mime;
use crate::render::listing_href;
use crate::resolver::{
    classify, read_entries, respond_file, respond_listing, sort_entries, BrowseError,
    ContentRoot, DirectoryEntry, Entry, EntryKind, IndexPolicy, LogicalPath,
};
use tokio::fs;

/// Successful result of browsing one logical path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Raw bytes with an extension-derived content type
    File {
        body: Vec<u8>,
        content_type: &'static str,
    },
    /// Generated listing page
    Listing(String),
    /// Send the client elsewhere (`Location` value)
    Redirect(String),
}

/// Browse `logical` under `root` using the deployment's content settings
pub async fn browse(
    root: &ContentRoot,
    settings: &ContentConfig,
    logical: &LogicalPath,
) -> Result<Outcome, BrowseError> {
    let resolved = root.resolve(logical)?;

    match classify(&resolved, &settings.index_file).await? {
        Entry::File(path) => {
            let (body, content_type) = respond_file(&path).await?;
            Ok(Outcome::File { body, content_type })
        }
        Entry::DirectoryWithIndex { dir, index } => match settings.index_policy {
            IndexPolicy::Serve => Ok(Outcome::File {
                body: fs::read(&index).await?,
                content_type: mime::HTML,
            }),
            IndexPolicy::Redirect => Ok(Outcome::Redirect(listing_href(
                &settings.query_param,
                &logical.join(&settings.index_file),
                EntryKind::File,
            ))),
            IndexPolicy::Ignore => {
                let entries = read_entries(&dir).await?;
                Ok(listing(logical, entries, settings))
            }
        },
        Entry::DirectoryPlain { entries, .. } => Ok(listing(logical, entries, settings)),
    }
}

fn listing(
    logical: &LogicalPath,
    mut entries: Vec<DirectoryEntry>,
    settings: &ContentConfig,
) -> Outcome {
    if !settings.show_hidden {
        entries.retain(|e| !e.name.starts_with('.'));
    }
    sort_entries(&mut entries, settings.listing_order);
    Outcome::Listing(respond_listing(logical, entries, &settings.query_param))
}
