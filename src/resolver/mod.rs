//! Content resolution core
//!
//! Maps a logical path onto the content root and decides what to send back:
//! - `path`: logical path decoding, encoding and parent navigation
//! - `confine`: content root and lexical confinement check
//! - `classify`: file / directory-with-index / plain directory decision
//! - `respond`: file bytes, listing data and listing order
//!
//! Nothing here holds state between calls; every call re-reads the filesystem.

mod classify;
mod confine;
mod error;
mod path;
mod respond;

pub use classify::{classify, read_entries, DirectoryEntry, Entry, EntryKind};
pub use confine::{resolve, ContentRoot, ResolvedPath};
pub use error::{BrowseError, RootError};
pub use path::LogicalPath;
pub use respond::{
    build_listing, respond_file, respond_listing, sort_entries, IndexPolicy, Listing, ListingItem,
    ListingOrder,
};
