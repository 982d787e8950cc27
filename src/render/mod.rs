//! Presentation layer
//!
//! Markup generation for listing pages. Pure functions only; nothing here
//! resolves paths or touches the filesystem.

mod listing;

pub use listing::{escape_html, listing_href, render_listing};
