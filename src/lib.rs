//! sitebrowse: confined static content browser
//!
//! Maps `/?path=<logical path>` requests onto a single content root and
//! answers with the file, the directory's index document, or a listing.
//!
//! - [`resolver`]: confinement, classification and content responses
//! - [`render`]: listing markup
//! - [`handler`]: the browse pipeline and its HTTP adapter
//! - [`http`], [`server`], [`config`], [`logger`]: hosting around the core

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod render;
pub mod resolver;
pub mod server;
