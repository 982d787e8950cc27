//! Request handler module
//!
//! `browse` runs the resolution pipeline without any HTTP types; `router`
//! adapts it to hyper requests and responses.

pub mod browse;
pub mod router;

// Re-export main entry point
pub use browse::{browse, Outcome};
pub use router::handle_request;
