//! HTTP protocol layer module
//!
//! Content-type lookup and response builders, decoupled from resolution logic.

pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_403_response, build_404_response, build_405_response, build_500_response,
    build_content_response, build_html_response, build_redirect_response,
};
