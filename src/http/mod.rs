//! HTTP protocol layer
//!
//! Protocol-level building blocks shared by the request handler: MIME type
//! detection, HTTP-date handling, response builders, and the cache-defeating
//! response filter.

pub mod date;
pub mod mime;
pub mod no_cache;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_301_response, build_304_response, build_404_response, build_405_response,
    build_file_response, build_html_response,
};
