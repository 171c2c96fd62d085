//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from
//! the request-dispatch logic: MIME typing, CORS decoration,
//! conditional requests, and response builders.

pub mod conditional;
pub mod cors;
pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_304_response, build_404_response, build_405_response, build_500_response,
    build_file_response, build_html_response, build_options_response, build_redirect_response,
};
