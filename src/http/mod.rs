//! HTTP protocol layer module
//!
//! Provides HTTP response builders shared by the renderer and the request handler.

pub mod response;

// Re-export commonly used types
pub use response::{
    apply_common_headers, build_413_response, build_health_response, build_html_response,
    build_json_response, build_options_response, build_redirect_response,
    build_text_response, strip_body, HttpResponse,
};
