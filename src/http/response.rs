//! HTTP response building module
//!
//! Provides builders for the responses the server emits, decoupled from the
//! resource logic. Builders never panic: a build failure is logged and an
//! empty response returned instead.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, ALLOW, CONTENT_LENGTH, SERVER};
use hyper::{Method, Response, StatusCode};
use serde::Serialize;

use crate::config::HttpConfig;

pub type HttpResponse = Response<Full<Bytes>>;

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";
pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";

/// Build a response with a body and content type
pub fn build_response(status: StatusCode, content_type: &str, body: impl Into<Bytes>) -> HttpResponse {
    let body = body.into();
    Response::builder()
        .status(status)
        .header("Content-Type", content_type)
        .header(CONTENT_LENGTH, body.len())
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

pub fn build_text_response(status: StatusCode, body: impl Into<String>) -> HttpResponse {
    build_response(status, CONTENT_TYPE_TEXT, body.into())
}

pub fn build_html_response(status: StatusCode, html: String) -> HttpResponse {
    build_response(status, CONTENT_TYPE_HTML, html)
}

/// Serialize `body` as JSON; a serialization failure becomes a 500
pub fn build_json_response<T: Serialize + ?Sized>(status: StatusCode, body: &T) -> HttpResponse {
    match serde_json::to_vec(body) {
        Ok(json) => build_response(status, CONTENT_TYPE_JSON, json),
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            build_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                CONTENT_TYPE_JSON,
                r#"{"error":"internal_error","message":"failed to serialize response"}"#,
            )
        }
    }
}

/// Build 303 See Other redirect, used after HTML form submissions
pub fn build_redirect_response(target: &str) -> HttpResponse {
    Response::builder()
        .status(StatusCode::SEE_OTHER)
        .header("Location", target)
        .header("Content-Type", CONTENT_TYPE_TEXT)
        .body(Full::new(Bytes::from("Redirecting...")))
        .unwrap_or_else(|e| {
            log_build_error("303", &e);
            Response::new(Full::new(Bytes::from("Redirecting...")))
        })
}

/// Build OPTIONS response listing the methods bound to the path
pub fn build_options_response(allowed: &[Method], enable_cors: bool) -> HttpResponse {
    let allow = allow_header(allowed);
    let mut builder = Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header(ALLOW, &allow);

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Methods", &allow)
            .header("Access-Control-Allow-Headers", "Content-Type, Accept")
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("OPTIONS", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> HttpResponse {
    build_text_response(StatusCode::PAYLOAD_TOO_LARGE, "413 Payload Too Large")
}

/// Build health check response
pub fn build_health_response(status: &str) -> HttpResponse {
    build_json_response(StatusCode::OK, &serde_json::json!({ "status": status }))
}

/// Add the `Server` header and, when enabled, the CORS origin header
pub fn apply_common_headers(response: &mut HttpResponse, http_config: &HttpConfig) {
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&http_config.server_name) {
        headers.insert(SERVER, value);
    }
    if http_config.enable_cors {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    }
}

/// Drop the body for HEAD requests, keeping the headers (and Content-Length) intact
pub fn strip_body(response: HttpResponse) -> HttpResponse {
    let (parts, _) = response.into_parts();
    Response::from_parts(parts, Full::new(Bytes::new()))
}

/// Comma separated method list for the `Allow` header
pub fn allow_header(methods: &[Method]) -> String {
    let mut names: Vec<&str> = methods.iter().map(Method::as_str).collect();
    if !names.contains(&"OPTIONS") {
        names.push("OPTIONS");
    }
    names.join(", ")
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
