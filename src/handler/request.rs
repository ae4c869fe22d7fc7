//! Request decoding
//!
//! Turns the query string and body of an incoming request into `Params`
//! and record `Fields`, and applies the `_method` override used by HTML forms.

use hyper::Method;
use serde_json::Value;
use url::form_urlencoded;

use crate::error::ResourceError;
use crate::routing::Params;
use crate::store::Fields;

/// Form field (or query parameter) that replaces a POST's method
pub const METHOD_OVERRIDE: &str = "_method";

pub fn parse_query(query: Option<&str>) -> Params {
    query.map_or_else(Params::new, |q| {
        Params::from_pairs(form_urlencoded::parse(q.as_bytes()))
    })
}

/// Decode a request body into record fields.
///
/// JSON bodies must be a single object. Form bodies are
/// `application/x-www-form-urlencoded`, where a repeated key keeps its
/// last value (a checkbox posts a hidden `false` before the box itself).
/// Without a content type the body is sniffed; any other type is rejected.
pub fn parse_body(content_type: Option<&str>, body: &[u8]) -> Result<Fields, ResourceError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Fields::new());
    }

    let is_json = match content_type.map(media_type) {
        None => body.trim_ascii_start().starts_with(b"{"),
        Some(mt) if mt == "application/json" || mt.ends_with("+json") => true,
        Some(mt) if mt == "application/x-www-form-urlencoded" => false,
        Some(mt) => {
            return Err(ResourceError::Validation(format!(
                "unsupported content type `{mt}`"
            )))
        }
    };
    if is_json {
        return match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(fields)) => Ok(fields),
            Ok(_) => Err(ResourceError::Validation(
                "request body must be a JSON object".to_string(),
            )),
            Err(e) => Err(ResourceError::Validation(format!("invalid JSON body: {e}"))),
        };
    }

    let mut fields = Fields::new();
    for (key, value) in form_urlencoded::parse(body) {
        fields.insert(key.into_owned(), Value::String(value.into_owned()));
    }
    Ok(fields)
}

/// Lowercased media type without parameters (`text/html; charset=utf-8` -> `text/html`)
fn media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Resolve the method a POST asks to be treated as.
///
/// The body's `_method` takes precedence over the query string's. The
/// override field is always removed from `fields` so it never reaches a record.
pub fn method_override(method: &Method, query: &Params, fields: &mut Fields) -> Method {
    let from_body = fields
        .remove(METHOD_OVERRIDE)
        .and_then(|v| v.as_str().map(str::to_ascii_uppercase));
    if *method != Method::POST {
        return method.clone();
    }

    let requested = from_body.or_else(|| query.get(METHOD_OVERRIDE).map(str::to_ascii_uppercase));
    match requested.as_deref() {
        Some("PUT") => Method::PUT,
        Some("DELETE") => Method::DELETE,
        _ => Method::POST,
    }
}
