//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: body limits, format negotiation,
//! route dispatch, endpoint execution and access logging.

use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::{Bytes, Incoming};
use hyper::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE, LOCATION, REFERER, USER_AGENT};
use hyper::http::request::Parts;
use hyper::{Method, Request, StatusCode};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Instant;

use super::endpoint::{Action, Endpoint};
use super::{exercises, request};
use crate::config::AppState;
use crate::error::ResourceError;
use crate::http::{self, HttpResponse};
use crate::logger::{self, AccessLogEntry};
use crate::render::Format;
use crate::routing::{Params, RouteMatch};
use crate::store::{Fields, RecordStore};

/// Decoded request, independent of the transport body type
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: Method,
    pub path: String,
    pub query: Params,
    pub accept: Option<String>,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl RequestContext {
    fn from_parts(parts: &Parts, body: Bytes) -> Self {
        Self {
            method: parts.method.clone(),
            path: parts.uri.path().to_string(),
            query: request::parse_query(parts.uri.query()),
            accept: header_string(parts, ACCEPT),
            content_type: header_string(parts, CONTENT_TYPE),
            body,
        }
    }
}

/// Response plus the resource it addressed, if any
pub struct Outcome {
    pub response: HttpResponse,
    pub resource: Option<&'static str>,
}

impl From<HttpResponse> for Outcome {
    fn from(response: HttpResponse) -> Self {
        Self {
            response,
            resource: None,
        }
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<HttpResponse, Infallible> {
    let started = Instant::now();
    let is_head = req.method() == Method::HEAD;
    logger::log_headers_count(req.headers().len(), state.config.logging.show_headers);

    let access_log = state.cached_access_log.load(Ordering::Relaxed);
    let entry = access_log.then(|| access_entry(&req, peer_addr));

    let max_body_size = state.config.http.max_body_size;
    let outcome = if let Some(resp) = check_body_size(&req, max_body_size) {
        Outcome::from(resp)
    } else {
        let (parts, body) = req.into_parts();
        let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
        match Limited::new(body, limit).collect().await {
            Ok(collected) => respond(&state, RequestContext::from_parts(&parts, collected.to_bytes())).await,
            Err(e) if e.is::<LengthLimitError>() => {
                logger::log_error(&format!(
                    "Request body too large: exceeds {max_body_size} bytes"
                ));
                Outcome::from(http::build_413_response())
            }
            Err(e) => {
                logger::log_warning(&format!("Failed to read request body: {e}"));
                Outcome::from(http::build_text_response(
                    StatusCode::BAD_REQUEST,
                    "400 Bad Request",
                ))
            }
        }
    };

    let Outcome {
        mut response,
        resource,
    } = outcome;
    http::apply_common_headers(&mut response, &state.config.http);
    if is_head {
        response = http::strip_body(response);
    }

    if let Some(mut entry) = entry {
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        entry.resource = resource.map(ToString::to_string);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(req: &Request<Incoming>, max_body_size: u64) -> Option<HttpResponse> {
    let content_length = req.headers().get(CONTENT_LENGTH)?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

fn access_entry(req: &Request<Incoming>, peer_addr: SocketAddr) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = match req.version() {
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2.0",
        _ => "1.1",
    }
    .to_string();
    entry.referer = req
        .headers()
        .get(REFERER)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    entry.user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    entry
}

fn header_string(parts: &Parts, name: hyper::header::HeaderName) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

/// Produce the response for a fully read request
pub async fn respond(state: &AppState, ctx: RequestContext) -> Outcome {
    let RequestContext {
        method,
        path,
        query,
        accept,
        content_type,
        body,
    } = ctx;
    let format = state.renderer.negotiate(&query, accept.as_deref());

    if method == Method::OPTIONS {
        let allowed = state.router.allowed_methods(&path);
        if allowed.is_empty() {
            let err = ResourceError::RouteNotFound {
                method: method.to_string(),
                path,
            };
            return state.renderer.render_error(format, &err).into();
        }
        return http::build_options_response(&allowed, state.config.http.enable_cors).into();
    }

    // A body that fails to parse is only reported once a route has matched;
    // the query string's `_method` still applies to it
    let parsed = if method == Method::GET || method == Method::HEAD {
        Ok(Fields::new())
    } else {
        request::parse_body(content_type.as_deref(), &body)
    };
    let (method, parsed) = match parsed {
        Ok(mut fields) => (request::method_override(&method, &query, &mut fields), Ok(fields)),
        Err(e) => (request::method_override(&method, &query, &mut Fields::new()), Err(e)),
    };
    let lookup = if method == Method::HEAD {
        Method::GET
    } else {
        method
    };

    let route = match state.router.dispatch(&lookup, &path, query) {
        Ok(route) => route,
        Err(e) => return state.renderer.render_error(format, &e).into(),
    };

    let resource = route.handler.resource();
    let fields = match parsed {
        Ok(fields) => fields,
        Err(e) => {
            return Outcome {
                response: state.renderer.render_error(format, &e),
                resource,
            }
        }
    };
    let response = match execute(state, &route, format, fields).await {
        Ok(response) => response,
        Err(e) => {
            if let ResourceError::StoreUnavailable(_) = e {
                logger::log_store_error(resource.unwrap_or("-"), &e);
            }
            state.renderer.render_error(format, &e)
        }
    };

    Outcome { response, resource }
}

async fn execute(
    state: &AppState,
    route: &RouteMatch<'_, Endpoint>,
    format: Format,
    fields: Fields,
) -> Result<HttpResponse, ResourceError> {
    match route.handler {
        Endpoint::Home => Ok(state.renderer.render_home(format, &state.registry.schemas())),
        Endpoint::Liveness => Ok(http::build_health_response("ok")),
        Endpoint::Readiness => Ok(readiness(state)),
        Endpoint::Greeting => Ok(exercises::greeting(&route.params)),
        Endpoint::Tip => exercises::tip(&route.params),
        Endpoint::Calc => exercises::calc(&route.params, &route.query),
        Endpoint::Resource { resource, action } => {
            let store = state.registry.get(resource).ok_or_else(|| {
                ResourceError::Configuration(format!("resource {resource} has no store"))
            })?;
            execute_resource(state, store, *action, &route.params, format, fields).await
        }
    }
}

async fn execute_resource(
    state: &AppState,
    store: &RecordStore,
    action: Action,
    params: &Params,
    format: Format,
    fields: Fields,
) -> Result<HttpResponse, ResourceError> {
    let renderer = &state.renderer;
    let schema = store.schema();

    match action {
        Action::List => Ok(renderer.render_list(format, schema, &store.list().await)),
        Action::New => Ok(renderer.render_form(format, schema, None)),
        Action::Show => {
            let record = store.get(record_id(store, params)?).await?;
            Ok(renderer.render_one(format, schema, &record, StatusCode::OK))
        }
        Action::Edit => {
            let record = store.get(record_id(store, params)?).await?;
            Ok(renderer.render_form(format, schema, Some(&record)))
        }
        Action::Create => {
            let record = store.create(fields).await?;
            let location = format!("/{}/{}", store.name(), record.id);
            if format == Format::Html {
                return Ok(http::build_redirect_response(&location));
            }
            let mut response = renderer.render_one(format, schema, &record, StatusCode::CREATED);
            if let Ok(value) = location.parse() {
                response.headers_mut().insert(LOCATION, value);
            }
            Ok(response)
        }
        Action::Update => {
            let record = store.update(record_id(store, params)?, fields).await?;
            if format == Format::Html {
                return Ok(http::build_redirect_response(&format!(
                    "/{}/{}",
                    store.name(),
                    record.id
                )));
            }
            Ok(renderer.render_one(format, schema, &record, StatusCode::OK))
        }
        Action::Delete => {
            let record = store.delete(record_id(store, params)?).await?;
            Ok(renderer.render_deleted(format, schema, &record))
        }
    }
}

/// Coerce the `:id` segment; an id that cannot exist is reported as not found.
///
/// Only canonical decimal ids are accepted (no sign, no leading zeros), so
/// each record has exactly one URL.
fn record_id(store: &RecordStore, params: &Params) -> Result<u64, ResourceError> {
    let raw = params.get("id").unwrap_or_default();
    let canonical = !raw.is_empty()
        && raw.bytes().all(|b| b.is_ascii_digit())
        && (raw == "0" || !raw.starts_with('0'));
    if !canonical {
        return Err(ResourceError::not_found(store.name(), raw));
    }
    raw.parse()
        .map_err(|_| ResourceError::not_found(store.name(), raw))
}

fn readiness(state: &AppState) -> HttpResponse {
    if state.registry.names().is_empty() {
        return http::build_json_response(
            StatusCode::SERVICE_UNAVAILABLE,
            &serde_json::json!({ "status": "unavailable", "reason": "no resources configured" }),
        );
    }
    http::build_health_response("ok")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::Registry;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};

    async fn state() -> AppState {
        let config = Config::load_from("does-not-exist/config").unwrap();
        let registry = Registry::from_config(&config.store).await.unwrap();
        AppState::with_registry(config, registry).unwrap()
    }

    fn ctx(method: Method, target: &str) -> RequestContext {
        let (path, query) = target.split_once('?').unwrap_or((target, ""));
        RequestContext {
            method,
            path: path.to_string(),
            query: request::parse_query(Some(query)),
            accept: None,
            content_type: None,
            body: Bytes::new(),
        }
    }

    fn with_json(mut ctx: RequestContext, body: &Value) -> RequestContext {
        ctx.content_type = Some("application/json".to_string());
        ctx.body = Bytes::from(body.to_string());
        ctx
    }

    fn with_form(mut ctx: RequestContext, body: &'static str) -> RequestContext {
        ctx.content_type = Some("application/x-www-form-urlencoded".to_string());
        ctx.accept = Some("text/html".to_string());
        ctx.body = Bytes::from_static(body.as_bytes());
        ctx
    }

    async fn body_string(response: HttpResponse) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: HttpResponse) -> Value {
        serde_json::from_str(&body_string(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_list_returns_seeded_records() {
        let state = state().await;
        let outcome = respond(&state, ctx(Method::GET, "/drinks")).await;
        assert_eq!(outcome.resource, Some("drinks"));
        assert_eq!(outcome.response.status(), StatusCode::OK);
        let records = body_json(outcome.response).await;
        assert_eq!(records.as_array().unwrap().len(), 3);
        assert_eq!(records[0]["id"], 1);
    }

    #[tokio::test]
    async fn test_show_resolves_by_id_not_position() {
        let state = state().await;
        let deleted = respond(&state, ctx(Method::DELETE, "/pokemon/1")).await;
        assert_eq!(deleted.response.status(), StatusCode::OK);

        let outcome = respond(&state, ctx(Method::GET, "/pokemon/2")).await;
        assert_eq!(outcome.response.status(), StatusCode::OK);
        let record = body_json(outcome.response).await;
        assert_eq!(record["id"], 2);
        assert_eq!(record["name"], "Ivysaur");
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let state = state().await;
        let request = with_json(
            ctx(Method::POST, "/hotels"),
            &json!({"name": "Hotel Virginia", "rating": 4.3}),
        );
        let outcome = respond(&state, request).await;
        assert_eq!(outcome.response.status(), StatusCode::CREATED);
        let location = outcome.response.headers()[LOCATION].to_str().unwrap().to_string();
        let created = body_json(outcome.response).await;
        assert_eq!(location, format!("/hotels/{}", created["id"]));

        let fetched = respond(&state, ctx(Method::GET, &location)).await;
        assert_eq!(body_json(fetched.response).await, created);
    }

    #[tokio::test]
    async fn test_validation_error_is_400() {
        let state = state().await;
        let request = with_json(ctx(Method::POST, "/hotels"), &json!({"location": "Nowhere"}));
        let outcome = respond(&state, request).await;
        assert_eq!(outcome.response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(outcome.response).await;
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_missing_record_is_404() {
        let state = state().await;
        for target in [
            "/hotels/999",
            "/hotels/abc",
            "/hotels/999/edit",
            "/hotels/+1",
            "/hotels/01",
            "/hotels/1.0",
            "/hotels/99999999999999999999",
        ] {
            let outcome = respond(&state, ctx(Method::GET, target)).await;
            assert_eq!(outcome.response.status(), StatusCode::NOT_FOUND, "{target}");
            let body = body_json(outcome.response).await;
            assert_eq!(body["error"], "not_found");
        }
        let update = with_json(ctx(Method::PUT, "/hotels/999"), &json!({"name": "x"}));
        assert_eq!(respond(&state, update).await.response.status(), StatusCode::NOT_FOUND);
        let delete = respond(&state, ctx(Method::DELETE, "/hotels/999")).await;
        assert_eq!(delete.response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let state = state().await;
        let outcome = respond(&state, ctx(Method::PATCH, "/hotels/1")).await;
        assert_eq!(outcome.response.status(), StatusCode::NOT_FOUND);
        assert_eq!(outcome.resource, None);
        let body = body_json(outcome.response).await;
        assert_eq!(body["error"], "route_not_found");
    }

    #[tokio::test]
    async fn test_html_form_create_redirects() {
        let state = state().await;
        let request = with_form(ctx(Method::POST, "/products"), "name=Kibble&price=12&qty=3");
        let outcome = respond(&state, request).await;
        assert_eq!(outcome.response.status(), StatusCode::SEE_OTHER);
        assert_eq!(outcome.response.headers()[LOCATION], "/products/3");

        let product = body_json(respond(&state, ctx(Method::GET, "/products/3")).await.response).await;
        assert_eq!(product["price"], 12);
        assert_eq!(product["qty"], 3);
    }

    #[tokio::test]
    async fn test_html_form_method_override() {
        let state = state().await;
        let update = with_form(
            ctx(Method::POST, "/drinks/2?_method=PUT"),
            "name=double+espresso&price=3.5",
        );
        let outcome = respond(&state, update).await;
        assert_eq!(outcome.response.status(), StatusCode::SEE_OTHER);
        assert_eq!(outcome.response.headers()[LOCATION], "/drinks/2");

        let drink = body_json(respond(&state, ctx(Method::GET, "/drinks/2")).await.response).await;
        assert_eq!(drink["name"], "double espresso");
        assert!(drink.get("_method").is_none());

        let delete = with_form(ctx(Method::POST, "/drinks/2"), "_method=DELETE");
        let outcome = respond(&state, delete).await;
        assert_eq!(outcome.response.status(), StatusCode::OK);
        assert!(body_string(outcome.response).await.contains("was removed"));

        let gone = respond(&state, ctx(Method::GET, "/drinks/2")).await;
        assert_eq!(gone.response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_returns_removed_record() {
        let state = state().await;
        let outcome = respond(&state, ctx(Method::DELETE, "/drinks/1")).await;
        assert_eq!(outcome.response.status(), StatusCode::OK);
        let removed = body_json(outcome.response).await;
        assert_eq!(removed["name"], "cappuccino");

        let list = body_json(respond(&state, ctx(Method::GET, "/drinks")).await.response).await;
        assert_eq!(list.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_format_query_selects_html() {
        let state = state().await;
        let outcome = respond(&state, ctx(Method::GET, "/hotels?format=html")).await;
        assert_eq!(
            outcome.response.headers()[CONTENT_TYPE],
            http::response::CONTENT_TYPE_HTML
        );
        assert!(body_string(outcome.response).await.contains("<ul>"));
        assert_eq!(
            state.renderer.negotiate(&Params::new(), Some("text/html")),
            Format::Html
        );
    }

    #[tokio::test]
    async fn test_options_lists_allowed_methods() {
        let state = state().await;
        let outcome = respond(&state, ctx(Method::OPTIONS, "/hotels/1")).await;
        assert_eq!(outcome.response.status(), StatusCode::NO_CONTENT);
        assert_eq!(outcome.response.headers()["allow"], "GET, PUT, DELETE, OPTIONS");

        let missing = respond(&state, ctx(Method::OPTIONS, "/nowhere")).await;
        assert_eq!(missing.response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_head_dispatches_as_get() {
        let state = state().await;
        let outcome = respond(&state, ctx(Method::HEAD, "/hotels/1")).await;
        assert_eq!(outcome.response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_exercise_routes() {
        let state = state().await;
        let greeting = respond(&state, ctx(Method::GET, "/greeting/Grace%20Hopper")).await;
        assert_eq!(body_string(greeting.response).await, "hello Grace Hopper");

        let calc = respond(&state, ctx(Method::GET, "/calc/6/3?operation=divide")).await;
        assert_eq!(body_string(calc.response).await, "2");

        let bad = respond(&state, ctx(Method::GET, "/calc/6/0?operation=divide")).await;
        assert_eq!(bad.response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_home_and_health() {
        let state = state().await;
        let home = body_json(respond(&state, ctx(Method::GET, "/")).await.response).await;
        assert_eq!(home.as_array().unwrap().len(), 5);
        assert_eq!(home[0]["name"], "hotels");

        let ready = body_json(respond(&state, ctx(Method::GET, "/readyz")).await.response).await;
        assert_eq!(ready["status"], "ok");
    }

    #[tokio::test]
    async fn test_invalid_json_body_is_400() {
        let state = state().await;
        let mut request = ctx(Method::POST, "/hotels");
        request.content_type = Some("application/json".to_string());
        request.body = Bytes::from_static(b"{broken");
        let outcome = respond(&state, request).await;
        assert_eq!(outcome.response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unmatched_route_wins_over_bad_body() {
        let state = state().await;
        let mut request = ctx(Method::POST, "/nowhere");
        request.content_type = Some("application/json".to_string());
        request.body = Bytes::from_static(b"{broken");
        let outcome = respond(&state, request).await;
        assert_eq!(outcome.response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(outcome.response).await["error"], "route_not_found");

        // The query override still picks the route before the body is judged
        let mut request = ctx(Method::POST, "/drinks/1?_method=PUT");
        request.content_type = Some("application/json".to_string());
        request.body = Bytes::from_static(b"{broken");
        let outcome = respond(&state, request).await;
        assert_eq!(outcome.resource, Some("drinks"));
        assert_eq!(outcome.response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(outcome.response).await["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_plain_text_body_is_rejected() {
        let state = state().await;
        let mut request = ctx(Method::PUT, "/drinks/1");
        request.content_type = Some("text/plain".to_string());
        request.body = Bytes::from_static(b"please rename this drink");
        let outcome = respond(&state, request).await;
        assert_eq!(outcome.response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(outcome.response).await["error"], "validation_error");

        let drink = body_json(respond(&state, ctx(Method::GET, "/drinks/1")).await.response).await;
        assert!(drink.get("please rename this drink").is_none());
        assert_eq!(drink.as_object().unwrap().len(), 4);
        assert_eq!(drink["name"], "cappuccino");
    }

    /// Decode an HTML attribute value as rendered by minijinja
    fn unescape(value: &str) -> String {
        value
            .replace("&quot;", "\"")
            .replace("&#x27;", "'")
            .replace("&#x2f;", "/")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&amp;", "&")
    }

    fn attr(tag: &str, name: &str) -> Option<String> {
        let key = format!(" {name}=\"");
        let start = tag.find(&key)? + key.len();
        let len = tag[start..].find('"')?;
        Some(unescape(&tag[start..start + len]))
    }

    /// Name/value pairs a browser would submit for the form in `html`
    fn submitted_fields(html: &str) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        let mut rest = html;
        while let Some(start) = rest.find('<') {
            rest = &rest[start..];
            let end = rest.find('>').unwrap();
            let tag = &rest[..=end];
            if tag.starts_with("<textarea") {
                let close = rest.find("</textarea>").unwrap();
                pairs.push((attr(tag, "name").unwrap(), unescape(&rest[end + 1..close])));
            } else if tag.starts_with("<input") {
                match (attr(tag, "type").as_deref(), attr(tag, "name")) {
                    (Some("checkbox"), Some(name)) if tag.contains(" checked") => {
                        pairs.push((name, "on".to_string()));
                    }
                    (Some("checkbox" | "submit"), _) | (_, None) => {}
                    (_, Some(name)) => pairs.push((name, attr(tag, "value").unwrap_or_default())),
                }
            }
            rest = &rest[end + 1..];
        }
        pairs
    }

    #[tokio::test]
    async fn test_unchanged_edit_form_keeps_nested_values() {
        let state = state().await;
        let before = body_json(respond(&state, ctx(Method::GET, "/hotels/1")).await.response).await;

        let form = respond(&state, ctx(Method::GET, "/hotels/1/edit?format=html")).await;
        let html = body_string(form.response).await;
        assert!(html.contains("<textarea"));
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(submitted_fields(&html))
            .finish();

        let mut update = ctx(Method::POST, "/hotels/1?_method=PUT");
        update.content_type = Some("application/x-www-form-urlencoded".to_string());
        update.accept = Some("text/html".to_string());
        update.body = Bytes::from(body);
        let outcome = respond(&state, update).await;
        assert_eq!(outcome.response.status(), StatusCode::SEE_OTHER);

        let after = body_json(respond(&state, ctx(Method::GET, "/hotels/1")).await.response).await;
        for key in ["name", "location", "rating", "vacancies", "rooms", "tags", "createdAt"] {
            assert_eq!(after[key], before[key], "{key}");
        }
        assert_eq!(after["rooms"][0]["size"], "Queen Double");
    }
}
