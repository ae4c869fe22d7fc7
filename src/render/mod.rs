//! Response renderer
//!
//! Turns handler results into HTTP responses. Records and record lists are
//! emitted as JSON or as HTML pages rendered with minijinja templates, and
//! this is the only place where an error kind becomes a status code.

mod templates;

use hyper::StatusCode;
use minijinja::{context, Environment, Value};
use serde::Serialize;
use std::path::Path;

use crate::config::DefaultFormat;
use crate::error::ResourceError;
use crate::http::{build_html_response, build_json_response, build_text_response, HttpResponse};
use crate::logger;
use crate::routing::Params;
use crate::store::{Record, ResourceSchema};

/// Representation requested by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Html,
}

impl From<DefaultFormat> for Format {
    fn from(format: DefaultFormat) -> Self {
        match format {
            DefaultFormat::Json => Self::Json,
            DefaultFormat::Html => Self::Html,
        }
    }
}

impl Format {
    /// `?format=` wins, then the `Accept` header, then the configured default
    pub fn negotiate(query: &Params, accept: Option<&str>, default: DefaultFormat) -> Self {
        match query.get("format") {
            Some("json") => return Self::Json,
            Some("html") => return Self::Html,
            _ => {}
        }
        match accept {
            Some(a) if a.contains("text/html") => Self::Html,
            Some(a) if a.contains("application/json") => Self::Json,
            _ => default.into(),
        }
    }
}

/// Map an error kind to the status code shown to the client
pub const fn status_for(err: &ResourceError) -> StatusCode {
    match err {
        ResourceError::NotFound { .. } | ResourceError::RouteNotFound { .. } => {
            StatusCode::NOT_FOUND
        }
        ResourceError::Validation(_) => StatusCode::BAD_REQUEST,
        ResourceError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        ResourceError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[derive(Serialize)]
struct FieldView {
    name: &'static str,
    kind: String,
    required: bool,
    input_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    max: Option<f64>,
}

#[derive(Serialize)]
struct ResourceView {
    name: &'static str,
    title: &'static str,
    fields: Vec<FieldView>,
}

impl From<&ResourceSchema> for ResourceView {
    fn from(schema: &ResourceSchema) -> Self {
        Self {
            name: schema.name,
            title: schema.title,
            fields: schema
                .fields
                .iter()
                .map(|f| FieldView {
                    name: f.name,
                    kind: f.kind.to_string(),
                    required: f.required,
                    input_type: f.input_type(),
                    max: f.max,
                })
                .collect(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    resource: Option<&'a str>,
}

pub struct Renderer {
    env: Environment<'static>,
    default_format: DefaultFormat,
}

impl Renderer {
    /// Load the built-in templates, then any overrides found in `template_dir`
    pub fn new(template_dir: Option<&Path>, default_format: DefaultFormat) -> Result<Self, ResourceError> {
        let mut env = Environment::new();
        for (name, source) in templates::DEFAULTS {
            env.add_template(name, source).map_err(|e| {
                ResourceError::Configuration(format!("invalid built-in template {name}: {e}"))
            })?;
        }

        if let Some(dir) = template_dir {
            for (name, _) in templates::DEFAULTS {
                let path = dir.join(name);
                if !path.is_file() {
                    continue;
                }
                let source = std::fs::read_to_string(&path).map_err(|e| {
                    ResourceError::Configuration(format!("cannot read template {}: {e}", path.display()))
                })?;
                env.add_template_owned(name.to_string(), source).map_err(|e| {
                    ResourceError::Configuration(format!("invalid template {}: {e}", path.display()))
                })?;
                logger::write_info(&format!("[Render] Using template override {}", path.display()));
            }
        }

        Ok(Self { env, default_format })
    }

    pub fn negotiate(&self, query: &Params, accept: Option<&str>) -> Format {
        Format::negotiate(query, accept, self.default_format)
    }

    /// Landing page listing every served resource
    pub fn render_home(&self, format: Format, schemas: &[&ResourceSchema]) -> HttpResponse {
        let resources: Vec<ResourceView> = schemas.iter().map(|s| ResourceView::from(*s)).collect();
        match format {
            Format::Json => build_json_response(StatusCode::OK, &resources),
            Format::Html => self.render_page(
                "home.html",
                StatusCode::OK,
                context! { title => "Resources", resources => resources },
            ),
        }
    }

    pub fn render_list(&self, format: Format, schema: &ResourceSchema, records: &[Record]) -> HttpResponse {
        match format {
            Format::Json => build_json_response(StatusCode::OK, records),
            Format::Html => self.render_page(
                "index.html",
                StatusCode::OK,
                context! {
                    title => schema.title,
                    resource => ResourceView::from(schema),
                    records => records,
                },
            ),
        }
    }

    pub fn render_one(
        &self,
        format: Format,
        schema: &ResourceSchema,
        record: &Record,
        status: StatusCode,
    ) -> HttpResponse {
        match format {
            Format::Json => build_json_response(status, record),
            Format::Html => self.render_page(
                "show.html",
                status,
                context! {
                    title => schema.title,
                    resource => ResourceView::from(schema),
                    record => record,
                },
            ),
        }
    }

    /// New/edit form; in JSON it describes the fields the resource accepts
    pub fn render_form(&self, format: Format, schema: &ResourceSchema, record: Option<&Record>) -> HttpResponse {
        match format {
            Format::Json => build_json_response(
                StatusCode::OK,
                &serde_json::json!({
                    "resource": ResourceView::from(schema),
                    "record": record,
                }),
            ),
            Format::Html => self.render_page(
                "form.html",
                StatusCode::OK,
                context! {
                    title => schema.title,
                    resource => ResourceView::from(schema),
                    record => record,
                },
            ),
        }
    }

    pub fn render_deleted(&self, format: Format, schema: &ResourceSchema, record: &Record) -> HttpResponse {
        match format {
            Format::Json => build_json_response(StatusCode::OK, record),
            Format::Html => self.render_page(
                "deleted.html",
                StatusCode::OK,
                context! {
                    title => schema.title,
                    resource => ResourceView::from(schema),
                    record => record,
                },
            ),
        }
    }

    pub fn render_error(&self, format: Format, err: &ResourceError) -> HttpResponse {
        let status = status_for(err);
        let resource = match err {
            ResourceError::NotFound { resource, .. } => Some(resource.as_str()),
            _ => None,
        };
        match format {
            Format::Json => build_json_response(
                status,
                &ErrorBody {
                    error: err.kind(),
                    message: err.to_string(),
                    resource,
                },
            ),
            Format::Html => self.render_page(
                "error.html",
                status,
                context! {
                    title => status.canonical_reason().unwrap_or("Error"),
                    status => status.as_u16(),
                    kind => err.kind(),
                    message => err.to_string(),
                },
            ),
        }
    }

    /// Render a template; a template failure is logged and served as a plain 500
    fn render_page(&self, name: &str, status: StatusCode, ctx: Value) -> HttpResponse {
        match self.env.get_template(name).and_then(|t| t.render(ctx)) {
            Ok(html) => build_html_response(status, html),
            Err(e) => {
                logger::log_error(&format!("Failed to render template {name}: {e}"));
                build_text_response(StatusCode::INTERNAL_SERVER_ERROR, "500 Internal Server Error")
            }
        }
    }
}
