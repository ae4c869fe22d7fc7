//! Small arithmetic routes: greeting, tip and calculator
//!
//! Path parameters arrive as strings; each handler coerces its own numbers
//! and reports a bad one as a validation error.

use hyper::StatusCode;

use crate::error::ResourceError;
use crate::http::{build_text_response, HttpResponse};
use crate::routing::Params;

pub fn greeting(params: &Params) -> HttpResponse {
    let name = params.get("name").unwrap_or_default();
    build_text_response(StatusCode::OK, format!("hello {name}"))
}

/// Tip owed on `total` at `tipPercentage` percent
pub fn tip(params: &Params) -> Result<HttpResponse, ResourceError> {
    let total = number(params, "total")?;
    let percentage = number(params, "tipPercentage")?;
    Ok(build_text_response(
        StatusCode::OK,
        format_number(total * percentage / 100.0),
    ))
}

pub fn calc(params: &Params, query: &Params) -> Result<HttpResponse, ResourceError> {
    let a = number(params, "num1")?;
    let b = number(params, "num2")?;

    let result = match query.get("operation") {
        Some("add") => a + b,
        Some("subtract") => a - b,
        Some("multiply") => a * b,
        Some("divide") if b == 0.0 => {
            return Err(ResourceError::Validation("division by zero".to_string()));
        }
        Some("divide") => a / b,
        Some(other) => {
            return Err(ResourceError::Validation(format!(
                "unknown operation `{other}` (expected add, subtract, multiply or divide)"
            )));
        }
        None => {
            return Err(ResourceError::Validation(
                "missing query parameter `operation`".to_string(),
            ));
        }
    };

    Ok(build_text_response(StatusCode::OK, format_number(result)))
}

fn number(params: &Params, name: &str) -> Result<f64, ResourceError> {
    params
        .get(name)
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .ok_or_else(|| ResourceError::Validation(format!("parameter `{name}` must be a number")))
}

/// Whole results print without a fractional part
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{n:.0}")
    } else {
        n.to_string()
    }
}
