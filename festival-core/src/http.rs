//! HTTP routing and response helpers shared by the Lambda and standalone servers.
//!
//! Endpoints:
//! - GET / - Endpoint listing
//! - GET /test - Liveness message
//! - GET /festivals - All festivals
//! - GET /festivals/sample - Fixed sample record
//! - GET /festivals/public - Public holidays
//! - GET /festivals/date/{date} - Festivals on a date (YYYY-MM-DD)
//! - GET /festivals/month/{month} - Festivals in a month (1-12)
//! - GET /festivals/region/{region} - Festivals observed in a region
//! - GET /festivals/type/{type} - Festivals of a type
//! - GET /festivals/name/{name} - Festival by name
//! - GET /festivals/{name} - Festival by name
//! - GET /regional-events - Regional events, as stored
//! - GET /metadata - Dataset metadata, as stored

use lambda_http::http::HeaderValue;
use lambda_http::{Body, Request, Response};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::loader::DatasetLoader;
use crate::models::{ErrorBody, MessageBody};
use crate::{query, Error, Result};

const CORS_HEADERS: [(&str, &str); 3] = [
    ("access-control-allow-origin", "*"),
    ("access-control-allow-headers", "Content-Type"),
    ("access-control-allow-methods", "GET, POST, OPTIONS"),
];

/// Create a JSON response with the given status code and data.
pub fn json_response<T: Serialize>(status: u16, data: &T) -> std::result::Result<Response<Body>, lambda_http::Error> {
    let response = Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(data)?))
        .map_err(Box::new)?;

    Ok(response)
}

/// Create an error response with the given status code and message.
pub fn error_response(status: u16, message: impl Into<String>) -> std::result::Result<Response<Body>, lambda_http::Error> {
    json_response(
        status,
        &ErrorBody {
            error: message.into(),
        },
    )
}

/// Add the cross-origin headers every response carries.
pub fn with_cors(mut response: Response<Body>) -> Response<Body> {
    let headers = response.headers_mut();
    for (name, value) in CORS_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }
    response
}

/// Handle one request: route it, then apply CORS to whatever comes back.
pub fn handle<L>(loader: &L, event: &Request) -> std::result::Result<Response<Body>, lambda_http::Error>
where
    L: DatasetLoader + ?Sized,
{
    let raw_path = event.uri().path();
    // Strip /api stage prefix if present (API Gateway REST API includes stage in path)
    let path = raw_path.strip_prefix("/api").unwrap_or(raw_path);
    let method = event.method().as_str();

    info!("Received request: method={}, path={} (raw: {})", method, path, raw_path);

    let response = match method {
        "GET" => match route(loader, path) {
            Ok(Some(body)) => json_response(200, &body)?,
            Ok(None) => error_response(404, "Not found")?,
            Err(e) => {
                if e.status_code() >= 500 {
                    error!("Request failed: {}", e);
                }
                error_response(e.status_code(), e.to_string())?
            }
        },
        "OPTIONS" => Response::builder()
            .status(204)
            .body(Body::Empty)
            .map_err(Box::new)?,
        _ => error_response(405, "Method not allowed")?,
    };

    Ok(with_cors(response))
}

/// Resolve a GET path to its JSON body. `None` means no such route.
fn route<L>(loader: &L, path: &str) -> Result<Option<Value>>
where
    L: DatasetLoader + ?Sized,
{
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let body = match segments.as_slice() {
        [] => index(),
        ["test"] => serde_json::to_value(MessageBody {
            message: "Test endpoint is working".to_string(),
        })?,
        ["festivals", "sample"] => sample(),
        ["festivals"] => {
            let dataset = loader.load()?;
            serde_json::to_value(query::all(&dataset))?
        }
        ["festivals", "public"] => {
            let dataset = loader.load()?;
            serde_json::to_value(query::public_holidays(&dataset))?
        }
        ["festivals", "date", date] => {
            let date = decode(date)?;
            let dataset = loader.load()?;
            serde_json::to_value(query::by_date(&dataset, &date)?)?
        }
        ["festivals", "month", month] => {
            let month = query::parse_month(&decode(month)?)?;
            let dataset = loader.load()?;
            serde_json::to_value(query::by_month(&dataset, month)?)?
        }
        ["festivals", "region", region] => {
            let region = decode(region)?;
            let dataset = loader.load()?;
            serde_json::to_value(query::by_region(&dataset, &region))?
        }
        ["festivals", "type", festival_type] => {
            let festival_type = decode(festival_type)?;
            let dataset = loader.load()?;
            serde_json::to_value(query::by_type(&dataset, &festival_type))?
        }
        ["festivals", "name", name] | ["festivals", name] => {
            let name = decode(name)?;
            let dataset = loader.load()?;
            serde_json::to_value(query::by_name(&dataset, &name)?)?
        }
        ["regional-events"] => {
            let dataset = loader.load()?;
            serde_json::to_value(&dataset.regional_events)?
        }
        ["metadata"] => {
            let dataset = loader.load()?;
            serde_json::to_value(&dataset.metadata)?
        }
        _ => return Ok(None),
    };

    Ok(Some(body))
}

fn decode(segment: &str) -> Result<String> {
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .map_err(|_| Error::InvalidArgument("Path segment is not valid UTF-8".to_string()))
}

fn index() -> Value {
    json!({
        "message": "Indian Festival API",
        "status": "Working",
        "endpoints": {
            "/festivals": "All festivals",
            "/festivals/{name}": "Festival by name",
            "/festivals/name/{name}": "Festival by name",
            "/festivals/date/{date}": "Festivals on a date (YYYY-MM-DD)",
            "/festivals/month/{month}": "Festivals in a month (1-12)",
            "/festivals/region/{region}": "Festivals observed in a region",
            "/festivals/type/{type}": "Festivals of a type",
            "/festivals/public": "Festivals that are public holidays",
            "/festivals/sample": "A fixed sample festival",
            "/regional-events": "Regional events",
            "/metadata": "Dataset metadata",
            "/test": "Test endpoint"
        }
    })
}

fn sample() -> Value {
    json!([{
        "name": "Diwali",
        "type": "Religious Festival",
        "description": "Festival of lights",
        "date": "2024-10-31",
        "regions": ["All India"],
        "public_holiday": true
    }])
}
