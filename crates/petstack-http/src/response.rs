//! Owner API response construction.
//!
//! Every response carries the same JSON content type and CORS headers so the
//! browser frontend can call the API from any origin.

use std::collections::BTreeMap;

use serde::Serialize;

use petstack_model::error::{INTERNAL_ERROR_MESSAGE, OwnerError};
use petstack_model::event::ProxyResponse;
use petstack_model::output::NOT_FOUND_MESSAGE;

/// Content type for all owner API responses.
pub const CONTENT_TYPE: &str = "application/json";

/// Methods advertised to CORS preflight requests.
pub const ALLOWED_METHODS: &str = "GET,POST,PUT,PATCH,DELETE,OPTIONS";

/// Headers advertised to CORS preflight requests.
pub const ALLOWED_HEADERS: &str = "Content-Type";

/// The fixed header set attached to every response.
#[must_use]
pub fn response_headers() -> BTreeMap<String, String> {
    [
        ("Content-Type", CONTENT_TYPE),
        ("Access-Control-Allow-Origin", "*"),
        ("Access-Control-Allow-Methods", ALLOWED_METHODS),
        ("Access-Control-Allow-Headers", ALLOWED_HEADERS),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_owned(), v.to_owned()))
    .collect()
}

/// Build a response with `body` serialized as JSON.
#[must_use]
pub fn build_response<T: Serialize + ?Sized>(status: http::StatusCode, body: &T) -> ProxyResponse {
    let body = serde_json::to_string(body).unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to serialize response body");
        format!("\"{INTERNAL_ERROR_MESSAGE}\"")
    });

    ProxyResponse {
        status_code: status.as_u16(),
        headers: response_headers(),
        body,
    }
}

/// Build a response with an empty body, used for preflight.
#[must_use]
pub fn empty_response(status: http::StatusCode) -> ProxyResponse {
    ProxyResponse {
        status_code: status.as_u16(),
        headers: response_headers(),
        body: String::new(),
    }
}

/// Build the error response for `error`; the body is the client message as a
/// JSON string.
#[must_use]
pub fn error_response(error: &OwnerError) -> ProxyResponse {
    build_response(error.status_code, error.client_message())
}

/// Build the response for an unmatched route.
#[must_use]
pub fn not_found_response() -> ProxyResponse {
    build_response(http::StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)
}
