//! Request body normalization.

use petstack_model::error::OwnerError;

/// Parse the raw proxy body as JSON.
///
/// An absent or empty body is "Missing request body"; anything that fails
/// to parse is "Invalid JSON in request body".
pub fn parse_json_body(body: Option<&str>) -> Result<serde_json::Value, OwnerError> {
    let body = body
        .filter(|b| !b.is_empty())
        .ok_or_else(|| OwnerError::invalid_input("Missing request body"))?;

    serde_json::from_str(body).map_err(|e| {
        tracing::debug!(error = %e, "rejecting malformed JSON body");
        OwnerError::invalid_input("Invalid JSON in request body").with_source(e)
    })
}
