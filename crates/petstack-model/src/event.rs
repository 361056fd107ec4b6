//! API Gateway REST proxy event shapes.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Inbound proxy request.
///
/// Unknown fields are ignored. `queryStringParameters` and `body` arrive as
/// JSON `null` when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    /// HTTP method, upper-case.
    #[serde(default)]
    pub http_method: Option<String>,
    /// Resource path, e.g. `/owner`.
    #[serde(default)]
    pub path: Option<String>,
    /// Decoded query string parameters.
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    /// Raw request body.
    #[serde(default)]
    pub body: Option<String>,
}

impl ProxyRequest {
    /// Create a request for `method` and `path` with no query and no body.
    #[must_use]
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            http_method: Some(method.into()),
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Add a query string parameter.
    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_string_parameters
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Set the raw body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Method, or the empty string when absent.
    #[must_use]
    pub fn method(&self) -> &str {
        self.http_method.as_deref().unwrap_or_default()
    }

    /// Path, or the empty string when absent.
    #[must_use]
    pub fn path(&self) -> &str {
        self.path.as_deref().unwrap_or_default()
    }

    /// Look up a query string parameter.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|params| params.get(name))
            .map(String::as_str)
    }
}

/// Outbound proxy response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyResponse {
    /// HTTP status code.
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// Response headers.
    pub headers: BTreeMap<String, String>,
    /// Serialized JSON body (empty for preflight).
    pub body: String,
}

impl ProxyResponse {
    /// Parse the body as JSON.
    pub fn json_body(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.body)
    }
}
