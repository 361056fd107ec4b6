//! Owner API over plain HTTP, implementing the hyper `Service` trait.
//!
//! Each HTTP request is turned into the same [`ProxyRequest`] the serverless
//! runtime delivers, dispatched, and the [`ProxyResponse`] is written back.

use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};

use petstack_model::error::OwnerError;
use petstack_model::event::{ProxyRequest, ProxyResponse};

use crate::dispatch::{OwnerHandler, dispatch_request};
use crate::response::error_response;

/// Header carrying the per-request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Hyper `Service` serving the owner API.
#[derive(Debug)]
pub struct OwnerHttpService<H: OwnerHandler> {
    handler: Arc<H>,
}

impl<H: OwnerHandler> OwnerHttpService<H> {
    /// Create a new `OwnerHttpService`.
    pub fn new(handler: Arc<H>) -> Self {
        Self { handler }
    }
}

impl<H: OwnerHandler> Clone for OwnerHttpService<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<H, B> hyper::service::Service<http::Request<B>> for OwnerHttpService<H>
where
    H: OwnerHandler,
    B: hyper::body::Body + Send + 'static,
    B::Data: Send,
    B::Error: fmt::Display,
{
    type Response = http::Response<Full<Bytes>>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<B>) -> Self::Future {
        let handler = Arc::clone(&self.handler);
        Box::pin(async move { Ok(handle_http_request(handler.as_ref(), req).await) })
    }
}

/// Serve one HTTP request through the owner pipeline.
pub async fn handle_http_request<H, B>(handler: &H, req: http::Request<B>) -> http::Response<Full<Bytes>>
where
    H: OwnerHandler + ?Sized,
    B: hyper::body::Body,
    B::Error: fmt::Display,
{
    let request_id = uuid::Uuid::new_v4().to_string();
    let (parts, body) = req.into_parts();

    let proxy_request = match body.collect().await {
        Ok(collected) => to_proxy_request(&parts, &collected.to_bytes()),
        Err(e) => Err(OwnerError::internal(format!("Failed to read request body: {e}"))),
    };
    let proxy_request = match proxy_request {
        Ok(proxy_request) => proxy_request,
        Err(err) => {
            tracing::warn!(error = %err, request_id = %request_id, "rejected request body");
            return to_http_response(error_response(&err), &request_id);
        }
    };

    let proxy_response = dispatch_request(handler, &proxy_request).await;
    to_http_response(proxy_response, &request_id)
}

/// Build the proxy event for an HTTP request.
///
/// The query string is form-decoded; an empty body becomes `None`. A body
/// that is not UTF-8 cannot be JSON and is rejected.
pub fn to_proxy_request(
    parts: &http::request::Parts,
    body: &[u8],
) -> Result<ProxyRequest, OwnerError> {
    let query_string_parameters = parts.uri.query().filter(|q| !q.is_empty()).map(|query| {
        form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect::<HashMap<String, String>>()
    });

    let body = if body.is_empty() {
        None
    } else {
        let text = std::str::from_utf8(body)
            .map_err(|_| OwnerError::invalid_input("Invalid JSON in request body"))?;
        Some(text.to_owned())
    };

    Ok(ProxyRequest {
        http_method: Some(parts.method.as_str().to_owned()),
        path: Some(parts.uri.path().to_owned()),
        query_string_parameters,
        body,
    })
}

/// Write a proxy response back as an HTTP response.
///
/// Headers that are not valid HTTP are dropped.
#[must_use]
pub fn to_http_response(proxy: ProxyResponse, request_id: &str) -> http::Response<Full<Bytes>> {
    let mut response = http::Response::new(Full::new(Bytes::from(proxy.body)));
    *response.status_mut() =
        http::StatusCode::from_u16(proxy.status_code).unwrap_or(http::StatusCode::BAD_REQUEST);

    let headers = response.headers_mut();
    for (name, value) in &proxy.headers {
        match (
            http::HeaderName::from_bytes(name.as_bytes()),
            http::HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => tracing::warn!(header = %name, "dropping invalid response header"),
        }
    }
    if let Ok(hv) = http::HeaderValue::from_str(request_id) {
        headers.insert(REQUEST_ID_HEADER, hv);
    }

    response
}
