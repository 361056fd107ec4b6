//! Owner handler trait and request dispatch.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use async_trait::async_trait;
use futures::FutureExt;
use tracing::{debug, error, info, warn};

use petstack_model::attribute_value::Item;
use petstack_model::error::{OwnerError, OwnerErrorKind};
use petstack_model::event::{ProxyRequest, ProxyResponse};
use petstack_model::input::{DeleteOwnerInput, GetOwnerInput, ModifyOwnerInput, SaveOwnerInput};
use petstack_model::operations::OwnerOperation;
use petstack_model::output::{
    DeleteOwnerOutput, HEALTH_CHECK_MESSAGE, ListOwnersOutput, ModifyOwnerOutput, SaveOwnerOutput,
};

use crate::request::parse_json_body;
use crate::response::{build_response, empty_response, error_response, not_found_response};
use crate::router::resolve_operation;

/// Business logic behind the owner API.
///
/// Inputs arrive already validated by the router; implementations only talk
/// to the stores. This trait is the boundary between the proxy transport and
/// the service core.
#[async_trait]
pub trait OwnerHandler: Send + Sync + 'static {
    /// Look up one owner; `None` when no record matches.
    async fn get_owner(&self, input: GetOwnerInput) -> Result<Option<Item>, OwnerError>;

    /// Scan every owner.
    async fn list_owners(&self) -> Result<ListOwnersOutput, OwnerError>;

    /// Mint upload/download URLs and persist a new owner.
    async fn save_owner(&self, input: SaveOwnerInput) -> Result<SaveOwnerOutput, OwnerError>;

    /// Set a single attribute on an owner.
    async fn modify_owner(&self, input: ModifyOwnerInput) -> Result<ModifyOwnerOutput, OwnerError>;

    /// Remove an owner, returning its last values.
    async fn delete_owner(&self, input: DeleteOwnerInput) -> Result<DeleteOwnerOutput, OwnerError>;
}

/// Route a proxy request to `handler` and build its response.
///
/// Always produces a response: handler errors become 400s, and a panic
/// anywhere in dispatch is caught and reported as "Error processing request".
pub async fn dispatch_request<H: OwnerHandler + ?Sized>(
    handler: &H,
    request: &ProxyRequest,
) -> ProxyResponse {
    let method = request.method();
    let path = request.path();
    info!(method, path, "handling owner request");

    let Some(op) = resolve_operation(method, path) else {
        debug!(method, path, "no route matched");
        return not_found_response();
    };

    let outcome = AssertUnwindSafe(dispatch_operation(handler, op, request))
        .catch_unwind()
        .await;

    match outcome {
        Ok(Ok(response)) => response,
        Ok(Err(err)) => {
            log_error(op, &err);
            error_response(&err)
        }
        Err(panic) => {
            let err = OwnerError::internal(panic_message(&*panic));
            log_error(op, &err);
            error_response(&err)
        }
    }
}

/// Decode a raw proxy event and dispatch it.
///
/// An event that does not fit the proxy request shape (say a `body` sent as
/// a JSON object) is answered like any other internal failure instead of
/// failing the invocation.
pub async fn dispatch_event<H: OwnerHandler + ?Sized>(
    handler: &H,
    event: serde_json::Value,
) -> ProxyResponse {
    match serde_json::from_value::<ProxyRequest>(event) {
        Ok(request) => dispatch_request(handler, &request).await,
        Err(e) => {
            let err = OwnerError::internal(format!("malformed proxy event: {e}"));
            error!(error = %err, "failed to decode proxy event");
            error_response(&err)
        }
    }
}

async fn dispatch_operation<H: OwnerHandler + ?Sized>(
    handler: &H,
    op: OwnerOperation,
    request: &ProxyRequest,
) -> Result<ProxyResponse, OwnerError> {
    debug!(operation = %op, "dispatching owner operation");
    let ok = http::StatusCode::OK;

    match op {
        OwnerOperation::HealthCheck => Ok(build_response(ok, HEALTH_CHECK_MESSAGE)),
        OwnerOperation::Preflight => Ok(empty_response(ok)),
        OwnerOperation::GetOwner => {
            let input = GetOwnerInput::from_query(request.query_param("ownerid"))?;
            let item = handler.get_owner(input).await?;
            Ok(build_response(ok, &item))
        }
        OwnerOperation::ListOwners => {
            let output = handler.list_owners().await?;
            Ok(build_response(ok, &output))
        }
        OwnerOperation::SaveOwner => {
            let body = parse_json_body(request.body.as_deref())?;
            let output = handler.save_owner(SaveOwnerInput::from_json(&body)?).await?;
            Ok(build_response(ok, &output))
        }
        OwnerOperation::ModifyOwner => {
            let body = parse_json_body(request.body.as_deref())?;
            let output = handler
                .modify_owner(ModifyOwnerInput::from_json(&body)?)
                .await?;
            Ok(build_response(ok, &output))
        }
        OwnerOperation::DeleteOwner => {
            let body = parse_json_body(request.body.as_deref())?;
            let output = handler
                .delete_owner(DeleteOwnerInput::from_json(&body)?)
                .await?;
            Ok(build_response(ok, &output))
        }
    }
}

fn log_error(op: OwnerOperation, err: &OwnerError) {
    match err.kind {
        OwnerErrorKind::Internal => {
            error!(operation = %op, error = %err, "internal error while processing request");
        }
        OwnerErrorKind::InvalidInput => {
            debug!(operation = %op, error = %err, "rejected invalid request");
        }
        _ => warn!(operation = %op, error = %err, "owner operation failed"),
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|s| (*s).to_owned())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "panic during dispatch".to_owned())
}
