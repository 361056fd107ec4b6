//! Owner API request router.
//!
//! Routing is an exact match on `(method, path)`:
//!
//! ```text
//! GET     /status   HealthCheck
//! GET     /owner    GetOwner
//! GET     /owners   ListOwners
//! POST    /owner    SaveOwner
//! PATCH   /owner    ModifyOwner
//! DELETE  /owner    DeleteOwner
//! OPTIONS *         Preflight
//! ```
//!
//! Anything else is not found.

use petstack_model::operations::OwnerOperation;

/// Health check path.
pub const STATUS_PATH: &str = "/status";
/// Single owner path.
pub const OWNER_PATH: &str = "/owner";
/// Owner collection path.
pub const OWNERS_PATH: &str = "/owners";

/// Resolve the operation for a request, or `None` when no route matches.
#[must_use]
pub fn resolve_operation(method: &str, path: &str) -> Option<OwnerOperation> {
    if method == "OPTIONS" {
        return Some(OwnerOperation::Preflight);
    }

    let op = match (method, path) {
        ("GET", STATUS_PATH) => OwnerOperation::HealthCheck,
        ("GET", OWNER_PATH) => OwnerOperation::GetOwner,
        ("GET", OWNERS_PATH) => OwnerOperation::ListOwners,
        ("POST", OWNER_PATH) => OwnerOperation::SaveOwner,
        ("PATCH", OWNER_PATH) => OwnerOperation::ModifyOwner,
        ("DELETE", OWNER_PATH) => OwnerOperation::DeleteOwner,
        _ => return None,
    };
    Some(op)
}
