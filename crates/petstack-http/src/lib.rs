//! Owner API HTTP layer for PetStack.
//!
//! This crate turns API Gateway proxy events into owner operations and back:
//!
//! - **Router**: exact `(method, path)` matching to an [`OwnerOperation`]
//! - **Request**: JSON body normalization
//! - **Handler trait**: the boundary between transport and business logic
//! - **Response helpers**: JSON bodies with a fixed CORS header set
//! - **Service**: hyper `Service` serving the same pipeline over HTTP
//!
//! [`OwnerOperation`]: petstack_model::OwnerOperation
#![allow(missing_docs)]

pub mod dispatch;
pub mod request;
pub mod response;
pub mod router;
pub mod service;

pub use dispatch::{OwnerHandler, dispatch_event, dispatch_request};
pub use service::{OwnerHttpService, handle_http_request};
