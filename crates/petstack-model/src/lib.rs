//! Owner registry model types for PetStack.
//!
//! This crate holds every type that crosses a crate boundary in the owner
//! service: the key-value store's attribute value model, the API Gateway
//! proxy event shapes, the validated operation inputs, the response bodies,
//! and the layered request error.
#![allow(clippy::module_name_repetitions)]
#![allow(missing_docs)]

pub mod attribute_value;
pub mod error;
pub mod event;
pub mod input;
pub mod number;
pub mod operations;
pub mod output;

pub use attribute_value::{AttributeValue, Item};
pub use error::{OwnerError, OwnerErrorKind};
pub use event::{ProxyRequest, ProxyResponse};
pub use operations::OwnerOperation;
