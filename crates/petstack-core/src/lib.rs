//! Owner registry core for PetStack.
//!
//! Holds the configuration, the two collaborator contracts (the owner table
//! and the URL signer), the provider implementing the owner operations, and
//! the in-memory owner table used by the local server and the tests.
#![allow(missing_docs, clippy::doc_markdown, clippy::module_name_repetitions)]

pub mod config;
pub mod handler;
pub mod memory;
pub mod pagination;
pub mod provider;
pub mod signer;
pub mod store;

pub use config::{ConfigError, LocalServerConfig, OwnerServiceConfig};
pub use handler::OwnerServiceHandler;
pub use memory::InMemoryOwnerStore;
pub use provider::OwnerProvider;
pub use signer::{SignedOperation, SignerError, UrlSigner};
pub use store::{OwnerStore, ScanPage, StoreError};
