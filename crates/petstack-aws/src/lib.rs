//! AWS adapters for the PetStack owner registry.
//!
//! [`DynamoDbOwnerStore`] implements the owner table over DynamoDB and
//! [`S3UrlSigner`] mints upload and download URLs through the S3 client.
//! [`path_style_client`] points that client at an S3-compatible endpoint
//! for local runs.

pub mod convert;
pub mod dynamodb;
pub mod s3;

pub use dynamodb::DynamoDbOwnerStore;
pub use s3::{S3UrlSigner, path_style_client};
