//! Object store collaborator.

use std::time::Duration;

use async_trait::async_trait;

use petstack_model::error::OwnerError;

/// What a signed URL allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignedOperation {
    /// Download (`GET`).
    Read,
    /// Upload (`PUT`).
    Write,
}

/// Errors reported by a [`UrlSigner`].
#[derive(Debug, thiserror::Error)]
pub enum SignerError {
    /// The object store rejected the request, with its message.
    #[error("{0}")]
    Backend(String),

    /// The signing parameters were rejected before any request was made.
    #[error("{0}")]
    Signing(String),
}

impl From<SignerError> for OwnerError {
    fn from(err: SignerError) -> Self {
        match err {
            SignerError::Backend(message) => OwnerError::object_store(message),
            SignerError::Signing(message) => OwnerError::unexpected(message),
        }
    }
}

/// Mints time-limited URLs for the upload bucket.
#[async_trait]
pub trait UrlSigner: Send + Sync + 'static {
    /// Sign `operation` on `bucket/key`, valid for `expires_in`.
    ///
    /// `content_type` pins the type an upload must be sent with.
    async fn presign(
        &self,
        bucket: &str,
        key: &str,
        operation: SignedOperation,
        content_type: Option<&str>,
        expires_in: Duration,
    ) -> Result<String, SignerError>;
}
