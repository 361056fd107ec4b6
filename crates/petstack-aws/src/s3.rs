//! S3-backed URL signer.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_s3::presigning::PresigningConfig;

use petstack_core::signer::{SignedOperation, SignerError, UrlSigner};

/// Presigns object URLs with the S3 client's credentials.
#[derive(Debug, Clone)]
pub struct S3UrlSigner {
    client: Client,
}

impl S3UrlSigner {
    /// Create a signer over an S3 client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// S3 client for an S3-compatible endpoint (such as LocalStack) with static
/// credentials and path-style addressing.
///
/// Building the client makes no network calls; presigning against it works
/// offline.
#[must_use]
pub fn path_style_client(
    endpoint_url: &str,
    region: impl Into<String>,
    access_key: &str,
    secret_key: &str,
) -> Client {
    let config = aws_sdk_s3::config::Builder::new()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new(region.into()))
        .credentials_provider(Credentials::new(
            access_key,
            secret_key,
            None,
            None,
            "petstack-static",
        ))
        .endpoint_url(endpoint_url)
        .force_path_style(true)
        .build();
    Client::from_conf(config)
}

fn backend_error<E>(err: &E) -> SignerError
where
    E: ProvideErrorMetadata + std::error::Error,
{
    SignerError::Backend(
        err.message()
            .map_or_else(|| DisplayErrorContext(err).to_string(), ToOwned::to_owned),
    )
}

#[async_trait]
impl UrlSigner for S3UrlSigner {
    async fn presign(
        &self,
        bucket: &str,
        key: &str,
        operation: SignedOperation,
        content_type: Option<&str>,
        expires_in: Duration,
    ) -> Result<String, SignerError> {
        let config = PresigningConfig::expires_in(expires_in)
            .map_err(|e| SignerError::Signing(e.to_string()))?;

        let presigned = match operation {
            SignedOperation::Write => self
                .client
                .put_object()
                .bucket(bucket)
                .key(key)
                .set_content_type(content_type.map(str::to_owned))
                .presigned(config)
                .await
                .map_err(|e| backend_error(&e))?,
            SignedOperation::Read => self
                .client
                .get_object()
                .bucket(bucket)
                .key(key)
                .presigned(config)
                .await
                .map_err(|e| backend_error(&e))?,
        };

        Ok(presigned.uri().to_owned())
    }
}
