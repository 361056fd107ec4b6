//! PetStack Lambda - owner registry behind API Gateway.
//!
//! Receives REST proxy events, routes them to the owner operations, and
//! answers with proxy responses. Collaborators are DynamoDB for the owner
//! table and S3 for upload and download URLs.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `REGION` | *(required)* | AWS region for the clients |
//! | `TABLE_NAME` | *(required)* | Owner table |
//! | `S3_BUCKET_NAME` | *(unset)* | Upload bucket; create fails without it |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use std::sync::Arc;

use anyhow::{Context, Result};
use aws_config::{BehaviorVersion, Region};
use lambda_runtime::{LambdaEvent, service_fn};
use tracing::info;
use tracing_subscriber::EnvFilter;

use petstack_aws::{DynamoDbOwnerStore, S3UrlSigner};
use petstack_core::{OwnerProvider, OwnerServiceConfig, OwnerServiceHandler};
use petstack_http::dispatch_event;
use petstack_model::event::ProxyResponse;

/// Initialize JSON logging for CloudWatch.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .init();

    Ok(())
}

/// Build the handler over DynamoDB and S3 clients for `config`.
async fn build_handler(config: &OwnerServiceConfig) -> OwnerServiceHandler {
    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .load()
        .await;

    let store = DynamoDbOwnerStore::new(
        aws_sdk_dynamodb::Client::new(&sdk_config),
        config.table_name.clone(),
    );
    let signer = S3UrlSigner::new(aws_sdk_s3::Client::new(&sdk_config));
    let provider = OwnerProvider::new(Arc::new(store), Arc::new(signer), config);
    OwnerServiceHandler::new(Arc::new(provider))
}

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    let config = OwnerServiceConfig::from_env().context("failed to load configuration")?;
    init_tracing(&config.log_level)?;

    info!(
        region = %config.region,
        table_name = %config.table_name,
        upload_bucket = ?config.upload_bucket(),
        "starting PetStack Lambda",
    );

    let handler = Arc::new(build_handler(&config).await);

    // Payloads are decoded in dispatch so a malformed event still gets a response.
    lambda_runtime::run(service_fn(move |event: LambdaEvent<serde_json::Value>| {
        let handler = Arc::clone(&handler);
        async move {
            let response: ProxyResponse = dispatch_event(handler.as_ref(), event.payload).await;
            Ok::<_, lambda_runtime::Error>(response)
        }
    }))
    .await
}
