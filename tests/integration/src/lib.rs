//! Integration tests for the PetStack owner registry.
//!
//! Most suites drive the full request pipeline (router, validation,
//! provider, response builder) through proxy events against the in-memory
//! owner table and an S3 signer pointed at a local endpoint. Presigning
//! needs no network, so nothing has to listen there. The suite in `test_aws` talks to
//! real DynamoDB and S3 and is marked `#[ignore]`.
//!
//! Run the AWS suite with:
//! ```text
//! REGION=us-east-1 TABLE_NAME=owners S3_BUCKET_NAME=pets \
//!     cargo test -p petstack-integration -- --ignored
//! ```

use std::sync::{Arc, Once};

use serde_json::{Value, json};

use petstack_aws::{S3UrlSigner, path_style_client};
use petstack_core::{InMemoryOwnerStore, OwnerProvider, OwnerServiceConfig, OwnerServiceHandler};
use petstack_http::dispatch_request;
use petstack_model::event::{ProxyRequest, ProxyResponse};

static INIT: Once = Once::new();

/// Bucket configured on the default harness.
pub const TEST_BUCKET: &str = "pet-uploads";

/// Object store endpoint the signer targets.
pub const TEST_ENDPOINT: &str = "http://localhost:4566";

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// The owner pipeline wired to in-memory collaborators.
#[derive(Debug)]
pub struct Harness {
    /// The owner table behind the provider.
    pub store: Arc<InMemoryOwnerStore>,
    /// The handler the router dispatches to.
    pub handler: OwnerServiceHandler,
}

impl Harness {
    /// Harness with [`TEST_BUCKET`] configured.
    #[must_use]
    pub fn new() -> Self {
        Self::build(Some(TEST_BUCKET), InMemoryOwnerStore::new())
    }

    /// Harness with the given upload bucket setting.
    #[must_use]
    pub fn with_bucket(bucket: Option<&str>) -> Self {
        Self::build(bucket, InMemoryOwnerStore::new())
    }

    /// Harness whose scans return at most `page_size` owners per page.
    #[must_use]
    pub fn with_page_size(page_size: usize) -> Self {
        Self::build(Some(TEST_BUCKET), InMemoryOwnerStore::with_page_size(page_size))
    }

    fn build(bucket: Option<&str>, store: InMemoryOwnerStore) -> Self {
        init_tracing();

        let config = OwnerServiceConfig {
            bucket_name: bucket.map(str::to_owned),
            ..OwnerServiceConfig::default()
        };
        let signer = S3UrlSigner::new(path_style_client(
            TEST_ENDPOINT,
            config.region.clone(),
            "test",
            "test",
        ));

        let store = Arc::new(store);
        let provider = OwnerProvider::new(store.clone(), Arc::new(signer), &config);
        Self {
            store,
            handler: OwnerServiceHandler::new(Arc::new(provider)),
        }
    }

    /// Dispatch one proxy request.
    pub async fn send(&self, request: ProxyRequest) -> ProxyResponse {
        dispatch_request(&self.handler, &request).await
    }

    /// `GET /owner?ownerid={id}`.
    pub async fn get_owner(&self, owner_id: &str) -> ProxyResponse {
        self.send(ProxyRequest::new("GET", "/owner").with_query("ownerid", owner_id))
            .await
    }

    /// `POST /owner` with `body`.
    pub async fn post_owner(&self, body: &Value) -> ProxyResponse {
        self.send(ProxyRequest::new("POST", "/owner").with_body(body.to_string()))
            .await
    }

    /// Create an owner, panicking unless the service accepts it.
    pub async fn create_owner(&self, owner_id: &str) -> Value {
        let resp = self.post_owner(&owner_body(owner_id)).await;
        assert_eq!(resp.status_code, 200, "create failed: {}", resp.body);
        json_body(&resp)
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

/// A complete create body for `owner_id`.
#[must_use]
pub fn owner_body(owner_id: &str) -> Value {
    json!({
        "ownerid": owner_id,
        "ownername": "Ann",
        "petname": "Rex",
        "age": 7,
        "fileName": format!("{owner_id}.png"),
        "fileType": "image/png"
    })
}

/// Parse the response body, panicking on invalid JSON.
#[must_use]
pub fn json_body(resp: &ProxyResponse) -> Value {
    resp.json_body()
        .unwrap_or_else(|e| panic!("response body is not JSON ({e}): {}", resp.body))
}

/// Assert a 400 whose body is the JSON string `message`.
pub fn assert_bad_request(resp: &ProxyResponse, message: &str) {
    assert_eq!(resp.status_code, 400, "body: {}", resp.body);
    assert_eq!(json_body(resp), json!(message));
}

#[cfg(test)]
mod test_create_owner;
#[cfg(test)]
mod test_http_service;
#[cfg(test)]
mod test_list_owners;
#[cfg(test)]
mod test_routing;
