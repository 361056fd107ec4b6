//! PetStack Server - the owner registry as a local HTTP service.
//!
//! Serves the same routes as the Lambda over plain HTTP, backed by an
//! in-memory owner table. Upload and download URLs are presigned by the S3
//! client against `S3_ENDPOINT_URL` with static credentials, so the API can
//! be exercised without an AWS account.
//!
//! # Usage
//!
//! ```text
//! GATEWAY_LISTEN=0.0.0.0:4567 S3_BUCKET_NAME=pets petstack-server
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `GATEWAY_LISTEN` | `0.0.0.0:4567` | Bind address |
//! | `REGION` | `us-east-1` | Region used to sign URLs |
//! | `TABLE_NAME` | `owners` | Reported table name |
//! | `S3_BUCKET_NAME` | *(unset)* | Upload bucket; create fails without it |
//! | `S3_ENDPOINT_URL` | `http://localhost:4566` | Object store endpoint for signed URLs |
//! | `ACCESS_KEY` / `SECRET_KEY` | `test` / `test` | Signing credentials |
//! | `SCAN_PAGE_SIZE` | `100` | Items per in-memory scan page |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use petstack_aws::{S3UrlSigner, path_style_client};
use petstack_core::{InMemoryOwnerStore, LocalServerConfig, OwnerProvider, OwnerServiceHandler};
use petstack_http::OwnerHttpService;

/// Server version reported at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

type Service = OwnerHttpService<OwnerServiceHandler>;

/// Initialize the tracing subscriber.
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
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

/// Wire the in-memory store and a path-style S3 signer into the handler.
fn build_handler(config: &LocalServerConfig) -> OwnerServiceHandler {
    let client = path_style_client(
        &config.s3_endpoint_url,
        config.service.region.clone(),
        &config.access_key,
        &config.secret_key,
    );
    let signer = S3UrlSigner::new(client);
    let store = InMemoryOwnerStore::with_page_size(config.scan_page_size);

    let provider = OwnerProvider::new(Arc::new(store), Arc::new(signer), &config.service);
    OwnerServiceHandler::new(Arc::new(provider))
}

fn build_service(config: &LocalServerConfig) -> Service {
    OwnerHttpService::new(Arc::new(build_handler(config)))
}

/// Run the accept loop, serving connections until a shutdown signal is received.
async fn serve(listener: TcpListener, service: Service) -> Result<()> {
    let graceful = hyper_util::server::graceful::GracefulShutdown::new();
    let http = HttpConnBuilder::new(TokioExecutor::new());

    let shutdown = async {
        tokio::signal::ctrl_c().await.ok();
        info!("received shutdown signal, draining connections");
    };

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = listener.accept() => {
                let (stream, peer_addr) = match result {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "failed to accept connection");
                        continue;
                    }
                };

                let conn = http.serve_connection(TokioIo::new(stream), service.clone());
                let conn = graceful.watch(conn.into_owned());

                tokio::spawn(async move {
                    if let Err(e) = conn.await {
                        error!(peer_addr = %peer_addr, error = %e, "connection error");
                    }
                });
            }

            () = &mut shutdown => {
                info!("shutting down gracefully");
                break;
            }
        }
    }

    graceful.shutdown().await;
    info!("all connections drained, exiting");

    Ok(())
}

/// Whether a raw HTTP response is a healthy status reply.
fn is_healthy_response(response: &str) -> bool {
    response.starts_with("HTTP/1.1 200") && response.contains("Service is operational")
}

/// Request `GET /status` from a running server.
async fn run_health_check(addr: &str) -> Result<()> {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    let stream = TcpStream::connect(addr)
        .await
        .with_context(|| format!("cannot connect to {addr}"))?;

    let (mut reader, mut writer) = stream.into_split();

    let request = format!("GET /status HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    writer.write_all(request.as_bytes()).await?;
    writer.shutdown().await?;

    let mut response = String::new();
    reader.read_to_string(&mut response).await?;

    if is_healthy_response(&response) {
        Ok(())
    } else {
        anyhow::bail!("unhealthy response from {addr}")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = LocalServerConfig::from_env().context("failed to load configuration")?;

    // Handle --health-check flag for Docker HEALTHCHECK.
    if std::env::args().any(|a| a == "--health-check") {
        let addr = config.listen_addr.replace("0.0.0.0", "127.0.0.1");
        let healthy = run_health_check(&addr).await.is_ok();
        std::process::exit(i32::from(!healthy));
    }

    init_tracing(&config.service.log_level)?;

    if config.service.upload_bucket().is_none() {
        warn!("S3_BUCKET_NAME is not set, owner creation will be rejected");
    }

    let service = build_service(&config);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("invalid bind address: {}", config.listen_addr))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(
        %addr,
        table_name = %config.service.table_name,
        s3_endpoint_url = %config.s3_endpoint_url,
        version = VERSION,
        "starting PetStack Server",
    );

    serve(listener, service).await
}
