mod analysis;
mod config;
mod errors;
mod extract;
mod ollama;
mod routes;
mod state;
mod storage;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::pipeline::FallbackPipeline;
use crate::config::{Config, StorageConfig};
use crate::ollama::{OllamaClient, MODEL_CANDIDATES};
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::UploadSink;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let crate_target = env!("CARGO_PKG_NAME").replace('-', "_");
            EnvFilter::new(format!("{crate_target}={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting atscore API v{}", env!("CARGO_PKG_VERSION"));

    // Ollama client + scoring pipeline
    let ollama = OllamaClient::new(config.ollama_url.clone());
    let pipeline = Arc::new(FallbackPipeline::new(
        Arc::new(ollama.clone()),
        MODEL_CANDIDATES,
    ));
    info!(
        "Scoring pipeline initialized (candidates: {})",
        MODEL_CANDIDATES.join(", ")
    );

    // Optional object storage
    let storage = match &config.storage {
        Some(storage_config) => {
            let client = build_s3_client(storage_config).await;
            info!("Object storage enabled (bucket: {})", storage_config.bucket);
            Some(Arc::new(UploadSink::new(
                client,
                storage_config.bucket.clone(),
            )))
        }
        None => {
            info!("Object storage not configured; uploads will not be persisted");
            None
        }
    };

    let state = AppState {
        config: config.clone(),
        pipeline,
        storage,
        ollama,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(storage: &StorageConfig) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &storage.access_key_id,
        &storage.secret_access_key,
        None,
        None,
        "atscore-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&storage.endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
