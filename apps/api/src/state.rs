use std::sync::Arc;

use crate::analysis::pipeline::FallbackPipeline;
use crate::config::Config;
use crate::ollama::OllamaClient;
use crate::storage::UploadSink;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Scoring pipeline: model candidates in fixed order, heuristic terminal
    /// fallback.
    pub pipeline: Arc<FallbackPipeline>,
    /// Present only when object storage is configured; the upload path is
    /// skipped otherwise.
    pub storage: Option<Arc<UploadSink>>,
    /// Raw client kept alongside the pipeline for the liveness route.
    pub ollama: OllamaClient,
}
