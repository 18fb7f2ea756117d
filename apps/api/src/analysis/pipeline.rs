//! Fallback pipeline — tries each model candidate in order, first success
//! wins, and an unconditional heuristic terminal fallback means `run` can
//! never fail.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::analysis::assessment::Assessment;
use crate::analysis::heuristic;
use crate::ollama::BackendError;

/// Pause after a failed candidate before trying the next one, so an
/// overloaded backend is not hammered.
const CANDIDATE_DELAY: Duration = Duration::from_secs(1);

/// A generative backend able to score a resume against a job description
/// with a named model. Any failure (transport, empty output, malformed
/// JSON) is a single error — callers advance the scan either way.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    async fn analyze(
        &self,
        resume_text: &str,
        job_description: &str,
        model: &str,
    ) -> Result<Assessment, BackendError>;
}

pub struct FallbackPipeline {
    backend: Arc<dyn ModelBackend>,
    candidates: Vec<String>,
}

impl FallbackPipeline {
    pub fn new(backend: Arc<dyn ModelBackend>, candidates: &[&str]) -> Self {
        Self {
            backend,
            candidates: candidates.iter().map(|m| m.to_string()).collect(),
        }
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Scores the resume, preferring model candidates in their fixed order
    /// and falling back to the deterministic heuristic when all of them
    /// fail. Always produces an Assessment.
    pub async fn run(&self, resume_text: &str, job_description: &str) -> Assessment {
        for model in &self.candidates {
            info!("Trying model: {model}");
            match self
                .backend
                .analyze(resume_text, job_description, model)
                .await
            {
                Ok(mut assessment) => {
                    assessment.model_used = model.clone();
                    return assessment;
                }
                Err(e) => {
                    warn!("Model {model} failed: {e}");
                    tokio::time::sleep(CANDIDATE_DELAY).await;
                }
            }
        }

        info!("All model backends failed, using heuristic fallback");
        heuristic::score(resume_text, job_description)
    }
}
