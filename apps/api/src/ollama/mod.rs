//! Ollama client — the single point of entry for all generative-model calls.
//!
//! No other module may talk to the Ollama HTTP API directly; scoring code
//! goes through the `ModelBackend` trait and liveness checks go through
//! `list_models`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::analysis::assessment::Assessment;
use crate::analysis::pipeline::ModelBackend;
use crate::analysis::prompts::build_analyze_prompt;

/// Ordered model candidates, tried in sequence by the fallback pipeline.
/// Intentionally hardcoded to keep results reproducible for a given
/// upstream model state.
pub const MODEL_CANDIDATES: &[&str] = &["llama2", "mistral", "codellama", "gemma:2b"];

const GENERATE_PATH: &str = "/api/generate";
const TAGS_PATH: &str = "/api/tags";
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Ollama API error: {status}")]
    Api { status: u16 },

    #[error("empty completion from model")]
    EmptyResponse,

    #[error("no JSON object in model output")]
    NoJsonObject,

    #[error("malformed model output: {0}")]
    Malformed(String),
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: SamplingOptions,
}

/// Low-randomness settings to favor consistent structured output.
#[derive(Debug, Serialize)]
struct SamplingOptions {
    temperature: f32,
    top_p: f32,
    top_k: u32,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            top_p: 0.9,
            top_k: 40,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

#[derive(Debug, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<ModelTag>,
}

/// One locally installed model as reported by `/api/tags`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelTag {
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub modified_at: Option<String>,
}

#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
}

impl OllamaClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Runs one completion against `model` and returns the raw text.
    /// No retry here: the fallback scan across candidates is the only
    /// retry policy this service has.
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, BackendError> {
        let request_body = GenerateRequest {
            model,
            prompt,
            stream: false,
            options: SamplingOptions::default(),
        };

        let response = self
            .client
            .post(format!("{}{GENERATE_PATH}", self.base_url))
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Api {
                status: status.as_u16(),
            });
        }

        let body: GenerateResponse = response.json().await?;
        if body.response.is_empty() {
            return Err(BackendError::EmptyResponse);
        }

        debug!("model {model} returned {} chars", body.response.len());
        Ok(body.response)
    }

    /// Lists the locally installed models. Used by the liveness route.
    pub async fn list_models(&self) -> Result<TagsResponse, BackendError> {
        let response = self
            .client
            .get(format!("{}{TAGS_PATH}", self.base_url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Api {
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ModelBackend for OllamaClient {
    async fn analyze(
        &self,
        resume_text: &str,
        job_description: &str,
        model: &str,
    ) -> Result<Assessment, BackendError> {
        let prompt = build_analyze_prompt(resume_text, job_description);
        let raw = self.generate(model, &prompt).await?;

        let json = extract_json_object(&raw).ok_or(BackendError::NoJsonObject)?;
        let assessment: Assessment =
            serde_json::from_str(json).map_err(|e| BackendError::Malformed(e.to_string()))?;

        // Out-of-range output is as useless as unparsable output.
        assessment.validate().map_err(BackendError::Malformed)?;

        Ok(assessment)
    }
}

/// Returns the widest `{...}` slice of `raw` — models often wrap the JSON in
/// prose or code fences, and the object itself may contain nested braces.
fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}
