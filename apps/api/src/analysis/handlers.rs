//! Axum route handlers for the ATS analysis API.

use anyhow::Context;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::assessment::Assessment;
use crate::errors::AppError;
use crate::extract;
use crate::state::AppState;

/// Extractions shorter than this (trimmed) are rejected as unusable input.
const MIN_RESUME_CHARS: usize = 50;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub success: bool,
    #[serde(rename = "signedURL")]
    pub signed_url: Option<String>,
    pub analysis: Assessment,
    pub timestamp: DateTime<Utc>,
    pub resume_length: usize,
    pub models_available: Vec<String>,
}

struct UploadedResume {
    file_name: String,
    content_type: String,
    data: Bytes,
}

/// POST /api/v1/ats/analyze
///
/// Multipart request: `resume` (file) and `jobDescription` (text).
/// Extracts text, optionally persists the original upload, and scores the
/// resume through the fallback pipeline. The spooled temp file is removed
/// on every exit path.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut resume: Option<UploadedResume> = None;
    let mut job_description = String::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let file_name = field.file_name().unwrap_or("resume").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await?;
                resume = Some(UploadedResume {
                    file_name,
                    content_type,
                    data,
                });
            }
            "jobDescription" => {
                job_description = field.text().await?;
            }
            _ => {}
        }
    }

    let resume = resume.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;

    let request_id = Uuid::new_v4();
    info!("Processing resume: {} ({request_id})", resume.file_name);

    // Spool the upload to a uniquely named temp file. NamedTempFile removes
    // it on drop, which covers success and every error return below.
    let spooled = tempfile::Builder::new()
        .prefix(&format!("resume-{request_id}-"))
        .tempfile()
        .context("creating spool file")?;
    tokio::fs::write(spooled.path(), &resume.data)
        .await
        .context("writing spool file")?;

    let path = spooled.path().to_path_buf();
    let media_type = resume.content_type.clone();
    let resume_text =
        tokio::task::spawn_blocking(move || extract::extract_text(&path, &media_type))
            .await
            .context("extraction task panicked")?;

    if resume_text.trim().chars().count() < MIN_RESUME_CHARS {
        return Err(AppError::Validation(
            "Could not extract sufficient text from resume".to_string(),
        ));
    }

    let resume_length = resume_text.chars().count();
    info!("Extracted {resume_length} characters from resume");

    // Best-effort persistence: a failed upload is logged, never surfaced.
    let signed_url = match &state.storage {
        Some(sink) => {
            match sink
                .store(&resume.file_name, &resume.content_type, resume.data.clone())
                .await
            {
                Ok(url) => Some(url),
                Err(e) => {
                    warn!("Resume upload failed: {e:#}");
                    None
                }
            }
        }
        None => None,
    };

    info!("Starting AI analysis...");
    let analysis = state.pipeline.run(&resume_text, &job_description).await;
    info!("Analysis completed (model: {})", analysis.model_used);

    Ok(Json(AnalyzeResponse {
        success: true,
        signed_url,
        analysis,
        timestamp: Utc::now(),
        resume_length,
        models_available: state.pipeline.candidates().to_vec(),
    }))
}

/// GET /api/v1/ats/health
///
/// Liveness check against the model-serving backend: reports the installed
/// models alongside the configured candidate list.
pub async fn handle_ats_health(State(state): State<AppState>) -> Response {
    match state.ollama.list_models().await {
        Ok(tags) => Json(json!({
            "status": "healthy",
            "ollama": "running",
            "models": tags.models,
            "availableModels": state.pipeline.candidates(),
        }))
        .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "status": "unhealthy",
                "ollama": "not running",
                "error": e.to_string(),
                "solution": "Run: sudo systemctl start ollama"
            })),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::assessment::{RecruiterGrade, ScoreBreakdown};

    #[test]
    fn test_analyze_response_wire_keys() {
        let response = AnalyzeResponse {
            success: true,
            signed_url: Some("https://example.com/signed".to_string()),
            analysis: Assessment {
                score: 50,
                breakdown: ScoreBreakdown {
                    keyword_match: 50,
                    experience_relevance: 45,
                    skills_alignment: 40,
                    format_quality: 70,
                },
                keywords_matched: vec![],
                missing_keywords: vec![],
                strengths: vec![],
                weaknesses: vec![],
                recommendations: vec![],
                summary: String::new(),
                estimated_recruiter_score: RecruiterGrade::C,
                model_used: "heuristic_fallback".to_string(),
            },
            timestamp: Utc::now(),
            resume_length: 1234,
            models_available: vec!["llama2".to_string()],
        };

        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("signedURL").is_some());
        assert!(value.get("resumeLength").is_some());
        assert!(value.get("modelsAvailable").is_some());
        assert_eq!(value["success"], json!(true));
    }

    #[tokio::test]
    async fn test_spool_file_removed_on_drop() {
        let spooled = tempfile::Builder::new()
            .prefix("resume-test-")
            .tempfile()
            .unwrap();
        let path = spooled.path().to_path_buf();
        tokio::fs::write(&path, b"resume bytes").await.unwrap();
        assert!(path.exists());

        // Same mechanism the handler relies on for every exit path.
        drop(spooled);
        assert!(!path.exists());
    }
}
