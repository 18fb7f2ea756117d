//! Assessment — the structured scoring result returned to callers.
//!
//! The wire format is camelCase (matching what the frontend already
//! consumes); `breakdown` keys stay snake_case because that is the JSON
//! contract the models are prompted with.

use serde::{Deserialize, Serialize};

/// Sentinel `modelUsed` value for results produced by the heuristic scorer.
pub const HEURISTIC_MODEL: &str = "heuristic_fallback";

/// Fixed sub-metric scores, each 0–100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub keyword_match: u8,
    pub experience_relevance: u8,
    pub skills_alignment: u8,
    pub format_quality: u8,
}

/// Letter grade a recruiter would plausibly assign.
///
/// Wider than what the heuristic emits (B+/C+/C) so that strict parsing of
/// model output does not reject a reasonable grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecruiterGrade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

/// Full assessment of a resume against a job description.
///
/// Every sequence field is required on deserialization — a model response
/// that omits one is malformed and fails the candidate. `modelUsed` is the
/// one exception: raw model output does not carry it, the pipeline stamps
/// it after a successful parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub score: u8,
    pub breakdown: ScoreBreakdown,
    pub keywords_matched: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
    pub summary: String,
    // Older prompt revisions asked for the snake_case spelling; accept both.
    #[serde(alias = "estimated_recruiter_score")]
    pub estimated_recruiter_score: RecruiterGrade,
    #[serde(default)]
    pub model_used: String,
}

impl Assessment {
    /// Range check applied to model output after deserialization.
    /// A violation is treated the same as a parse failure upstream.
    pub fn validate(&self) -> Result<(), String> {
        let checks = [
            ("score", self.score),
            ("keyword_match", self.breakdown.keyword_match),
            ("experience_relevance", self.breakdown.experience_relevance),
            ("skills_alignment", self.breakdown.skills_alignment),
            ("format_quality", self.breakdown.format_quality),
        ];
        for (name, value) in checks {
            if value > 100 {
                return Err(format!("{name} out of range: {value}"));
            }
        }
        Ok(())
    }
}
