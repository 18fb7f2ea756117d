//! Heuristic scorer — deterministic keyword-overlap baseline used when every
//! model backend fails. Pure, no I/O, never fails.
//!
//! Intentionally a coarse, explainable baseline: vocabulary ∩ JD gives the
//! relevant set, the share of it found in the resume gives the score, and
//! the remaining sub-metrics are fixed discounts of that share.

use crate::analysis::assessment::{
    Assessment, RecruiterGrade, ScoreBreakdown, HEURISTIC_MODEL,
};

/// Fixed technical vocabulary. Matching is case-insensitive substring, so
/// "node" also hits "Node.js".
const TECH_KEYWORDS: &[&str] = &[
    "javascript",
    "python",
    "java",
    "react",
    "node",
    "aws",
    "docker",
    "sql",
    "mongodb",
    "git",
];

/// Scores a resume against a job description by keyword overlap.
///
/// The raw keyword score drives the breakdown and the grade; the top-level
/// score falls back to 50 when the raw score is 0 (which covers both an
/// empty relevant set and a resume matching nothing).
pub fn score(resume_text: &str, job_description: &str) -> Assessment {
    let jd = job_description.to_lowercase();
    let resume = resume_text.to_lowercase();

    let relevant: Vec<&str> = TECH_KEYWORDS
        .iter()
        .copied()
        .filter(|kw| jd.contains(kw))
        .collect();

    let matched: Vec<String> = relevant
        .iter()
        .copied()
        .filter(|kw| resume.contains(kw))
        .map(str::to_string)
        .collect();

    let missing: Vec<String> = relevant
        .iter()
        .copied()
        .filter(|kw| !resume.contains(kw))
        .map(str::to_string)
        .collect();

    let keyword_score = ((matched.len() as f32 / relevant.len().max(1) as f32) * 100.0)
        .round()
        .min(100.0) as u8;

    let top_missing: String = missing
        .iter()
        .take(3)
        .map(String::as_str)
        .collect::<Vec<&str>>()
        .join(", ");

    Assessment {
        score: if keyword_score == 0 { 50 } else { keyword_score },
        breakdown: ScoreBreakdown {
            keyword_match: keyword_score,
            experience_relevance: (keyword_score as f32 * 0.9).round() as u8,
            skills_alignment: (keyword_score as f32 * 0.8).round() as u8,
            format_quality: 70,
        },
        keywords_matched: matched,
        missing_keywords: missing,
        strengths: vec![
            "Automated analysis completed".to_string(),
            "Basic keyword matching applied".to_string(),
        ],
        weaknesses: vec![
            "Limited contextual understanding".to_string(),
            "No semantic analysis".to_string(),
        ],
        recommendations: vec![
            format!("Add missing technical skills: {}", top_missing),
            "Include quantifiable achievements".to_string(),
            "Ensure clear section headings".to_string(),
        ],
        summary: "Basic automated analysis completed. Consider manual review for detailed insights."
            .to_string(),
        estimated_recruiter_score: grade_for(keyword_score),
        model_used: HEURISTIC_MODEL.to_string(),
    }
}

fn grade_for(keyword_score: u8) -> RecruiterGrade {
    if keyword_score >= 80 {
        RecruiterGrade::BPlus
    } else if keyword_score >= 60 {
        RecruiterGrade::CPlus
    } else {
        RecruiterGrade::C
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_of_relevant_keywords_matched() {
        let jd = "Looking for React, Node, AWS, Docker engineer";
        let resume = "Built apps with React and Node for five years";

        let result = score(resume, jd);
        assert_eq!(result.breakdown.keyword_match, 50);
        assert_eq!(result.score, 50);
        assert_eq!(result.keywords_matched, vec!["react", "node"]);
        assert_eq!(result.missing_keywords, vec!["aws", "docker"]);
    }

    #[test]
    fn test_empty_job_description_defaults_to_50() {
        let result = score("React and Python everywhere", "");
        assert_eq!(result.score, 50);
        assert_eq!(result.breakdown.keyword_match, 0);
        assert!(result.keywords_matched.is_empty());
        assert!(result.missing_keywords.is_empty());
    }

    #[test]
    fn test_zero_match_defaults_score_but_not_breakdown() {
        let result = score("I write Haskell", "Need AWS and Docker");
        // Top-level score falls back to 50; the raw keyword score stays 0
        // and the grade buckets on the raw score.
        assert_eq!(result.score, 50);
        assert_eq!(result.breakdown.keyword_match, 0);
        assert_eq!(result.estimated_recruiter_score, RecruiterGrade::C);
        assert_eq!(result.missing_keywords, vec!["aws", "docker"]);
    }

    #[test]
    fn test_full_match_scores_100() {
        let jd = "React and Docker";
        let resume = "React, Docker";
        let result = score(resume, jd);
        assert_eq!(result.score, 100);
        assert_eq!(result.breakdown.keyword_match, 100);
        assert_eq!(result.estimated_recruiter_score, RecruiterGrade::BPlus);
        assert!(result.missing_keywords.is_empty());
    }

    #[test]
    fn test_matched_and_missing_partition_relevant_set() {
        let jd = "python java react node aws";
        let resume = "python react aws";
        let result = score(resume, jd);

        for kw in &result.keywords_matched {
            assert!(!result.missing_keywords.contains(kw));
        }
        let mut union = result.keywords_matched.clone();
        union.extend(result.missing_keywords.clone());
        union.sort();
        let mut relevant = vec!["python", "java", "react", "node", "aws"];
        relevant.sort();
        assert_eq!(union, relevant);
    }

    #[test]
    fn test_breakdown_discounts() {
        let jd = "react node aws docker";
        let resume = "react node";
        let result = score(resume, jd);
        assert_eq!(result.breakdown.keyword_match, 50);
        assert_eq!(result.breakdown.experience_relevance, 45);
        assert_eq!(result.breakdown.skills_alignment, 40);
        assert_eq!(result.breakdown.format_quality, 70);
    }

    #[test]
    fn test_grade_thresholds() {
        // 3/5 = 60 → C+
        let result = score("python java react", "python java react node aws");
        assert_eq!(result.breakdown.keyword_match, 60);
        assert_eq!(result.estimated_recruiter_score, RecruiterGrade::CPlus);

        // 4/5 = 80 → B+
        let result = score("python java react node", "python java react node aws");
        assert_eq!(result.breakdown.keyword_match, 80);
        assert_eq!(result.estimated_recruiter_score, RecruiterGrade::BPlus);
    }

    #[test]
    fn test_deterministic() {
        let jd = "React, Node, SQL and MongoDB on AWS";
        let resume = "Shipped Node services backed by SQL and MongoDB";
        assert_eq!(score(resume, jd), score(resume, jd));
    }

    #[test]
    fn test_scores_always_in_range() {
        let cases = [
            ("", ""),
            ("react", "react"),
            ("a very long resume with no tech words at all", "aws docker sql"),
            ("javascript python java react node aws docker sql mongodb git", "javascript python java react node aws docker sql mongodb git"),
        ];
        for (resume, jd) in cases {
            let result = score(resume, jd);
            assert!(result.score <= 100);
            assert!(result.breakdown.keyword_match <= 100);
            assert!(result.breakdown.experience_relevance <= 100);
            assert!(result.breakdown.skills_alignment <= 100);
            assert!(result.breakdown.format_quality <= 100);
            assert!(result.validate().is_ok());
        }
    }

    #[test]
    fn test_tagged_with_fallback_sentinel() {
        let result = score("react", "react");
        assert_eq!(result.model_used, HEURISTIC_MODEL);
    }

    #[test]
    fn test_first_recommendation_lists_top_missing() {
        let jd = "javascript python java react node";
        let result = score("nothing relevant here at all", jd);
        // Only the first three missing keywords are named.
        assert_eq!(
            result.recommendations[0],
            "Add missing technical skills: javascript, python, java"
        );
    }

    #[test]
    fn test_case_insensitive_matching() {
        let result = score("REACT and NODE", "React, Node");
        assert_eq!(result.breakdown.keyword_match, 100);
    }
}
