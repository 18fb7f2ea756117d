//! Prompt template for resume analysis.
//! The template pins the exact JSON shape so low-temperature sampling plus
//! strict parsing gives a usable structured result.

/// Character budget for the resume slice embedded in the prompt.
pub const RESUME_CHAR_BUDGET: usize = 4000;
/// Character budget for the job description slice.
pub const JD_CHAR_BUDGET: usize = 2000;

pub const ANALYZE_PROMPT_TEMPLATE: &str = r#"You are an expert ATS (Applicant Tracking System) analyst. Analyze the resume against the job description and provide a detailed assessment.

RESUME TEXT:
{resume_text}

JOB DESCRIPTION:
{job_description}

Provide your analysis in this EXACT JSON format:
{
  "score": 85,
  "breakdown": {
    "keyword_match": 80,
    "experience_relevance": 90,
    "skills_alignment": 85,
    "format_quality": 75
  },
  "keywordsMatched": ["JavaScript", "React", "Node.js", "Python"],
  "missingKeywords": ["AWS", "Docker", "Kubernetes"],
  "strengths": ["Strong technical skills", "Relevant experience", "Good education"],
  "weaknesses": ["Missing cloud experience", "No certification mentioned"],
  "recommendations": [
    "Add AWS and Docker experience",
    "Include relevant certifications",
    "Quantify achievements with numbers"
  ],
  "summary": "Strong candidate with excellent technical skills but needs to add cloud technologies and quantify achievements.",
  "estimatedRecruiterScore": "B+"
}

Return ONLY the JSON object, no other text or explanations."#;

/// Builds the analysis prompt, truncating both inputs to their budgets.
pub fn build_analyze_prompt(resume_text: &str, job_description: &str) -> String {
    ANALYZE_PROMPT_TEMPLATE
        .replace("{resume_text}", &truncate_chars(resume_text, RESUME_CHAR_BUDGET))
        .replace(
            "{job_description}",
            &truncate_chars(job_description, JD_CHAR_BUDGET),
        )
}

/// Char-boundary-safe prefix of `text` with at most `budget` chars.
fn truncate_chars(text: &str, budget: usize) -> String {
    text.chars().take(budget).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_both_inputs() {
        let prompt = build_analyze_prompt("my resume body", "the job description");
        assert!(prompt.contains("my resume body"));
        assert!(prompt.contains("the job description"));
        assert!(!prompt.contains("{resume_text}"));
        assert!(!prompt.contains("{job_description}"));
    }

    #[test]
    fn test_resume_truncated_to_budget() {
        let long_resume = "x".repeat(RESUME_CHAR_BUDGET + 500);
        let prompt = build_analyze_prompt(&long_resume, "jd");
        assert!(!prompt.contains(&long_resume));
        assert!(prompt.contains(&"x".repeat(RESUME_CHAR_BUDGET)));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        // Multibyte input must not panic or split a char.
        let text = "é".repeat(10);
        assert_eq!(truncate_chars(&text, 4), "éééé");
    }
}
