//! Resume analysis: builds the ATS prompt, calls the LLM, and merges the
//! result with the deterministic heuristics.
//!
//! Flow: validate input → build prompt → run heuristics → LLM call
//!       (one retry on unusable output) → merge → return.
//!
//! Persistence is the caller's concern (see `repository`).

use thiserror::Error;
use tracing::info;

use crate::analysis::merge::{merge_analysis, run_heuristics, MergedAnalysis};
use crate::analysis::models::{AnalysisRequest, AnalysisResult};
use crate::analysis::prompts::{
    ANALYSIS_PROMPT_TEMPLATE, ANALYSIS_SYSTEM, INDUSTRY_BLOCK_TEMPLATE, JOB_BLOCK_TEMPLATE,
    JOB_MATCH_RULE_WITHOUT_JD, JOB_MATCH_RULE_WITH_JD,
};
use crate::errors::AppError;
use crate::llm_client::prompts::{fill_template, JSON_ONLY_SYSTEM, NO_FABRICATION_INSTRUCTION};
use crate::llm_client::{CallOptions, LlmClient};

/// Upper bound on resume text sent to the model.
pub const MAX_RESUME_CHARS: usize = 30_000;
/// Upper bound on job description text sent to the model.
pub const MAX_JOB_DESCRIPTION_CHARS: usize = 20_000;
/// Extra attempts when the model returns malformed or invalid JSON.
const OUTPUT_RETRIES: u32 = 1;

const ANALYSIS_OPTIONS: CallOptions = CallOptions {
    temperature: 0.2,
    max_tokens: 3000,
};

/// Input problems detected before any network call.
#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error("Resume text is required and cannot be empty")]
    EmptyResume,

    #[error("Resume text is too long ({actual} characters, max {max})")]
    ResumeTooLong { actual: usize, max: usize },

    #[error("Job description is too long ({actual} characters, max {max})")]
    JobDescriptionTooLong { actual: usize, max: usize },
}

impl From<AnalysisError> for AppError {
    fn from(e: AnalysisError) -> Self {
        AppError::Validation(e.to_string())
    }
}

/// System and user messages for one analysis call.
#[derive(Debug, Clone)]
pub struct AnalysisPrompt {
    pub system: String,
    pub user: String,
}

/// Validates the request and renders the prompt pair.
pub fn build_analysis_prompt(request: &AnalysisRequest) -> Result<AnalysisPrompt, AnalysisError> {
    let resume = request.resume_text.trim();
    if resume.is_empty() {
        return Err(AnalysisError::EmptyResume);
    }
    let resume_len = resume.chars().count();
    if resume_len > MAX_RESUME_CHARS {
        return Err(AnalysisError::ResumeTooLong {
            actual: resume_len,
            max: MAX_RESUME_CHARS,
        });
    }

    let job_description = request.job_description();
    if let Some(jd) = job_description {
        let jd_len = jd.chars().count();
        if jd_len > MAX_JOB_DESCRIPTION_CHARS {
            return Err(AnalysisError::JobDescriptionTooLong {
                actual: jd_len,
                max: MAX_JOB_DESCRIPTION_CHARS,
            });
        }
    }

    let job_block = job_description
        .map(|jd| JOB_BLOCK_TEMPLATE.replace("{job_description}", jd))
        .unwrap_or_default();
    let industry_block = request
        .industry()
        .map(|industry| INDUSTRY_BLOCK_TEMPLATE.replace("{industry}", industry))
        .unwrap_or_default();
    let job_match_rule = if job_description.is_some() {
        JOB_MATCH_RULE_WITH_JD
    } else {
        JOB_MATCH_RULE_WITHOUT_JD
    };

    let user = fill_template(
        ANALYSIS_PROMPT_TEMPLATE,
        &[
            ("job_match_rule", job_match_rule),
            ("no_fabrication", NO_FABRICATION_INSTRUCTION),
            ("industry_block", &industry_block),
            ("job_block", &job_block),
            ("resume_text", resume),
        ],
    );

    Ok(AnalysisPrompt {
        system: format!("{ANALYSIS_SYSTEM} {JSON_ONLY_SYSTEM}"),
        user,
    })
}

/// A job-match score is only meaningful against a job description; the
/// model sometimes invents one anyway.
fn without_unrequested_job_match(mut base: AnalysisResult, request: &AnalysisRequest) -> AnalysisResult {
    if request.job_description().is_none() {
        base.job_match_score = None;
    }
    base
}

/// Runs the full analysis pipeline.
pub async fn analyze_resume(
    llm: &LlmClient,
    request: &AnalysisRequest,
) -> Result<MergedAnalysis, AppError> {
    let prompt = build_analysis_prompt(request)?;
    let heuristics = run_heuristics(&request.resume_text, request.industry());

    info!(
        "Analyzing resume ({} chars, job description: {}, industry: {:?})",
        request.resume_text.len(),
        request.job_description().is_some(),
        request.industry()
    );

    let base: AnalysisResult = llm
        .call_json_retrying(&prompt.user, &prompt.system, ANALYSIS_OPTIONS, OUTPUT_RETRIES)
        .await?;

    let merged = merge_analysis(without_unrequested_job_match(base, request), heuristics);
    info!(
        "Analysis complete: base={} final={} adjustments={}",
        merged.base_score,
        merged.final_score,
        merged.adjustments.len()
    );

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::Router;
    use serde_json::json;

    use crate::config::LlmConfig;
    use crate::llm_client::LlmError;

    fn request(resume: &str, jd: Option<&str>, industry: Option<&str>) -> AnalysisRequest {
        AnalysisRequest {
            resume_text: resume.to_string(),
            job_description: jd.map(String::from),
            industry: industry.map(String::from),
            user_id: None,
        }
    }

    #[test]
    fn test_empty_resume_rejected() {
        let err = build_analysis_prompt(&request("  \n ", None, None)).unwrap_err();
        assert_eq!(err, AnalysisError::EmptyResume);
        assert!(err.to_string().contains("Resume text"));
    }

    #[test]
    fn test_oversized_resume_rejected() {
        let long = "a".repeat(MAX_RESUME_CHARS + 1);
        assert!(matches!(
            build_analysis_prompt(&request(&long, None, None)),
            Err(AnalysisError::ResumeTooLong { .. })
        ));
    }

    #[test]
    fn test_prompt_without_job_description() {
        let prompt = build_analysis_prompt(&request("Jane Doe\nEngineer", None, None)).unwrap();
        assert!(prompt.user.contains("Jane Doe"));
        assert!(prompt.user.contains("set job_match_score to null"));
        assert!(!prompt.user.contains("TARGET JOB DESCRIPTION"));
        assert!(!prompt.user.contains("TARGET INDUSTRY"));
        assert!(prompt.system.contains("valid JSON only"));
    }

    #[test]
    fn test_prompt_with_job_description_and_industry() {
        let prompt = build_analysis_prompt(&request(
            "Jane Doe",
            Some("Senior Data Engineer, Spark required"),
            Some("technology"),
        ))
        .unwrap();
        assert!(prompt.user.contains("TARGET JOB DESCRIPTION"));
        assert!(prompt.user.contains("Spark required"));
        assert!(prompt.user.contains("TARGET INDUSTRY: technology"));
        assert!(!prompt.user.contains("set job_match_score to null"));
    }

    #[test]
    fn test_no_unfilled_placeholders_remain() {
        let prompt = build_analysis_prompt(&request("Jane", Some("JD"), Some("finance"))).unwrap();
        for placeholder in ["{job_block}", "{industry_block}", "{job_match_rule}", "{no_fabrication}", "{resume_text}"] {
            assert!(!prompt.user.contains(placeholder), "{placeholder} left in prompt");
        }
    }

    #[test]
    fn test_braces_in_resume_are_preserved() {
        let prompt = build_analysis_prompt(&request("Used {job_block} templating in Jinja", None, None)).unwrap();
        assert!(prompt.user.contains("Used {job_block} templating"));
    }

    #[test]
    fn test_validation_error_maps_to_app_validation() {
        let app: AppError = AnalysisError::EmptyResume.into();
        assert!(matches!(app, AppError::Validation(_)));
    }

    #[test]
    fn test_job_match_score_cleared_without_job_description() {
        let base = AnalysisResult {
            job_match_score: Some(75),
            ..serde_json::from_str(r#"{"ats_score": 80, "skills_fit_score": 70}"#).unwrap()
        };

        let cleared = without_unrequested_job_match(base.clone(), &request("Jane", Some("   "), None));
        assert_eq!(cleared.job_match_score, None);

        let kept = without_unrequested_job_match(base, &request("Jane", Some("Data role"), None));
        assert_eq!(kept.job_match_score, Some(75));
    }

    fn completion(content: &str) -> (StatusCode, String) {
        let body = json!({"choices": [{"message": {"content": content}}]});
        (StatusCode::OK, body.to_string())
    }

    /// Local chat-completions endpoint replaying `replies` in order; the
    /// last reply repeats.
    async fn stub_llm(replies: Vec<(StatusCode, String)>) -> (LlmClient, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let replies = Arc::new(replies);
        let counter = calls.clone();
        let app = Router::new().route(
            "/chat/completions",
            post(move || {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                let reply = replies[n.min(replies.len() - 1)].clone();
                async move { reply }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = LlmClient::new(&LlmConfig {
            api_key: "sk-test".to_string(),
            base_url: format!("http://{addr}"),
            model: "gpt-test".to_string(),
            timeout_secs: 5,
        })
        .unwrap();
        (client, calls)
    }

    const SCORED: &str = r#"{"ats_score": 80, "job_match_score": 75, "skills_fit_score": 70}"#;
    const RESUME: &str = "Led a migration saving $2M across 12 teams.";

    #[tokio::test]
    async fn test_malformed_reply_is_retried_and_job_match_cleared() {
        let (llm, calls) = stub_llm(vec![completion("not json at all"), completion(SCORED)]).await;

        let merged = analyze_resume(&llm, &request(RESUME, None, None)).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(merged.base_score, 80);
        assert_eq!(merged.result.job_match_score, None);
    }

    #[tokio::test]
    async fn test_job_match_kept_with_job_description() {
        let (llm, calls) = stub_llm(vec![completion(SCORED)]).await;

        let merged = analyze_resume(&llm, &request(RESUME, Some("Platform lead"), None))
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(merged.result.job_match_score, Some(75));
    }

    #[tokio::test]
    async fn test_invalid_reply_retried_only_once() {
        let out_of_range = r#"{"ats_score": 180, "skills_fit_score": 70}"#;
        let (llm, calls) = stub_llm(vec![completion(out_of_range)]).await;

        let err = analyze_resume(&llm, &request(RESUME, None, None)).await.unwrap_err();

        assert!(matches!(err, AppError::Llm(LlmError::Schema(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_rate_limit_is_not_retried() {
        let rate_limited = json!({"error": {"message": "Rate limit reached", "type": "requests", "code": "rate_limit_exceeded"}});
        let (llm, calls) = stub_llm(vec![(StatusCode::TOO_MANY_REQUESTS, rate_limited.to_string())]).await;

        let err = analyze_resume(&llm, &request(RESUME, None, None)).await.unwrap_err();

        assert!(matches!(err, AppError::Llm(LlmError::RateLimited)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
