//! Bullet optimization: LLM rewrites of individual resume bullets, paired
//! with the deterministic weak-phrase findings for each bullet.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::models::BulletRewrite;
use crate::analysis::power_words::{analyze_power_words, WeakPhraseHit};
use crate::analysis::prompts::{JOB_BLOCK_TEMPLATE, OPTIMIZE_PROMPT_TEMPLATE, OPTIMIZE_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::prompts::{fill_template, JSON_ONLY_SYSTEM, NO_FABRICATION_INSTRUCTION};
use crate::llm_client::{CallOptions, LlmClient};

pub const MAX_BULLETS: usize = 20;
const OUTPUT_RETRIES: u32 = 1;

const OPTIMIZE_OPTIONS: CallOptions = CallOptions {
    temperature: 0.5,
    max_tokens: 2000,
};

#[derive(Debug, Clone, Deserialize)]
pub struct OptimizeRequest {
    pub bullets: Vec<String>,
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptimizedBullet {
    pub original: String,
    /// `None` when the model skipped this bullet.
    pub rewrite: Option<BulletRewrite>,
    pub weak_phrases: Vec<WeakPhraseHit>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptimizeResponse {
    pub bullets: Vec<OptimizedBullet>,
}

/// Trims, drops blanks, and enforces the bullet limit.
pub fn prepare_bullets(bullets: &[String]) -> Result<Vec<String>, AppError> {
    let cleaned: Vec<String> = bullets
        .iter()
        .map(|b| b.trim().trim_start_matches(['-', '•', '*']).trim().to_string())
        .filter(|b| !b.is_empty())
        .collect();

    if cleaned.is_empty() {
        return Err(AppError::Validation(
            "At least one non-empty bullet is required".to_string(),
        ));
    }
    if cleaned.len() > MAX_BULLETS {
        return Err(AppError::Validation(format!(
            "Too many bullets ({}), max {MAX_BULLETS} per request",
            cleaned.len()
        )));
    }
    Ok(cleaned)
}

pub fn build_optimize_prompt(bullets: &[String], job_description: Option<&str>) -> Result<String, AppError> {
    let bullets_json = serde_json::to_string_pretty(bullets)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize bullets: {e}")))?;
    let job_block = job_description
        .map(str::trim)
        .filter(|jd| !jd.is_empty())
        .map(|jd| JOB_BLOCK_TEMPLATE.replace("{job_description}", jd))
        .unwrap_or_default();

    Ok(fill_template(
        OPTIMIZE_PROMPT_TEMPLATE,
        &[
            ("no_fabrication", NO_FABRICATION_INSTRUCTION),
            ("job_block", &job_block),
            ("bullets_json", &bullets_json),
        ],
    ))
}

/// Pairs each input bullet with its rewrite. Exact `before` matches are
/// assigned across all bullets first; unmatched bullets then take the
/// unmatched rewrites in order.
pub fn pair_rewrites(bullets: &[String], rewrites: Vec<BulletRewrite>) -> Vec<OptimizedBullet> {
    let mut remaining: Vec<Option<BulletRewrite>> = rewrites.into_iter().map(Some).collect();

    let mut paired: Vec<Option<BulletRewrite>> = bullets
        .iter()
        .map(|original| {
            let idx = remaining.iter().position(|r| {
                r.as_ref()
                    .is_some_and(|r| r.before.trim().eq_ignore_ascii_case(original))
            })?;
            remaining[idx].take()
        })
        .collect();

    let mut leftovers = remaining.into_iter().flatten();
    for slot in paired.iter_mut().filter(|slot| slot.is_none()) {
        *slot = leftovers.next();
    }

    bullets
        .iter()
        .zip(paired)
        .map(|(original, rewrite)| OptimizedBullet {
            original: original.clone(),
            rewrite,
            weak_phrases: analyze_power_words(original).weak_phrases,
        })
        .collect()
}

pub async fn optimize_bullets(
    llm: &LlmClient,
    request: &OptimizeRequest,
) -> Result<OptimizeResponse, AppError> {
    let bullets = prepare_bullets(&request.bullets)?;
    let prompt = build_optimize_prompt(&bullets, request.job_description.as_deref())?;
    let system = format!("{OPTIMIZE_SYSTEM} {JSON_ONLY_SYSTEM}");

    info!("Optimizing {} bullets", bullets.len());
    let rewrites: Vec<BulletRewrite> = llm
        .call_json_retrying(&prompt, &system, OPTIMIZE_OPTIONS, OUTPUT_RETRIES)
        .await?;

    if rewrites.len() != bullets.len() {
        warn!(
            "Model returned {} rewrites for {} bullets",
            rewrites.len(),
            bullets.len()
        );
    }

    Ok(OptimizeResponse {
        bullets: pair_rewrites(&bullets, rewrites),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(before: &str, after: &str) -> BulletRewrite {
        BulletRewrite {
            before: before.to_string(),
            after: after.to_string(),
            reason: None,
        }
    }

    #[test]
    fn test_prepare_strips_markers_and_blanks() {
        let bullets = vec![
            "- Worked on APIs".to_string(),
            "   ".to_string(),
            "• Helped with hiring".to_string(),
        ];
        let prepared = prepare_bullets(&bullets).unwrap();
        assert_eq!(prepared, vec!["Worked on APIs", "Helped with hiring"]);
    }

    #[test]
    fn test_prepare_rejects_empty_and_oversized() {
        assert!(prepare_bullets(&[" ".to_string()]).is_err());
        let many: Vec<String> = (0..=MAX_BULLETS).map(|i| format!("Bullet {i}")).collect();
        assert!(prepare_bullets(&many).is_err());
    }

    #[test]
    fn test_prompt_contains_bullets_and_job() {
        let prompt = build_optimize_prompt(&["Worked on APIs".to_string()], Some("Backend role")).unwrap();
        assert!(prompt.contains("\"Worked on APIs\""));
        assert!(prompt.contains("Backend role"));
        assert!(!prompt.contains("{bullets_json}"));
    }

    #[test]
    fn test_pair_by_text_even_when_reordered() {
        let bullets = vec!["Worked on APIs".to_string(), "Helped with hiring".to_string()];
        let rewrites = vec![
            rewrite("Helped with hiring", "Interviewed 40 candidates"),
            rewrite("Worked on APIs", "Built 12 REST endpoints"),
        ];
        let paired = pair_rewrites(&bullets, rewrites);
        assert_eq!(paired[0].rewrite.as_ref().unwrap().after, "Built 12 REST endpoints");
        assert_eq!(paired[1].rewrite.as_ref().unwrap().after, "Interviewed 40 candidates");
        assert_eq!(paired[0].weak_phrases[0].phrase, "worked on");
    }

    #[test]
    fn test_text_match_wins_over_earlier_position_fallback() {
        let bullets = vec!["Worked on APIs".to_string(), "Helped with hiring".to_string()];
        let rewrites = vec![
            rewrite("Helped with hiring", "Interviewed 40 candidates"),
            rewrite("Worked on the APIs", "Built 12 REST endpoints"),
        ];
        let paired = pair_rewrites(&bullets, rewrites);
        assert_eq!(paired[0].rewrite.as_ref().unwrap().after, "Built 12 REST endpoints");
        assert_eq!(paired[1].rewrite.as_ref().unwrap().after, "Interviewed 40 candidates");
    }

    #[test]
    fn test_pair_falls_back_to_position_and_tolerates_short_output() {
        let bullets = vec!["Worked on APIs".to_string(), "Led migrations".to_string()];
        let rewrites = vec![rewrite("worked on the APIs", "Built REST APIs")];
        let paired = pair_rewrites(&bullets, rewrites);
        assert!(paired[0].rewrite.is_some());
        assert!(paired[1].rewrite.is_none());
        assert!(paired[1].weak_phrases.is_empty());
    }
}
