//! Result merge: combines the LLM analysis with the deterministic heuristics
//! and applies penalty-based score adjustments.
//!
//! Penalties:
//! - no quantified metrics: -10
//! - weak language: high -10, moderate -5
//! - industry keyword coverage (only when an industry was analyzed):
//!   below 40% -15, below 60% -5
//!
//! The adjusted score is clamped to [0, 100].

use serde::{Deserialize, Serialize};

use crate::analysis::industry_keywords::{analyze_industry_coverage, CoverageReport};
use crate::analysis::models::{AnalysisResult, AnalysisWarning, Severity};
use crate::analysis::power_words::{analyze_power_words, PowerWordsReport, WeakWordLevel};
use crate::analysis::quantification::{analyze_quantification, QuantificationReport};

const NO_METRICS_PENALTY: i32 = 10;
const HIGH_WEAK_WORDS_PENALTY: i32 = 10;
const MODERATE_WEAK_WORDS_PENALTY: i32 = 5;
const VERY_LOW_COVERAGE_PENALTY: i32 = 15;
const LOW_COVERAGE_PENALTY: i32 = 5;
const VERY_LOW_COVERAGE_THRESHOLD: u32 = 40;
const LOW_COVERAGE_THRESHOLD: u32 = 60;

/// Output of the three deterministic analyzers over one resume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeuristicReport {
    pub power_words: PowerWordsReport,
    pub quantification: QuantificationReport,
    /// `None` when no industry was given or it is not in the keyword tables.
    pub industry: Option<CoverageReport>,
}

/// Runs every deterministic analyzer. No I/O.
pub fn run_heuristics(text: &str, industry: Option<&str>) -> HeuristicReport {
    HeuristicReport {
        power_words: analyze_power_words(text),
        quantification: analyze_quantification(text),
        industry: industry.and_then(|name| analyze_industry_coverage(text, name)),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreAdjustment {
    pub reason: String,
    /// Negative for penalties.
    pub points: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergedAnalysis {
    #[serde(flatten)]
    pub result: AnalysisResult,
    /// The LLM's `ats_score` before adjustments.
    pub base_score: u32,
    pub final_score: u32,
    pub adjustments: Vec<ScoreAdjustment>,
    pub heuristics: HeuristicReport,
}

/// Penalties triggered by the heuristic findings, in a stable order.
pub fn compute_adjustments(heuristics: &HeuristicReport) -> Vec<ScoreAdjustment> {
    let mut adjustments = Vec::new();

    if !heuristics.quantification.has_metrics {
        adjustments.push(ScoreAdjustment {
            reason: "No quantified achievements (numbers, percentages, money)".to_string(),
            points: -NO_METRICS_PENALTY,
        });
    }

    let weak = &heuristics.power_words;
    match weak.level {
        WeakWordLevel::High => adjustments.push(ScoreAdjustment {
            reason: format!("Heavy use of weak phrasing ({} occurrences)", weak.weak_phrase_count),
            points: -HIGH_WEAK_WORDS_PENALTY,
        }),
        WeakWordLevel::Moderate => adjustments.push(ScoreAdjustment {
            reason: format!("Some weak phrasing ({} occurrences)", weak.weak_phrase_count),
            points: -MODERATE_WEAK_WORDS_PENALTY,
        }),
        WeakWordLevel::None | WeakWordLevel::Low => {}
    }

    if let Some(coverage) = &heuristics.industry {
        let pct = coverage.coverage_percent;
        if pct < VERY_LOW_COVERAGE_THRESHOLD {
            adjustments.push(ScoreAdjustment {
                reason: format!("Very low industry keyword coverage ({pct}%)"),
                points: -VERY_LOW_COVERAGE_PENALTY,
            });
        } else if pct < LOW_COVERAGE_THRESHOLD {
            adjustments.push(ScoreAdjustment {
                reason: format!("Low industry keyword coverage ({pct}%)"),
                points: -LOW_COVERAGE_PENALTY,
            });
        }
    }

    adjustments
}

/// Applies adjustments to a base score, clamped to [0, 100].
pub fn adjusted_score(base: u32, adjustments: &[ScoreAdjustment]) -> u32 {
    let total: i64 = adjustments.iter().map(|a| i64::from(a.points)).sum();
    (i64::from(base) + total).clamp(0, 100) as u32
}

/// Merges the LLM result with heuristic findings.
pub fn merge_analysis(mut result: AnalysisResult, heuristics: HeuristicReport) -> MergedAnalysis {
    let adjustments = compute_adjustments(&heuristics);
    let base_score = result.ats_score.min(100);
    let final_score = adjusted_score(base_score, &adjustments);

    append_heuristic_warnings(&mut result, &heuristics);

    if let Some(coverage) = &heuristics.industry {
        for keyword in &coverage.missing_must_have {
            let already_listed = result
                .missing_keywords
                .iter()
                .any(|k| k.eq_ignore_ascii_case(keyword));
            if !already_listed {
                result.missing_keywords.push(keyword.clone());
            }
        }
    }

    MergedAnalysis {
        result,
        base_score,
        final_score,
        adjustments,
        heuristics,
    }
}

fn has_warning(result: &AnalysisResult, category: &str) -> bool {
    result
        .warnings
        .iter()
        .any(|w| w.category.eq_ignore_ascii_case(category))
}

fn append_heuristic_warnings(result: &mut AnalysisResult, heuristics: &HeuristicReport) {
    if !heuristics.quantification.has_metrics && !has_warning(result, "metrics") {
        result.warnings.push(AnalysisWarning {
            category: "metrics".to_string(),
            severity: Severity::High,
            issue: "No quantified achievements were found".to_string(),
            recommendation: "Add numbers to your strongest bullets: percentages, money saved or earned, team size, volume handled.".to_string(),
        });
    }

    let weak = &heuristics.power_words;
    if weak.level >= WeakWordLevel::Moderate && !has_warning(result, "language") {
        let examples: Vec<String> = weak
            .weak_phrases
            .iter()
            .take(3)
            .map(|hit| match hit.replacements.first() {
                Some(verb) => format!("'{}' → '{}'", hit.phrase, verb),
                None => format!("'{}'", hit.phrase),
            })
            .collect();
        result.warnings.push(AnalysisWarning {
            category: "language".to_string(),
            severity: if weak.level == WeakWordLevel::High {
                Severity::High
            } else {
                Severity::Medium
            },
            issue: format!("{} weak or passive phrases found", weak.weak_phrase_count),
            recommendation: format!("Replace passive phrasing with action verbs: {}.", examples.join(", ")),
        });
    }

    if let Some(coverage) = &heuristics.industry {
        if coverage.coverage_percent < LOW_COVERAGE_THRESHOLD {
            let top_missing: Vec<&str> = coverage
                .missing_must_have
                .iter()
                .take(3)
                .map(String::as_str)
                .collect();
            result.warnings.push(AnalysisWarning {
                category: "keywords".to_string(),
                severity: if coverage.coverage_percent < VERY_LOW_COVERAGE_THRESHOLD {
                    Severity::High
                } else {
                    Severity::Medium
                },
                issue: format!(
                    "Industry keyword coverage is {}%",
                    coverage.coverage_percent
                ),
                recommendation: if top_missing.is_empty() {
                    "Work more industry-standard terms, tools and certifications into your experience.".to_string()
                } else {
                    format!("Where accurate, mention: {}.", top_missing.join(", "))
                },
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_result(ats_score: u32) -> AnalysisResult {
        AnalysisResult {
            ats_score,
            job_match_score: None,
            skills_fit_score: 70,
            matched_keywords: vec![],
            missing_keywords: vec![],
            strengths: vec![],
            warnings: vec![],
            bullet_rewrites: vec![],
            summary: "Solid base.".to_string(),
            coaching: vec![],
        }
    }

    const WEAK_NO_METRICS: &str = "Responsible for reports. Helped with onboarding. \
        Worked on the website. Participated in meetings. Handled customer emails. \
        Assisted with audits.";

    #[test]
    fn test_base_80_no_metrics_high_weak_words_is_60() {
        let heuristics = run_heuristics(WEAK_NO_METRICS, None);
        assert!(!heuristics.quantification.has_metrics);
        assert_eq!(heuristics.power_words.level, WeakWordLevel::High);

        let merged = merge_analysis(base_result(80), heuristics);
        assert_eq!(merged.base_score, 80);
        assert_eq!(merged.final_score, 60);
        assert_eq!(merged.adjustments.len(), 2);
    }

    #[test]
    fn test_clean_quantified_resume_keeps_base_score() {
        let heuristics = run_heuristics("Grew ARR 35% by launching 3 enterprise integrations.", None);
        let merged = merge_analysis(base_result(88), heuristics);
        assert!(merged.adjustments.is_empty());
        assert_eq!(merged.final_score, 88);
    }

    #[test]
    fn test_score_clamped_at_zero() {
        let heuristics = run_heuristics(WEAK_NO_METRICS, Some("technology"));
        let merged = merge_analysis(base_result(5), heuristics);
        assert_eq!(merged.final_score, 0);
    }

    #[test]
    fn test_adjusted_score_clamps_both_ends() {
        let bonus = [ScoreAdjustment {
            reason: "test".to_string(),
            points: 50,
        }];
        assert_eq!(adjusted_score(90, &bonus), 100);
        let penalty = [ScoreAdjustment {
            reason: "test".to_string(),
            points: -50,
        }];
        assert_eq!(adjusted_score(20, &penalty), 0);
    }

    #[test]
    fn test_low_industry_coverage_penalized_and_must_haves_added() {
        let heuristics = run_heuristics("Grew revenue 20% as a Python developer.", Some("technology"));
        let coverage = heuristics.industry.as_ref().unwrap();
        assert!(coverage.coverage_percent < VERY_LOW_COVERAGE_THRESHOLD);

        let mut base = base_result(80);
        base.missing_keywords.push("System Design".to_string());
        let merged = merge_analysis(base, heuristics);

        assert!(merged
            .adjustments
            .iter()
            .any(|a| a.points == -VERY_LOW_COVERAGE_PENALTY));
        assert_eq!(merged.final_score, 65);
        let design_mentions = merged
            .result
            .missing_keywords
            .iter()
            .filter(|k| k.eq_ignore_ascii_case("system design"))
            .count();
        assert_eq!(design_mentions, 1, "no duplicate missing keywords");
        assert!(merged
            .result
            .missing_keywords
            .contains(&"version control".to_string()));
    }

    #[test]
    fn test_moderate_weak_words_penalty() {
        let heuristics = run_heuristics("Worked on billing. Helped with support. Cut costs 10%.", None);
        assert_eq!(heuristics.power_words.level, WeakWordLevel::Moderate);
        let merged = merge_analysis(base_result(70), heuristics);
        assert_eq!(merged.final_score, 65);
    }

    #[test]
    fn test_heuristic_warnings_not_duplicated() {
        let mut base = base_result(80);
        base.warnings.push(AnalysisWarning {
            category: "Metrics".to_string(),
            severity: Severity::Medium,
            issue: "Few numbers".to_string(),
            recommendation: "Add numbers".to_string(),
        });
        let merged = merge_analysis(base, run_heuristics(WEAK_NO_METRICS, None));
        let metric_warnings = merged
            .result
            .warnings
            .iter()
            .filter(|w| w.category.eq_ignore_ascii_case("metrics"))
            .count();
        assert_eq!(metric_warnings, 1);
        assert!(merged
            .result
            .warnings
            .iter()
            .any(|w| w.category == "language" && w.severity == Severity::High));
    }

    #[test]
    fn test_unknown_industry_has_no_coverage() {
        let heuristics = run_heuristics("text", Some("astrology"));
        assert!(heuristics.industry.is_none());
    }

    #[test]
    fn test_merged_serializes_flat() {
        let merged = merge_analysis(base_result(80), run_heuristics("Saved $2M", None));
        let json = serde_json::to_value(&merged).unwrap();
        assert_eq!(json["ats_score"], 80);
        assert_eq!(json["final_score"], 80);
        assert!(json["heuristics"]["quantification"]["has_metrics"].as_bool().unwrap());
    }
}
