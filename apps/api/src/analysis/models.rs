use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::llm_client::Validate;

/// Request body for `/api/resume/analyze` and `/api/resume/heuristics`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    pub resume_text: String,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    /// Owner of the stored analysis row, when known.
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

impl AnalysisRequest {
    /// Job description, if present and not blank.
    pub fn job_description(&self) -> Option<&str> {
        self.job_description
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn industry(&self) -> Option<&str> {
        self.industry.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[serde(alias = "Low", alias = "LOW", alias = "minor")]
    Low,
    #[serde(alias = "Medium", alias = "MEDIUM", alias = "moderate")]
    Medium,
    #[serde(alias = "High", alias = "HIGH", alias = "critical")]
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisWarning {
    pub category: String,
    pub severity: Severity,
    pub issue: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletRewrite {
    pub before: String,
    pub after: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// A coaching note. Models emit either a bare string or an object with
/// `title`/`source`/`insight`; both normalize to this tagged form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", from = "RawInsight")]
pub enum CoachingInsight {
    Tip {
        text: String,
    },
    Sourced {
        title: String,
        source: String,
        insight: String,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawInsight {
    Text(String),
    Sourced {
        title: String,
        #[serde(default)]
        source: String,
        insight: String,
    },
    Tip {
        text: String,
    },
}

impl From<RawInsight> for CoachingInsight {
    fn from(raw: RawInsight) -> Self {
        match raw {
            RawInsight::Text(text) | RawInsight::Tip { text } => CoachingInsight::Tip { text },
            RawInsight::Sourced {
                title,
                source,
                insight,
            } => CoachingInsight::Sourced {
                title,
                source,
                insight,
            },
        }
    }
}

/// Structured output of the LLM analysis call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub ats_score: u32,
    #[serde(default)]
    pub job_match_score: Option<u32>,
    pub skills_fit_score: u32,
    #[serde(default)]
    pub matched_keywords: Vec<String>,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<AnalysisWarning>,
    #[serde(default)]
    pub bullet_rewrites: Vec<BulletRewrite>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub coaching: Vec<CoachingInsight>,
}

fn check_score(name: &str, score: u32) -> Result<(), String> {
    if score > 100 {
        Err(format!("{name} must be within 0..=100, got {score}"))
    } else {
        Ok(())
    }
}

fn require_text(name: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{name} must not be empty"))
    } else {
        Ok(())
    }
}

impl Validate for AnalysisWarning {
    fn validate(&self) -> Result<(), String> {
        require_text("warning.category", &self.category)?;
        require_text("warning.issue", &self.issue)?;
        require_text("warning.recommendation", &self.recommendation)
    }
}

impl Validate for BulletRewrite {
    fn validate(&self) -> Result<(), String> {
        require_text("rewrite.before", &self.before)?;
        require_text("rewrite.after", &self.after)
    }
}

impl Validate for CoachingInsight {
    fn validate(&self) -> Result<(), String> {
        match self {
            CoachingInsight::Tip { text } => require_text("coaching.text", text),
            CoachingInsight::Sourced { title, insight, .. } => {
                require_text("coaching.title", title)?;
                require_text("coaching.insight", insight)
            }
        }
    }
}

impl Validate for AnalysisResult {
    fn validate(&self) -> Result<(), String> {
        check_score("ats_score", self.ats_score)?;
        check_score("skills_fit_score", self.skills_fit_score)?;
        if let Some(score) = self.job_match_score {
            check_score("job_match_score", score)?;
        }
        self.warnings
            .validate()
            .map_err(|e| format!("warnings{e}"))?;
        self.bullet_rewrites
            .validate()
            .map_err(|e| format!("bullet_rewrites{e}"))?;
        self.coaching.validate().map_err(|e| format!("coaching{e}"))
    }
}
