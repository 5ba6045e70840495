//! Resume example generation seeded from the job-title taxonomy.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::{fill_template, JSON_ONLY_SYSTEM};
use crate::llm_client::{CallOptions, LlmClient, Validate};
use crate::taxonomy::job_titles::{lookup, JobTitle};
use crate::taxonomy::prompts::{EXAMPLES_PROMPT_TEMPLATE, EXAMPLES_SYSTEM};

const DEFAULT_BULLET_COUNT: u8 = 5;
const MAX_BULLET_COUNT: u8 = 10;
const OUTPUT_RETRIES: u32 = 1;

const EXAMPLES_OPTIONS: CallOptions = CallOptions {
    temperature: 0.7,
    max_tokens: 1500,
};

#[derive(Debug, Clone, Deserialize)]
pub struct ExamplesRequest {
    pub title: String,
    #[serde(default)]
    pub years_experience: Option<u32>,
    #[serde(default)]
    pub bullet_count: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeExample {
    pub summary: String,
    pub bullets: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl Validate for ResumeExample {
    fn validate(&self) -> Result<(), String> {
        if self.summary.trim().is_empty() {
            return Err("summary must not be empty".to_string());
        }
        if self.bullets.is_empty() {
            return Err("bullets must not be empty".to_string());
        }
        if let Some(i) = self.bullets.iter().position(|b| b.trim().is_empty()) {
            return Err(format!("bullets[{i}] must not be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExamplesResponse {
    pub job_title: &'static JobTitle,
    pub example: ResumeExample,
}

pub fn build_examples_prompt(job_title: &JobTitle, years_experience: Option<u32>, bullet_count: u8) -> String {
    let experience_line = match years_experience {
        Some(0) => "The candidate is entry level.".to_string(),
        Some(1) => "The candidate has 1 year of experience.".to_string(),
        Some(years) => format!("The candidate has {years} years of experience."),
        None => String::new(),
    };
    fill_template(
        EXAMPLES_PROMPT_TEMPLATE,
        &[
            ("title", job_title.canonical),
            ("category", job_title.category),
            ("skills", &job_title.typical_skills.join(", ")),
            ("experience_line", &experience_line),
            ("count", &bullet_count.to_string()),
        ],
    )
}

pub async fn generate_examples(
    llm: &LlmClient,
    request: &ExamplesRequest,
) -> Result<ExamplesResponse, AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    let job_title = lookup(&request.title)
        .ok_or_else(|| AppError::NotFound(format!("Unknown job title '{}'", request.title.trim())))?;
    let bullet_count = request
        .bullet_count
        .unwrap_or(DEFAULT_BULLET_COUNT)
        .clamp(1, MAX_BULLET_COUNT);

    let prompt = build_examples_prompt(job_title, request.years_experience, bullet_count);
    let system = format!("{EXAMPLES_SYSTEM} {JSON_ONLY_SYSTEM}");

    info!("Generating resume example for {}", job_title.canonical);
    let example: ResumeExample = llm
        .call_json_retrying(&prompt, &system, EXAMPLES_OPTIONS, OUTPUT_RETRIES)
        .await?;

    Ok(ExamplesResponse { job_title, example })
}
