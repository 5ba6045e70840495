// Job-title taxonomy and taxonomy-seeded resume examples.

pub mod examples;
pub mod handlers;
pub mod job_titles;
pub mod prompts;
