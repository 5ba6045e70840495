// Resume analysis: LLM ATS scoring merged with deterministic heuristics
// (weak language, quantification, industry keyword coverage).
// All LLM calls go through llm_client.

pub mod analyzer;
pub mod extract;
pub mod handlers;
pub mod industry_keywords;
pub mod merge;
pub mod models;
pub mod optimizer;
pub mod power_words;
pub mod prompts;
pub mod quantification;
pub mod repository;
