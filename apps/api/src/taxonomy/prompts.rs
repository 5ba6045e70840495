// Prompt constants for taxonomy-seeded resume examples.

/// System prompt for example generation. Append `JSON_ONLY_SYSTEM`.
pub const EXAMPLES_SYSTEM: &str = "You are a senior recruiter who writes realistic, \
    ATS-friendly example resume content for a given job title.";

/// Replace: {title}, {category}, {skills}, {experience_line}, {count}.
pub const EXAMPLES_PROMPT_TEMPLATE: &str = r#"Write example resume content for the role "{title}" ({category}).
{experience_line}
Typical skills for this role: {skills}

Return a JSON object with this EXACT schema:
{
  "summary": "A 2-3 sentence professional summary.",
  "bullets": ["Achievement-focused bullet starting with an action verb and including a metric"],
  "skills": ["skill"]
}

RULES:
1. Write exactly {count} bullets.
2. Every bullet starts with a strong past-tense action verb and contains a plausible metric.
3. Use the typical skills naturally; do not list them all in one bullet.
4. The content is an illustrative example, so it must not name real companies or people."#;
