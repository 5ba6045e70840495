// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction appended to prompts that rewrite or invent resume content.
pub const NO_FABRICATION_INSTRUCTION: &str = "\
    CRITICAL: Never invent employers, titles, dates, degrees or numbers that are not in the input. \
    When a rewrite would benefit from a metric the input does not contain, use a placeholder \
    such as [X%] or [N users] so the candidate can fill it in.";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-z_]+)\}").expect("placeholder regex is valid"));

/// Fills `{name}` placeholders in a template from `(name, value)` pairs in a
/// single pass. Inserted values are never rescanned, and unknown placeholders
/// are left as written.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            values
                .iter()
                .find(|(key, _)| *key == &caps[1])
                .map_or_else(|| caps[0].to_string(), |(_, value)| value.to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_template_replaces_all_occurrences() {
        let out = fill_template("{a} and {a} then {b}", &[("a", "x"), ("b", "y")]);
        assert_eq!(out, "x and x then y");
    }

    #[test]
    fn test_fill_template_leaves_unknown_placeholders() {
        assert_eq!(fill_template("{missing}", &[("a", "x")]), "{missing}");
    }

    #[test]
    fn test_fill_template_does_not_expand_inserted_values() {
        let out = fill_template(
            "JD: {job} RESUME: {resume}",
            &[("job", "uses {resume} syntax"), ("resume", "Ada")],
        );
        assert_eq!(out, "JD: uses {resume} syntax RESUME: Ada");
    }
}
