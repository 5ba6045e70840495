//! Industry keyword coverage: three-way match (full / partial / missing) of a
//! resume against a static per-industry keyword list.
//!
//! A keyword written as `ABBR (Expanded Form)` is a full match when the
//! expanded form (or the whole literal) appears, and a partial match when only
//! the abbreviation does. Coverage counts full matches only.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordCategory {
    MustHave,
    Technical,
    Soft,
    Certification,
    Methodology,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Full,
    Partial,
    Missing,
}

#[derive(Debug, Clone, Copy)]
pub struct IndustryKeyword {
    pub term: &'static str,
    pub category: KeywordCategory,
}

#[derive(Debug, Clone, Copy)]
pub struct IndustryProfile {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub keywords: &'static [IndustryKeyword],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordMatch {
    pub keyword: String,
    pub category: KeywordCategory,
    pub status: MatchStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageReport {
    pub industry: Option<String>,
    pub coverage_percent: u32,
    pub total_keywords: u32,
    pub full_matches: u32,
    pub partial_matches: u32,
    pub keywords: Vec<KeywordMatch>,
    /// Must-have keywords with no full match, in list order.
    pub missing_must_have: Vec<String>,
}

const fn kw(term: &'static str, category: KeywordCategory) -> IndustryKeyword {
    IndustryKeyword { term, category }
}

use KeywordCategory::{Certification, Methodology, MustHave, Soft, Technical};

const TECHNOLOGY: &[IndustryKeyword] = &[
    kw("software development", MustHave),
    kw("system design", MustHave),
    kw("testing", MustHave),
    kw("version control", MustHave),
    kw("Python", Technical),
    kw("Java", Technical),
    kw("JavaScript", Technical),
    kw("SQL", Technical),
    kw("REST APIs", Technical),
    kw("AWS (Amazon Web Services)", Technical),
    kw("Docker", Technical),
    kw("Kubernetes", Technical),
    kw("CI/CD (Continuous Integration)", Technical),
    kw("problem solving", Soft),
    kw("collaboration", Soft),
    kw("communication", Soft),
    kw("mentoring", Soft),
    kw("AWS Certified Solutions Architect", Certification),
    kw("CKA (Certified Kubernetes Administrator)", Certification),
    kw("Agile", Methodology),
    kw("Scrum", Methodology),
    kw("TDD (Test-Driven Development)", Methodology),
];

const HEALTHCARE: &[IndustryKeyword] = &[
    kw("patient care", MustHave),
    kw("HIPAA (Health Insurance Portability and Accountability Act)", MustHave),
    kw("clinical documentation", MustHave),
    kw("EHR (Electronic Health Records)", Technical),
    kw("Epic", Technical),
    kw("medical terminology", Technical),
    kw("care coordination", Technical),
    kw("empathy", Soft),
    kw("communication", Soft),
    kw("attention to detail", Soft),
    kw("BLS (Basic Life Support)", Certification),
    kw("RN (Registered Nurse)", Certification),
    kw("evidence-based practice", Methodology),
    kw("quality improvement", Methodology),
];

const FINANCE: &[IndustryKeyword] = &[
    kw("financial analysis", MustHave),
    kw("financial modeling", MustHave),
    kw("budgeting", MustHave),
    kw("forecasting", MustHave),
    kw("Excel", Technical),
    kw("GAAP (Generally Accepted Accounting Principles)", Technical),
    kw("variance analysis", Technical),
    kw("SQL", Technical),
    kw("risk management", Technical),
    kw("attention to detail", Soft),
    kw("stakeholder management", Soft),
    kw("CPA (Certified Public Accountant)", Certification),
    kw("CFA (Chartered Financial Analyst)", Certification),
    kw("SOX (Sarbanes-Oxley)", Methodology),
];

const MARKETING: &[IndustryKeyword] = &[
    kw("campaign management", MustHave),
    kw("brand strategy", MustHave),
    kw("content strategy", MustHave),
    kw("SEO (Search Engine Optimization)", Technical),
    kw("SEM (Search Engine Marketing)", Technical),
    kw("Google Analytics", Technical),
    kw("CRM (Customer Relationship Management)", Technical),
    kw("A/B testing", Technical),
    kw("marketing automation", Technical),
    kw("creativity", Soft),
    kw("storytelling", Soft),
    kw("collaboration", Soft),
    kw("Google Ads Certification", Certification),
    kw("HubSpot Inbound Certification", Certification),
    kw("growth marketing", Methodology),
    kw("Agile", Methodology),
];

const SALES: &[IndustryKeyword] = &[
    kw("pipeline management", MustHave),
    kw("quota attainment", MustHave),
    kw("prospecting", MustHave),
    kw("Salesforce", Technical),
    kw("CRM (Customer Relationship Management)", Technical),
    kw("forecasting", Technical),
    kw("negotiation", Soft),
    kw("relationship building", Soft),
    kw("communication", Soft),
    kw("CSP (Certified Sales Professional)", Certification),
    kw("MEDDIC", Methodology),
    kw("solution selling", Methodology),
];

const PROJECT_MANAGEMENT: &[IndustryKeyword] = &[
    kw("project planning", MustHave),
    kw("stakeholder management", MustHave),
    kw("risk management", MustHave),
    kw("budget management", MustHave),
    kw("Jira", Technical),
    kw("Microsoft Project", Technical),
    kw("resource allocation", Technical),
    kw("leadership", Soft),
    kw("communication", Soft),
    kw("conflict resolution", Soft),
    kw("PMP (Project Management Professional)", Certification),
    kw("CSM (Certified ScrumMaster)", Certification),
    kw("Agile", Methodology),
    kw("Waterfall", Methodology),
    kw("Scrum", Methodology),
];

pub const INDUSTRIES: &[IndustryProfile] = &[
    IndustryProfile {
        name: "technology",
        aliases: &["tech", "software", "it", "information technology", "engineering"],
        keywords: TECHNOLOGY,
    },
    IndustryProfile {
        name: "healthcare",
        aliases: &["health", "medical", "nursing", "health care"],
        keywords: HEALTHCARE,
    },
    IndustryProfile {
        name: "finance",
        aliases: &["financial services", "accounting", "banking"],
        keywords: FINANCE,
    },
    IndustryProfile {
        name: "marketing",
        aliases: &["digital marketing", "advertising"],
        keywords: MARKETING,
    },
    IndustryProfile {
        name: "sales",
        aliases: &["business development"],
        keywords: SALES,
    },
    IndustryProfile {
        name: "project management",
        aliases: &["project_management", "program management", "pm"],
        keywords: PROJECT_MANAGEMENT,
    },
];

/// Resolves an industry by name or alias, case-insensitively.
pub fn find_industry(name: &str) -> Option<&'static IndustryProfile> {
    let needle = normalize_whitespace(&name.to_lowercase());
    INDUSTRIES
        .iter()
        .find(|p| p.name == needle || p.aliases.contains(&needle.as_str()))
}

/// Coverage of a resume against a named industry. `None` when the industry is unknown.
pub fn analyze_industry_coverage(text: &str, industry: &str) -> Option<CoverageReport> {
    let profile = find_industry(industry)?;
    let mut report = coverage_for_keywords(text, profile.keywords);
    report.industry = Some(profile.name.to_string());
    Some(report)
}

/// Coverage of a resume against any keyword set.
pub fn coverage_for_keywords(text: &str, keywords: &[IndustryKeyword]) -> CoverageReport {
    let normalized = normalize_whitespace(text);

    let keywords: Vec<KeywordMatch> = keywords
        .iter()
        .map(|k| KeywordMatch {
            keyword: k.term.to_string(),
            category: k.category,
            status: classify_normalized(&normalized, k.term),
        })
        .collect();

    let total_keywords = keywords.len() as u32;
    let full_matches = count_status(&keywords, MatchStatus::Full);
    let partial_matches = count_status(&keywords, MatchStatus::Partial);
    let missing_must_have = keywords
        .iter()
        .filter(|k| k.category == KeywordCategory::MustHave && k.status != MatchStatus::Full)
        .map(|k| k.keyword.clone())
        .collect();

    CoverageReport {
        industry: None,
        coverage_percent: coverage_percent(full_matches, total_keywords),
        total_keywords,
        full_matches,
        partial_matches,
        keywords,
        missing_must_have,
    }
}

/// `round(100 * matched / total)`; 0 for an empty set.
pub fn coverage_percent(matched: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * matched as f64 / total as f64).round() as u32
}

/// Classifies one keyword against free text. Whitespace runs and line
/// breaks in `text` are treated as single spaces.
pub fn match_keyword(text: &str, keyword: &str) -> MatchStatus {
    classify_normalized(&normalize_whitespace(text), keyword)
}

/// `match_keyword` for text that is already whitespace-normalized.
fn classify_normalized(text: &str, keyword: &str) -> MatchStatus {
    if contains_phrase(text, keyword, false) {
        return MatchStatus::Full;
    }

    match split_abbreviation(keyword) {
        Some((abbreviation, expansion)) => {
            if contains_phrase(text, expansion, false) {
                MatchStatus::Full
            } else if contains_phrase(text, abbreviation, is_acronym(abbreviation)) {
                MatchStatus::Partial
            } else {
                MatchStatus::Missing
            }
        }
        None => MatchStatus::Missing,
    }
}

/// Splits `ABBR (Expanded Form)` or `Expanded Form (ABBR)` into
/// `(abbreviation, expansion)`; the shorter side is the abbreviation.
fn split_abbreviation(keyword: &str) -> Option<(&str, &str)> {
    let open = keyword.find('(')?;
    let inner = keyword[open + 1..].strip_suffix(')')?.trim();
    let outer = keyword[..open].trim();
    if inner.is_empty() || outer.is_empty() {
        return None;
    }
    if outer.len() <= inner.len() {
        Some((outer, inner))
    } else {
        Some((inner, outer))
    }
}

fn is_acronym(term: &str) -> bool {
    term.chars().any(|c| c.is_ascii_alphabetic())
        && term
            .chars()
            .all(|c| !c.is_ascii_alphabetic() || c.is_ascii_uppercase())
}

/// Phrase search with alphanumeric boundaries, so "Java" does not match
/// "JavaScript" and "C++" or "CI/CD" still match next to punctuation.
fn contains_phrase(text: &str, phrase: &str, case_sensitive: bool) -> bool {
    let phrase = normalize_whitespace(phrase);
    if phrase.is_empty() {
        return false;
    }
    let (haystack, needle) = if case_sensitive {
        (text.to_string(), phrase)
    } else {
        (text.to_lowercase(), phrase.to_lowercase())
    };

    let mut start = 0;
    while let Some(pos) = haystack[start..].find(&needle) {
        let begin = start + pos;
        let end = begin + needle.len();
        let before_ok = haystack[..begin]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        if before_ok && after_ok {
            return true;
        }
        start = begin + needle.chars().next().map_or(1, char::len_utf8);
    }
    false
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn count_status(keywords: &[KeywordMatch], status: MatchStatus) -> u32 {
    keywords.iter().filter(|k| k.status == status).count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    const PMP: &str = "PMP (Project Management Professional)";

    #[test]
    fn test_abbreviation_only_is_partial() {
        assert_eq!(match_keyword("Certified PMP since 2019", PMP), MatchStatus::Partial);
    }

    #[test]
    fn test_expanded_form_is_full() {
        assert_eq!(
            match_keyword("Earned the Project Management Professional credential", PMP),
            MatchStatus::Full
        );
    }

    #[test]
    fn test_neither_is_missing() {
        assert_eq!(match_keyword("Led sprint planning", PMP), MatchStatus::Missing);
    }

    #[test]
    fn test_whole_literal_is_full() {
        assert_eq!(
            match_keyword("PMP (Project Management Professional), 2021", PMP),
            MatchStatus::Full
        );
    }

    #[test]
    fn test_expansion_first_form_supported() {
        let kw = "Search Engine Optimization (SEO)";
        assert_eq!(match_keyword("Owned SEO roadmap", kw), MatchStatus::Partial);
        assert_eq!(
            match_keyword("search engine optimization audits", kw),
            MatchStatus::Full
        );
    }

    #[test]
    fn test_acronym_match_is_case_sensitive() {
        // "rn" in lowercase prose must not count as the RN credential.
        assert_eq!(
            match_keyword("learn to turn rn around", "RN (Registered Nurse)"),
            MatchStatus::Missing
        );
    }

    #[test]
    fn test_plain_keyword_respects_boundaries() {
        assert_eq!(match_keyword("Built JavaScript apps", "Java"), MatchStatus::Missing);
        assert_eq!(match_keyword("Built Java services", "Java"), MatchStatus::Full);
        assert_eq!(match_keyword("Owned the CI/CD pipeline", "CI/CD"), MatchStatus::Full);
    }

    #[test]
    fn test_whitespace_insensitive_phrase() {
        assert_eq!(
            match_keyword("strong   problem\nsolving skills", "problem solving"),
            MatchStatus::Full
        );
        assert_eq!(
            match_keyword("Project\n  Management   Professional", PMP),
            MatchStatus::Full
        );
    }

    #[test]
    fn test_direct_match_agrees_with_coverage() {
        let text = "strong   problem\nsolving skills";
        let keywords = [kw("problem solving", Soft)];
        let report = coverage_for_keywords(text, &keywords);
        assert_eq!(report.keywords[0].status, match_keyword(text, "problem solving"));
        assert_eq!(report.full_matches, 1);
    }

    #[test]
    fn test_coverage_is_rounded_ratio_of_full_matches() {
        let keywords = [
            kw("Python", Technical),
            kw("SQL", Technical),
            kw("PMP (Project Management Professional)", Certification),
        ];
        let report = coverage_for_keywords("Python and PMP", &keywords);
        assert_eq!(report.total_keywords, 3);
        assert_eq!(report.full_matches, 1);
        assert_eq!(report.partial_matches, 1);
        assert_eq!(report.coverage_percent, coverage_percent(1, 3));
        assert_eq!(report.coverage_percent, 33);
    }

    #[test]
    fn test_coverage_percent_formula() {
        for total in 1..=30u32 {
            for matched in 0..=total {
                let expected = (100.0 * matched as f64 / total as f64).round() as u32;
                assert_eq!(coverage_percent(matched, total), expected);
            }
        }
        assert_eq!(coverage_percent(0, 0), 0);
        assert_eq!(coverage_percent(2, 3), 67);
    }

    #[test]
    fn test_missing_must_have_reported() {
        let report = analyze_industry_coverage("Python developer", "technology").unwrap();
        assert!(report.missing_must_have.contains(&"system design".to_string()));
        assert_eq!(report.industry.as_deref(), Some("technology"));
    }

    #[test]
    fn test_industry_aliases_and_unknown() {
        assert_eq!(find_industry("Tech").unwrap().name, "technology");
        assert_eq!(find_industry("  Project   Management ").unwrap().name, "project management");
        assert!(analyze_industry_coverage("anything", "underwater basket weaving").is_none());
    }

    #[test]
    fn test_every_industry_has_must_haves() {
        for profile in INDUSTRIES {
            assert!(
                profile
                    .keywords
                    .iter()
                    .any(|k| k.category == KeywordCategory::MustHave),
                "{} has no must-have keywords",
                profile.name
            );
        }
    }
}
