//! Static job-title taxonomy: canonical titles, aliases and typical skills.
//! Read-only reference data used to seed resume example generation.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct JobTitle {
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub category: &'static str,
    pub typical_skills: &'static [&'static str],
}

/// Seniority words ignored when an exact title lookup fails.
const SENIORITY_WORDS: &[&str] = &[
    "senior", "sr", "junior", "jr", "lead", "principal", "staff", "associate", "entry", "level",
    "head", "chief", "i", "ii", "iii",
];

pub const JOB_TITLES: &[JobTitle] = &[
    JobTitle {
        canonical: "Software Engineer",
        aliases: &["software developer", "swe", "programmer", "developer", "backend engineer", "application developer"],
        category: "technology",
        typical_skills: &["Python", "Java", "system design", "REST APIs", "SQL", "Git", "unit testing", "CI/CD"],
    },
    JobTitle {
        canonical: "Frontend Engineer",
        aliases: &["front end developer", "frontend developer", "ui engineer", "web developer"],
        category: "technology",
        typical_skills: &["JavaScript", "TypeScript", "React", "CSS", "accessibility", "web performance"],
    },
    JobTitle {
        canonical: "Data Scientist",
        aliases: &["ml scientist", "machine learning scientist", "applied scientist"],
        category: "technology",
        typical_skills: &["Python", "statistics", "machine learning", "SQL", "A/B testing", "pandas", "experiment design"],
    },
    JobTitle {
        canonical: "Data Analyst",
        aliases: &["business intelligence analyst", "bi analyst", "reporting analyst", "analytics specialist"],
        category: "technology",
        typical_skills: &["SQL", "Excel", "Tableau", "data visualization", "stakeholder reporting", "Python"],
    },
    JobTitle {
        canonical: "DevOps Engineer",
        aliases: &["site reliability engineer", "sre", "platform engineer", "infrastructure engineer"],
        category: "technology",
        typical_skills: &["AWS", "Kubernetes", "Terraform", "CI/CD", "monitoring", "Linux", "incident response"],
    },
    JobTitle {
        canonical: "Product Manager",
        aliases: &["pm", "product owner", "technical product manager", "tpm"],
        category: "product",
        typical_skills: &["roadmapping", "user research", "prioritization", "stakeholder management", "A/B testing", "Jira"],
    },
    JobTitle {
        canonical: "Project Manager",
        aliases: &["program manager", "delivery manager", "project coordinator"],
        category: "project management",
        typical_skills: &["project planning", "risk management", "budget management", "Agile", "Scrum", "PMP"],
    },
    JobTitle {
        canonical: "UX Designer",
        aliases: &["product designer", "ui/ux designer", "ux/ui designer", "interaction designer"],
        category: "design",
        typical_skills: &["Figma", "user research", "wireframing", "prototyping", "usability testing", "design systems"],
    },
    JobTitle {
        canonical: "Registered Nurse",
        aliases: &["rn", "staff nurse", "clinical nurse", "nurse"],
        category: "healthcare",
        typical_skills: &["patient care", "EHR", "medication administration", "care coordination", "BLS", "HIPAA"],
    },
    JobTitle {
        canonical: "Medical Assistant",
        aliases: &["clinical assistant", "certified medical assistant", "cma"],
        category: "healthcare",
        typical_skills: &["vital signs", "patient intake", "EHR", "phlebotomy", "scheduling", "HIPAA"],
    },
    JobTitle {
        canonical: "Financial Analyst",
        aliases: &["fp&a analyst", "finance analyst", "investment analyst"],
        category: "finance",
        typical_skills: &["financial modeling", "forecasting", "Excel", "variance analysis", "budgeting", "SQL"],
    },
    JobTitle {
        canonical: "Accountant",
        aliases: &["staff accountant", "cpa", "general ledger accountant", "bookkeeper"],
        category: "finance",
        typical_skills: &["GAAP", "reconciliations", "month-end close", "accounts payable", "QuickBooks", "Excel"],
    },
    JobTitle {
        canonical: "Marketing Manager",
        aliases: &["digital marketing manager", "growth marketer", "marketing specialist", "brand manager"],
        category: "marketing",
        typical_skills: &["campaign management", "SEO", "Google Analytics", "content strategy", "marketing automation", "budget management"],
    },
    JobTitle {
        canonical: "Sales Representative",
        aliases: &["account executive", "ae", "sales associate", "business development representative", "bdr", "sdr"],
        category: "sales",
        typical_skills: &["prospecting", "pipeline management", "Salesforce", "negotiation", "quota attainment", "cold calling"],
    },
    JobTitle {
        canonical: "Customer Success Manager",
        aliases: &["csm", "account manager", "client success manager"],
        category: "sales",
        typical_skills: &["onboarding", "retention", "renewals", "CRM", "stakeholder management", "upselling"],
    },
    JobTitle {
        canonical: "Teacher",
        aliases: &["educator", "classroom teacher", "high school teacher", "elementary teacher"],
        category: "education",
        typical_skills: &["lesson planning", "classroom management", "differentiated instruction", "assessment", "parent communication"],
    },
];

/// Lowercases and turns punctuation runs into single spaces. Keeps `&` and `/`
/// so "FP&A" and "UI/UX" survive.
pub fn normalize_title(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '&' || c == '/' { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_seniority(normalized: &str) -> String {
    normalized
        .split(' ')
        .filter(|w| !SENIORITY_WORDS.contains(w))
        .collect::<Vec<_>>()
        .join(" ")
}

fn matches_exactly(entry: &JobTitle, normalized: &str) -> bool {
    normalize_title(entry.canonical) == normalized
        || entry.aliases.iter().any(|a| normalize_title(a) == normalized)
}

/// Finds the taxonomy entry for a title or alias. Seniority prefixes are
/// ignored when there is no exact match ("Senior SWE" → Software Engineer).
pub fn lookup(title: &str) -> Option<&'static JobTitle> {
    let normalized = normalize_title(title);
    if normalized.is_empty() {
        return None;
    }
    JOB_TITLES
        .iter()
        .find(|entry| matches_exactly(entry, &normalized))
        .or_else(|| {
            let stripped = strip_seniority(&normalized);
            if stripped.is_empty() || stripped == normalized {
                return None;
            }
            JOB_TITLES.iter().find(|entry| matches_exactly(entry, &stripped))
        })
}

/// Autocomplete: entries whose canonical title or an alias contains `query`.
/// Canonical-prefix matches sort first.
pub fn suggest(query: &str, limit: usize) -> Vec<&'static JobTitle> {
    let needle = normalize_title(query);
    if needle.is_empty() {
        return JOB_TITLES.iter().take(limit).collect();
    }

    let mut hits: Vec<(u8, &'static JobTitle)> = JOB_TITLES
        .iter()
        .filter_map(|entry| {
            let canonical = normalize_title(entry.canonical);
            if canonical.starts_with(&needle) {
                Some((0, entry))
            } else if canonical.contains(&needle) {
                Some((1, entry))
            } else if entry.aliases.iter().any(|a| normalize_title(a).contains(&needle)) {
                Some((2, entry))
            } else {
                None
            }
        })
        .collect();
    hits.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.canonical.cmp(b.1.canonical)));
    hits.into_iter().take(limit).map(|(_, entry)| entry).collect()
}
