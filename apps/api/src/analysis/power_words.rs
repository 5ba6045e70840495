//! Power-words analyzer: flags weak, passive phrasing and suggests strong verbs.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Points removed per weak-phrase occurrence.
const PENALTY_PER_OCCURRENCE: u32 = 5;

/// Weak phrase → strong-verb replacements.
const WEAK_PHRASES: &[(&str, &[&str])] = &[
    ("responsible for", &["Led", "Managed", "Owned", "Directed"]),
    ("duties included", &["Delivered", "Executed", "Performed"]),
    ("in charge of", &["Led", "Headed", "Oversaw"]),
    ("tasked with", &["Delivered", "Executed", "Drove"]),
    ("helped with", &["Supported", "Enabled", "Accelerated"]),
    ("helped", &["Enabled", "Facilitated", "Advanced"]),
    ("assisted with", &["Supported", "Coordinated", "Enabled"]),
    ("assisted", &["Supported", "Partnered with", "Coordinated"]),
    ("worked on", &["Built", "Developed", "Engineered", "Delivered"]),
    ("participated in", &["Contributed to", "Collaborated on", "Drove"]),
    ("involved in", &["Contributed to", "Shaped", "Drove"]),
    ("was part of", &["Collaborated on", "Contributed to"]),
    ("dealt with", &["Resolved", "Handled", "Managed"]),
    ("handled", &["Managed", "Resolved", "Administered"]),
    ("tried to", &["Initiated", "Pursued", "Piloted"]),
    ("familiar with", &["Proficient in", "Experienced with"]),
    ("various", &["(name the specific items)"]),
    ("etc", &["(list the concrete examples)"]),
];

/// One alternation, longest phrase first, so "helped with" wins over "helped".
static WEAK_PHRASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let mut phrases: Vec<&str> = WEAK_PHRASES.iter().map(|(p, _)| *p).collect();
    phrases.sort_by(|a, b| b.len().cmp(&a.len()));
    let alternation = phrases
        .iter()
        .map(|p| regex::escape(p).replace(' ', r"\s+"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).expect("weak phrase pattern is valid")
});

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// How much weak language a text carries. Drives the merge penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeakWordLevel {
    None,
    Low,
    Moderate,
    High,
}

impl WeakWordLevel {
    pub fn from_count(count: u32) -> Self {
        match count {
            0 => WeakWordLevel::None,
            1 => WeakWordLevel::Low,
            2..=4 => WeakWordLevel::Moderate,
            _ => WeakWordLevel::High,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeakPhraseHit {
    pub phrase: String,
    pub count: u32,
    pub replacements: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerWordsReport {
    /// 0 – 100, lower means weaker language.
    pub score: u32,
    pub weak_phrase_count: u32,
    pub level: WeakWordLevel,
    /// Sorted by count descending, then phrase.
    pub weak_phrases: Vec<WeakPhraseHit>,
}

/// Scans text for weak phrases and scores it.
pub fn analyze_power_words(text: &str) -> PowerWordsReport {
    let mut counts: BTreeMap<String, u32> = BTreeMap::new();
    for m in WEAK_PHRASE_RE.find_iter(text) {
        let phrase = WHITESPACE_RE
            .replace_all(&m.as_str().to_lowercase(), " ")
            .into_owned();
        *counts.entry(phrase).or_insert(0) += 1;
    }

    let weak_phrase_count: u32 = counts.values().sum();
    let score = 100u32.saturating_sub(weak_phrase_count.saturating_mul(PENALTY_PER_OCCURRENCE));

    let mut weak_phrases: Vec<WeakPhraseHit> = counts
        .into_iter()
        .map(|(phrase, count)| WeakPhraseHit {
            replacements: replacements_for(&phrase),
            phrase,
            count,
        })
        .collect();
    weak_phrases.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.phrase.cmp(&b.phrase)));

    PowerWordsReport {
        score,
        weak_phrase_count,
        level: WeakWordLevel::from_count(weak_phrase_count),
        weak_phrases,
    }
}

/// Strong-verb replacements for a weak phrase (case-insensitive).
pub fn replacements_for(phrase: &str) -> Vec<String> {
    let phrase = phrase.to_lowercase();
    WEAK_PHRASES
        .iter()
        .find(|(p, _)| *p == phrase)
        .map(|(_, verbs)| verbs.iter().map(|v| v.to_string()).collect())
        .unwrap_or_default()
}
