//! Quantification analyzer: detects measurable impact (percentages, money,
//! volumes, scale, rankings) in resume text.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Metric categories, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MetricType {
    #[serde(rename = "Percentages")]
    Percentages,
    #[serde(rename = "Dollar amounts")]
    DollarAmounts,
    #[serde(rename = "Large numbers")]
    LargeNumbers,
    #[serde(rename = "Scale indicators")]
    ScaleIndicators,
    #[serde(rename = "Rankings")]
    Rankings,
}

static PERCENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+(?:\.\d+)?\s?(?:%|percent\b)").expect("percent pattern is valid")
});

static CURRENCY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[$€£]\s?\d[\d,]*(?:\.\d+)?(?:\s?(?:k|m|mm|b|thousand|million|billion)\b)?")
        .expect("currency pattern is valid")
});

static LARGE_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        \b\d{1,3}(?:,\d{3})+\b                                  # 12,000
        | \b\d{4,}\b                                            # 12000 (years filtered later)
        | \b\d+(?:\.\d+)?\s?(?:k|m|mm|b)\b                      # 10k, 2.5M
        | \b\d+(?:\.\d+)?\s(?:thousand|million|billion)\b       # 3 million
        ",
    )
    .expect("large number pattern is valid")
});

static SCALE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        \b(?:team|group|staff|portfolio|department|organization)\s+of\s+\d+\b
        | \b\d+\+?\s+(?:engineers|developers|designers|people|employees|clients|customers|users
            |members|direct\s+reports|reports|stakeholders|countries|regions|offices|stores
            |locations|sites|projects|accounts|students|patients|vendors|partners)\b
        | \bacross\s+\d+\b
        ",
    )
    .expect("scale pattern is valid")
});

static RANKING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        \btop\s+\d+(?:\s?%)?
        | \#\s?\d+\b
        | \branked\s+(?:\#\s?)?\d+(?:st|nd|rd|th)?\b
        | \b\d+(?:st|nd|rd|th)\s+(?:place|out\s+of)\b
        | \bnumber\s+one\b
        ",
    )
    .expect("ranking pattern is valid")
});

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantificationReport {
    pub has_metrics: bool,
    pub metric_types: Vec<MetricType>,
    /// Total pattern hits across all metric types.
    pub metric_count: u32,
    /// 0 – 100.
    pub score: u32,
    /// Up to a handful of matched snippets, for display.
    pub examples: Vec<String>,
}

const MAX_EXAMPLES: usize = 5;

/// Scans text for quantified achievements.
pub fn analyze_quantification(text: &str) -> QuantificationReport {
    let mut metric_types = Vec::new();
    let mut metric_count = 0u32;
    let mut examples = Vec::new();

    let scans: [(MetricType, Vec<&str>); 5] = [
        (MetricType::Percentages, matches(&PERCENT_RE, text)),
        (MetricType::DollarAmounts, matches(&CURRENCY_RE, text)),
        (
            MetricType::LargeNumbers,
            matches(&LARGE_NUMBER_RE, text)
                .into_iter()
                .filter(|m| !looks_like_year(m))
                .collect(),
        ),
        (MetricType::ScaleIndicators, matches(&SCALE_RE, text)),
        (MetricType::Rankings, matches(&RANKING_RE, text)),
    ];

    for (metric_type, hits) in scans {
        if hits.is_empty() {
            continue;
        }
        metric_types.push(metric_type);
        metric_count += hits.len() as u32;
        for hit in hits {
            if examples.len() < MAX_EXAMPLES && !examples.iter().any(|e: &String| e == hit) {
                examples.push(hit.to_string());
            }
        }
    }

    QuantificationReport {
        has_metrics: metric_count > 0,
        score: quantification_score(metric_types.len() as u32, metric_count),
        metric_types,
        metric_count,
        examples,
    }
}

fn matches<'t>(re: &Regex, text: &'t str) -> Vec<&'t str> {
    re.find_iter(text).map(|m| m.as_str().trim()).collect()
}

fn looks_like_year(candidate: &str) -> bool {
    candidate.len() == 4
        && candidate
            .parse::<u32>()
            .is_ok_and(|n| (1900..=2099).contains(&n))
}

fn quantification_score(types: u32, count: u32) -> u32 {
    if count == 0 {
        return 0;
    }
    (40 + 15 * types.saturating_sub(1) + 5 * count.saturating_sub(1)).min(100)
}
