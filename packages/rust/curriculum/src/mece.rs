//! MECE structure validation for parsed curricula.
//!
//! Scores a section list against four curriculum-design criteria:
//! mutual exclusivity (pairwise title similarity), coverage of the
//! course-title keywords, logical ordering, and theory/practice balance.
//! The combined score is normalized to `[0, 100]`.
//!
//! All keyword tables are immutable module data; the validator keeps no
//! state between calls.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use coursecraft_shared::{Section, ValidationResult};

// ---------------------------------------------------------------------------
// Scoring policy
// ---------------------------------------------------------------------------

/// Pairwise title similarity above this records an overlap issue.
const OVERLAP_THRESHOLD: f64 = 0.7;

/// Exclusivity deduction per recorded overlap issue.
const OVERLAP_PENALTY: f64 = 0.1;

/// Sub-score weights: exclusivity, coverage, flow, balance.
const EXCLUSIVITY_WEIGHT: f64 = 0.3;
const COVERAGE_WEIGHT: f64 = 0.3;
const FLOW_WEIGHT: f64 = 0.2;
const BALANCE_WEIGHT: f64 = 0.2;

/// Scores below this get the fixed improvement suggestions appended.
const SUGGESTION_THRESHOLD: f64 = 80.0;

/// Particles and level-words excluded from keyword extraction.
const STOP_WORDS: &[&str] = &[
    "の", "に", "は", "を", "が", "と", "で", "から", "まで", "より", "への", "による", "入門",
    "基礎", "応用", "実践",
];

/// Titles matching any of these count as theory-flavored.
const THEORY_KEYWORDS: &[&str] = &["理論", "概念", "定義", "原理", "基礎知識", "背景", "歴史"];

/// Titles matching any of these count as practice-flavored.
const PRACTICE_KEYWORDS: &[&str] = &[
    "実践",
    "演習",
    "ハンズオン",
    "プロジェクト",
    "事例",
    "ケーススタディ",
    "実装",
    "開発",
];

/// Fixed improvement suggestions shown for low-scoring structures.
const IMPROVEMENT_SUGGESTIONS: &[&str] = &[
    "セクション間の重複を減らし、相互排他性を高めてください",
    "講座目標に対する網羅性を向上させてください",
    "学習者にとって自然な順序で構成してください",
    "理論と実践のバランスを調整してください",
];

/// Matches keyword runs, split at script boundaries so that particle
/// and level-word stop words stay separable from the nouns around them
/// (`Python入門の基礎` → `Python` / `入門` / `の` / `基礎`).
static KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9]+|[ぁ-ん]+|[ァ-ヶー]+|[一-龯]+").expect("keyword regex")
});

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a parsed section list against MECE criteria.
///
/// Never fails: degenerate input produces a valid-but-low result. An
/// empty section list scores 0. The validity flag is informational and
/// stays `true` under current policy.
pub fn validate(sections: &[Section], course_title: &str) -> ValidationResult {
    // 1. Mutual exclusivity: flag every overlapping title pair.
    let mut issues = Vec::new();
    for (i, a) in sections.iter().enumerate() {
        for b in &sections[i + 1..] {
            let similarity = title_similarity(&a.title, &b.title);
            if similarity > OVERLAP_THRESHOLD {
                issues.push(format!(
                    "セクション{}と{}に内容の重複があります",
                    a.number, b.number
                ));
            }
        }
    }

    let mece_score = if sections.is_empty() {
        // Nothing was parsed; the structure covers nothing.
        0.0
    } else {
        // The exclusivity term is intentionally unclamped: enough
        // overlapping pairs can drive it negative and drag the total
        // down harder than the floored terms. Only the final score is
        // bounded.
        let exclusivity = 1.0 - issues.len() as f64 * OVERLAP_PENALTY;

        // 2. Coverage: course-title keywords found across section titles.
        let course_keywords = extract_keywords(course_title);
        let covered: HashSet<String> = sections
            .iter()
            .flat_map(|s| extract_keywords(&s.title))
            .collect();
        let coverage = course_keywords.intersection(&covered).count() as f64
            / course_keywords.len().max(1) as f64;

        // 3. Logical ordering heuristics.
        let flow = logical_flow_score(sections);

        // 4. Theory/practice balance.
        let balance = practical_balance_score(sections);

        debug!(exclusivity, coverage, flow, balance, "MECE sub-scores");

        let raw = (exclusivity * EXCLUSIVITY_WEIGHT
            + coverage * COVERAGE_WEIGHT
            + flow * FLOW_WEIGHT
            + balance * BALANCE_WEIGHT)
            * 100.0;
        raw.clamp(0.0, 100.0)
    };

    let mut suggestions = Vec::new();
    if mece_score < SUGGESTION_THRESHOLD {
        suggestions.extend(IMPROVEMENT_SUGGESTIONS.iter().map(|s| s.to_string()));
    }

    ValidationResult {
        is_valid: true,
        issues,
        suggestions,
        mece_score,
    }
}

// ---------------------------------------------------------------------------
// Sub-scores
// ---------------------------------------------------------------------------

/// Jaccard similarity of two titles' lowercased word sets.
///
/// Japanese titles without spaces tokenize to a single word each, so
/// only identical (or shared-word) titles register as similar — a
/// deliberate, cheap approximation.
fn title_similarity(a: &str, b: &str) -> f64 {
    let words_a: HashSet<String> = a.to_lowercase().split_whitespace().map(String::from).collect();
    let words_b: HashSet<String> = b.to_lowercase().split_whitespace().map(String::from).collect();

    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }

    let intersection = words_a.intersection(&words_b).count();
    let union = words_a.union(&words_b).count();

    intersection as f64 / union as f64
}

/// Extract the keyword set from a title: kana/kanji/alphanumeric runs,
/// lowercased, longer than one character, minus stop words.
fn extract_keywords(text: &str) -> HashSet<String> {
    KEYWORD_RE
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .filter(|word| word.chars().count() > 1 && !STOP_WORDS.contains(&word.as_str()))
        .collect()
}

/// Ordering heuristics: start from 0.8, deduct for a summary section
/// that is not at the end, and for basics immediately following
/// advanced/practice material.
fn logical_flow_score(sections: &[Section]) -> f64 {
    let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
    let mut score: f64 = 0.8;

    for i in 0..titles.len().saturating_sub(1) {
        let title = titles[i];
        let next = titles[i + 1];

        if (title.contains("まとめ") || title.contains("総括")) && i + 2 < titles.len() {
            score -= 0.2;
        }
        if (next.contains("入門") || next.contains("基礎"))
            && (title.contains("応用") || title.contains("実践"))
        {
            score -= 0.2;
        }
    }

    score.max(0.0)
}

/// Balance score against the ideal 40% theory / 60% practice split.
/// Classification is non-exclusive: a title can match both or neither.
fn practical_balance_score(sections: &[Section]) -> f64 {
    let total = sections.len();
    if total == 0 {
        return 0.0;
    }

    let mut theory_count = 0usize;
    let mut practice_count = 0usize;

    for section in sections {
        let title = section.title.to_lowercase();
        if THEORY_KEYWORDS.iter().any(|k| title.contains(k)) {
            theory_count += 1;
        }
        if PRACTICE_KEYWORDS.iter().any(|k| title.contains(k)) {
            practice_count += 1;
        }
    }

    let theory_ratio = theory_count as f64 / total as f64;
    let practice_ratio = practice_count as f64 / total as f64;

    let score = 1.0 - ((theory_ratio - 0.4).abs() + (practice_ratio - 0.6).abs()) / 2.0;
    score.max(0.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
