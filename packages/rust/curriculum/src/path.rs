//! Learning-path synthesis over a validated section list.
//!
//! Each section gets an estimated duration share, a heuristic complexity
//! weight, templated learning objectives, and extracted key skills. The
//! path is strictly linear: every section's only prerequisite is its
//! immediate predecessor.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use coursecraft_shared::{CourseInfo, LearningPath, LearningPathItem, Section};

// ---------------------------------------------------------------------------
// Heuristic tables
// ---------------------------------------------------------------------------

/// Title keywords that raise the complexity estimate.
const COMPLEX_KEYWORDS: &[&str] = &[
    "応用",
    "実装",
    "開発",
    "プロジェクト",
    "統合",
    "最適化",
    "デバッグ",
];

/// Title keywords that lower the complexity estimate.
const SIMPLE_KEYWORDS: &[&str] = &["入門", "基礎", "概要", "紹介", "理解"];

/// Latin technical terms: one word, or two joined by whitespace.
static LATIN_TERM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]+(?:\s+[A-Za-z]+)?").expect("latin term regex"));

/// CJK technical terms ending in a skill-ish suffix.
static CJK_TERM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[ぁ-んァ-ヶー一-龯]{2,}(?:技術|スキル|手法|方法)").expect("cjk term regex")
});

/// At most this many key skills per section.
const MAX_KEY_SKILLS: usize = 3;

// ---------------------------------------------------------------------------
// Synthesis
// ---------------------------------------------------------------------------

/// Synthesize the learning path for a parsed section list.
///
/// The course's effective duration is split evenly as a base share, then
/// each share is scaled by `0.5 + complexity`. The adjusted durations
/// are not renormalized back to the requested total, so the aggregate
/// drifts with complexity — accepted for a planning estimate.
pub fn synthesize(sections: &[Section], course: &CourseInfo) -> LearningPath {
    let total_duration = course.effective_duration();
    let base_duration = total_duration / sections.len().max(1) as u32;

    let mut items = Vec::with_capacity(sections.len());
    let mut estimated_total_duration = 0u32;

    for (i, section) in sections.iter().enumerate() {
        // Strictly sequential curriculum: the previous section is the
        // only prerequisite.
        let prerequisites = if i > 0 {
            vec![sections[i - 1].id.clone()]
        } else {
            Vec::new()
        };

        let complexity = section_complexity(section);
        let duration = (base_duration as f64 * (0.5 + complexity)).floor() as u32;
        estimated_total_duration += duration;

        items.push(LearningPathItem {
            section_id: section.id.clone(),
            title: section.title.clone(),
            duration,
            complexity,
            prerequisites,
            learning_objectives: learning_objectives(&section.title),
            key_skills: key_skills(&section.title),
        });
    }

    debug!(
        sections = sections.len(),
        base_duration, estimated_total_duration, "learning path synthesized"
    );

    LearningPath {
        total_sections: sections.len(),
        estimated_total_duration,
        items,
    }
}

// ---------------------------------------------------------------------------
// Per-section heuristics
// ---------------------------------------------------------------------------

/// Heuristic complexity in `[0.1, 1.0]`: keyword hits shift a 0.5
/// baseline, and subsection count adds up to 0.3.
fn section_complexity(section: &Section) -> f64 {
    let title = section.title.to_lowercase();
    let mut complexity: f64 = 0.5;

    if COMPLEX_KEYWORDS.iter().any(|k| title.contains(k)) {
        complexity += 0.3;
    }
    if SIMPLE_KEYWORDS.iter().any(|k| title.contains(k)) {
        complexity -= 0.2;
    }

    complexity += (section.subsections.len() as f64 * 0.1).min(0.3);

    complexity.clamp(0.1, 1.0)
}

/// Two templated objectives, flavored by the keyword family the title
/// falls into (intro → comprehension, practice → doing, advanced →
/// application, otherwise generic).
fn learning_objectives(title: &str) -> Vec<String> {
    if title.contains("入門") || title.contains("基礎") {
        vec![
            format!("{title}の基本概念を理解する"),
            format!("{title}の重要なポイントを説明できる"),
        ]
    } else if title.contains("実践") || title.contains("演習") {
        vec![
            format!("{title}を実際に行うことができる"),
            format!("{title}における問題を解決できる"),
        ]
    } else if title.contains("応用") {
        vec![
            format!("{title}を実務で活用できる"),
            format!("{title}の発展的な内容を理解する"),
        ]
    } else {
        vec![
            format!("{title}について説明できる"),
            format!("{title}を適切に活用できる"),
        ]
    }
}

/// Extract up to three technical terms from the title, preserving
/// first-seen order so repeated runs yield identical output. Falls back
/// to a generic knowledge skill when nothing matches.
fn key_skills(title: &str) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();

    for m in LATIN_TERM_RE
        .find_iter(title)
        .chain(CJK_TERM_RE.find_iter(title))
    {
        let term = m.as_str().to_string();
        if !skills.contains(&term) {
            skills.push(term);
        }
    }

    skills.truncate(MAX_KEY_SKILLS);

    if skills.is_empty() {
        skills.push(format!("{title}に関する知識"));
    }

    skills
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
