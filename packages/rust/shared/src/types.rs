//! Core domain types for coursecraft analyses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default course duration in minutes, used when the caller supplies
/// none (or zero).
pub const DEFAULT_COURSE_DURATION_MIN: u32 = 60;

// ---------------------------------------------------------------------------
// AnalysisId
// ---------------------------------------------------------------------------

/// A UUID v7 wrapper for analysis report identifiers (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisId(pub Uuid);

impl AnalysisId {
    /// Generate a new time-sortable report identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for AnalysisId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for AnalysisId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ---------------------------------------------------------------------------
// Section tree
// ---------------------------------------------------------------------------

/// One top-level curriculum unit recognized in the outline.
///
/// `id` values (`section_1`, `section_2`, …) are assigned in parse order
/// and are stable only within a single parse run — they are never
/// persisted across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Opaque identifier, unique within one parse.
    pub id: String,
    /// Normalized label as the author wrote it (`1-1`, `2`, `A`) —
    /// not guaranteed unique or monotonic.
    pub number: String,
    /// Title text after the numbering token; may be empty.
    pub title: String,
    /// Verbatim source line, kept for diagnostics.
    pub original_line: String,
    /// 0-based offset of the line within the surviving (non-blank) lines.
    pub index: usize,
    /// Nested subsections, in source order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subsections: Vec<Subsection>,
}

/// A child entry attached to the most recently opened section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subsection {
    /// Normalized marker (`1`, `a`, `-`, …).
    pub number: String,
    /// Title text after the marker.
    pub title: String,
    /// Verbatim source line (trimmed).
    pub original_line: String,
}

/// Full product of one outline parse: the section tree plus the
/// unstructured lines that appeared before any section opened.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedOutline {
    /// Recognized sections, in source order.
    pub sections: Vec<Section>,
    /// Free-text lines seen before the first section — candidate course
    /// themes the author wrote as a preamble.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_topics: Vec<String>,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Immutable summary of the MECE structure check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Informational flag; current policy never demotes it to `false`.
    pub is_valid: bool,
    /// Human-readable findings, in detection order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,
    /// Improvement suggestions appended when the score falls below 80.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    /// Combined MECE score in `[0, 100]`.
    pub mece_score: f64,
}

// ---------------------------------------------------------------------------
// Learning path
// ---------------------------------------------------------------------------

/// One step of the synthesized learning path, derived from a [`Section`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningPathItem {
    /// Back-reference to the source section's id (not ownership).
    pub section_id: String,
    /// Section title, echoed for display.
    pub title: String,
    /// Estimated duration in minutes after complexity adjustment.
    pub duration: u32,
    /// Heuristic complexity weight in `[0.1, 1.0]`.
    pub complexity: f64,
    /// Ids of sections that must conceptually precede this one — always
    /// exactly the previous section's id (empty for the first section).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prerequisites: Vec<String>,
    /// Templated objectives interpolated with the section title.
    pub learning_objectives: Vec<String>,
    /// Up to 3 technical terms extracted from the title.
    pub key_skills: Vec<String>,
}

/// The ordered learning path plus aggregate timing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LearningPath {
    /// Number of sections the path covers.
    pub total_sections: usize,
    /// Sum of adjusted item durations. Not renormalized to the requested
    /// course duration — drift from complexity weighting is expected.
    pub estimated_total_duration: u32,
    /// Path items, one per section, in curriculum order.
    pub items: Vec<LearningPathItem>,
}

// ---------------------------------------------------------------------------
// Course metadata
// ---------------------------------------------------------------------------

/// Caller-supplied course metadata accompanying the outline text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseInfo {
    /// Course title, used for coverage scoring.
    pub title: String,
    /// Intended audience; echoed in the report, not used in scoring.
    #[serde(default = "default_target_audience")]
    pub target_audience: String,
    /// Planned total duration in minutes. `None` (or zero) falls back to
    /// [`DEFAULT_COURSE_DURATION_MIN`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    /// Speaking style; echoed in the report, not used in scoring.
    #[serde(default = "default_tone")]
    pub tone: String,
}

fn default_target_audience() -> String {
    "初心者".into()
}
fn default_tone() -> String {
    "通常".into()
}

impl CourseInfo {
    /// Create course metadata with default audience and tone.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            target_audience: default_target_audience(),
            duration: None,
            tone: default_tone(),
        }
    }

    /// Duration to plan against: the supplied value, or the 60-minute
    /// default when absent or zero.
    pub fn effective_duration(&self) -> u32 {
        match self.duration {
            Some(d) if d > 0 => d,
            _ => DEFAULT_COURSE_DURATION_MIN,
        }
    }
}

// ---------------------------------------------------------------------------
// AnalysisReport
// ---------------------------------------------------------------------------

/// The complete result of one parse + validate + synthesize run.
///
/// Created fresh per call and owned by the caller; the engine keeps no
/// state between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Unique identifier for this analysis run.
    pub id: AnalysisId,
    /// When the analysis completed.
    pub generated_at: DateTime<Utc>,
    /// Echo of the caller-supplied course metadata.
    pub course: CourseInfo,
    /// Number of sections recognized.
    pub total_sections: usize,
    /// The parsed section tree.
    pub sections: Vec<Section>,
    /// Unstructured preamble lines from the outline.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_topics: Vec<String>,
    /// MECE structure check result.
    pub validation: ValidationResult,
    /// Synthesized learning path.
    pub learning_path: LearningPath,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_id_roundtrip() {
        let id = AnalysisId::new();
        let s = id.to_string();
        let parsed: AnalysisId = s.parse().expect("parse AnalysisId");
        assert_eq!(id, parsed);
    }

    #[test]
    fn effective_duration_defaults() {
        let mut course = CourseInfo::new("Rust入門");
        assert_eq!(course.effective_duration(), 60);

        course.duration = Some(0);
        assert_eq!(course.effective_duration(), 60);

        course.duration = Some(90);
        assert_eq!(course.effective_duration(), 90);
    }

    #[test]
    fn course_info_deserializes_with_defaults() {
        let course: CourseInfo = serde_json::from_str(r#"{"title": "講座"}"#).expect("parse");
        assert_eq!(course.target_audience, "初心者");
        assert_eq!(course.tone, "通常");
        assert!(course.duration.is_none());
    }

    #[test]
    fn section_serialization_roundtrip() {
        let section = Section {
            id: "section_1".into(),
            number: "1-1".into(),
            title: "概要".into(),
            original_line: "1-1. 概要".into(),
            index: 0,
            subsections: vec![Subsection {
                number: "-".into(),
                title: "詳細ポイント".into(),
                original_line: "- 詳細ポイント".into(),
            }],
        };

        let json = serde_json::to_string(&section).expect("serialize");
        let parsed: Section = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, section);
    }

    #[test]
    fn empty_subsections_omitted_from_json() {
        let section = Section {
            id: "section_1".into(),
            number: "2".into(),
            title: "基礎".into(),
            original_line: "2. 基礎".into(),
            index: 3,
            subsections: vec![],
        };

        let json = serde_json::to_string(&section).expect("serialize");
        assert!(!json.contains("subsections"));
    }

    #[test]
    fn validation_result_serialization() {
        let result = ValidationResult {
            is_valid: true,
            issues: vec![],
            suggestions: vec![],
            mece_score: 72.5,
        };

        let json = serde_json::to_string(&result).expect("serialize");
        let parsed: ValidationResult = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.mece_score, 72.5);
        assert!(parsed.is_valid);
    }
}
