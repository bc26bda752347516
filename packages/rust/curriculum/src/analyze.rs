//! End-to-end analysis: outline text → parse → validate → synthesize → report.

use chrono::Utc;
use tracing::{info, instrument};

use coursecraft_outline::parse_outline;
use coursecraft_shared::{AnalysisId, AnalysisReport, CourseInfo};

use crate::{mece, path};

/// Run the full analysis over one outline.
///
/// Infallible by design: malformed or empty outline text degrades to an
/// empty section tree and a zero score, never an error. Each call
/// produces a fresh report; the engine holds no cross-call state, so
/// concurrent invocations on separate inputs never interfere.
#[instrument(skip_all, fields(course = %course.title))]
pub fn analyze(outline: &str, course: &CourseInfo) -> AnalysisReport {
    let parsed = parse_outline(outline);
    let validation = mece::validate(&parsed.sections, &course.title);
    let learning_path = path::synthesize(&parsed.sections, course);

    let report = AnalysisReport {
        id: AnalysisId::new(),
        generated_at: Utc::now(),
        course: course.clone(),
        total_sections: parsed.sections.len(),
        sections: parsed.sections,
        key_topics: parsed.key_topics,
        validation,
        learning_path,
    };

    info!(
        report_id = %report.id,
        sections = report.total_sections,
        mece_score = report.validation.mece_score,
        estimated_duration = report.learning_path.estimated_total_duration,
        "analysis complete"
    );

    report
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyzes_wellformed_outline() {
        let course = CourseInfo::new("入門講座");
        let report = analyze("1-1. 基礎\n1-2. 応用\n", &course);

        assert_eq!(report.total_sections, 2);
        assert_eq!(report.sections[0].number, "1-1");
        assert_eq!(report.sections[1].number, "1-2");
        assert_eq!(report.learning_path.items.len(), 2);
        assert!(report.validation.mece_score >= 0.0);
        assert!(report.validation.mece_score <= 100.0);
    }

    #[test]
    fn equal_complexity_sections_conserve_base_duration() {
        let mut course = CourseInfo::new("講座");
        course.duration = Some(90);

        let report = analyze("1-1. 計画\n1-2. 設計\n1-3. 検証\n", &course);

        for item in &report.learning_path.items {
            assert_eq!(item.duration, 30);
        }
        assert_eq!(report.learning_path.estimated_total_duration, 90);
    }

    #[test]
    fn empty_outline_degrades_gracefully() {
        let course = CourseInfo::new("空の講座");
        let report = analyze("", &course);

        assert_eq!(report.total_sections, 0);
        assert!(report.sections.is_empty());
        assert_eq!(report.validation.mece_score, 0.0);
        assert!(report.learning_path.items.is_empty());
        assert_eq!(report.learning_path.estimated_total_duration, 0);
    }

    #[test]
    fn path_items_reference_parsed_sections() {
        let course = CourseInfo::new("講座");
        let report = analyze("1-1. 導入\n1-2. 本編\n", &course);

        let section_ids: Vec<&str> = report.sections.iter().map(|s| s.id.as_str()).collect();
        let item_ids: Vec<&str> = report
            .learning_path
            .items
            .iter()
            .map(|i| i.section_id.as_str())
            .collect();
        assert_eq!(section_ids, item_ids);
    }

    #[test]
    fn report_serializes_to_json() {
        let course = CourseInfo::new("JSON講座");
        let report = analyze("1-1. 概要\n  - 詳細\n", &course);

        let json = serde_json::to_string_pretty(&report).expect("serialize report");
        let parsed: AnalysisReport = serde_json::from_str(&json).expect("deserialize report");

        assert_eq!(parsed.total_sections, report.total_sections);
        assert_eq!(parsed.sections, report.sections);
        assert_eq!(parsed.validation, report.validation);
        assert_eq!(parsed.learning_path, report.learning_path);
    }

    #[test]
    fn course_metadata_echoed_verbatim() {
        let mut course = CourseInfo::new("エコー講座");
        course.target_audience = "中級者".into();
        course.tone = "カジュアル".into();

        let report = analyze("1-1. 内容\n", &course);

        assert_eq!(report.course.target_audience, "中級者");
        assert_eq!(report.course.tone, "カジュアル");
    }

    #[test]
    fn chapter_markers_never_reach_the_report() {
        let course = CourseInfo::new("講座");
        let report = analyze("【第1章】はじめに\n1-1. 概要\n  - 詳細ポイント\n", &course);

        assert_eq!(report.total_sections, 1);
        assert_eq!(report.sections[0].title, "概要");
        assert_eq!(report.sections[0].subsections.len(), 1);
    }

    #[test]
    fn analysis_fixture_end_to_end() {
        let content = std::fs::read_to_string("../../../fixtures/outlines/python-course.txt")
            .expect("read fixture");
        let mut course = CourseInfo::new("Python開発入門");
        course.duration = Some(120);

        let report = analyze(&content, &course);

        assert_eq!(report.total_sections, 6);
        assert!(report.validation.mece_score > 0.0);
        assert!(report.learning_path.estimated_total_duration > 0);
        // Linear prerequisites throughout
        for (i, item) in report.learning_path.items.iter().enumerate() {
            if i == 0 {
                assert!(item.prerequisites.is_empty());
            } else {
                assert_eq!(item.prerequisites, vec![format!("section_{i}")]);
            }
        }
    }
}
