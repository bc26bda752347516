//! Outline parser: streams lines through the classifier into a section tree.
//!
//! The parser owns section identity: ids are `section_1`, `section_2`, …
//! in parse order, stable only within a single run. It never errors —
//! totally unstructured input simply yields an empty section list.

use tracing::{debug, info};

use coursecraft_shared::{ParsedOutline, Section, Subsection};

use crate::classifier::{LineClass, classify};

/// Parse free-form outline text into sections and preamble topics.
///
/// Splits on newlines, drops lines that are blank after trimming, and
/// feeds each survivor to the classifier raw (indentation intact) while
/// tracking the currently open section:
///
/// - a section start appends a fresh [`Section`] and moves the cursor
/// - a subsection start attaches to the cursor's section
/// - chapter markers are dropped
/// - unstructured lines before the first section accumulate as key topics
///
/// Deterministic: identical input always yields identical sections, ids,
/// and key topics.
pub fn parse_outline(text: &str) -> ParsedOutline {
    let mut sections: Vec<Section> = Vec::new();
    let mut key_topics: Vec<String> = Vec::new();

    let lines = text.lines().filter(|line| !line.trim().is_empty());

    for (index, raw) in lines.enumerate() {
        let trimmed = raw.trim();

        match classify(raw, !sections.is_empty()) {
            LineClass::ChapterMarker => {
                debug!(line = trimmed, "skipping chapter marker");
            }
            LineClass::SectionStart { number, title } => {
                let id = format!("section_{}", sections.len() + 1);
                debug!(%id, %number, %title, "section recognized");
                sections.push(Section {
                    id,
                    number,
                    title,
                    original_line: trimmed.to_string(),
                    index,
                    subsections: Vec::new(),
                });
            }
            LineClass::SubsectionStart { number, title } => {
                // The classifier only emits this while a section is open.
                if let Some(current) = sections.last_mut() {
                    debug!(
                        section = %current.id,
                        %number,
                        %title,
                        "subsection recognized"
                    );
                    current.subsections.push(Subsection {
                        number,
                        title,
                        original_line: trimmed.to_string(),
                    });
                }
            }
            LineClass::Unstructured => {
                if sections.is_empty() {
                    key_topics.push(trimmed.to_string());
                }
            }
        }
    }

    info!(
        sections = sections.len(),
        key_topics = key_topics.len(),
        "outline parse complete"
    );

    ParsedOutline {
        sections,
        key_topics,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
