//! Line classifier: decides what a single outline line opens.
//!
//! Outline authors mix numbering conventions freely (`1-1.`, `第1章`,
//! `(3)`, roman numerals, bullets). The classifier tries a fixed set of
//! pattern matchers in priority order and returns the first hit. The
//! order encodes policy: bracketed chapter markers must never become
//! sections, and the canonical leaf form (`N-M.`) must never be split by
//! a broader fallback pattern.

use std::sync::LazyLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Classification result
// ---------------------------------------------------------------------------

/// What one outline line opens, with extracted number/title where matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// Bracketed mid-level heading (`【第N章】…`) — structural noise,
    /// deliberately ignored since only leaf sections are tracked.
    ChapterMarker,
    /// Opens a new top-level section.
    SectionStart { number: String, title: String },
    /// Adds a child to the currently open section.
    SubsectionStart { number: String, title: String },
    /// Free prose; no numbering recognized.
    Unstructured,
}

// ---------------------------------------------------------------------------
// Pattern tables (compiled once)
// ---------------------------------------------------------------------------

/// Matches `【第N章】` / `【第N節】` chapter markers.
static CHAPTER_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^【第\d+[章節]】").expect("chapter marker regex"));

/// Matches any `【…】` bracketed heading (excluded from the fallback).
static BRACKETED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^【.*】").expect("bracketed regex"));

/// Matches the canonical leaf-section form: `1-1`, `2-3.`.
static LEAF_SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+-\d+\.?)").expect("leaf section regex"));

/// Matches subsection markers on an indented line: `1`, `1.2`, `a)`,
/// `A)`, or a bullet glyph.
static SUBSECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+\.\d+\.?|\d+\.?|[a-z]\)|[A-Z]\)|[*\-•])").expect("subsection regex")
});

/// Fallback section numbering conventions for outlines that never adopt
/// the `N-M.` form. Compound labels (`1.1.`) come before single numbers
/// so the whole label is captured as the number token.
static FALLBACK_SECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(第\d+[章節]\.?|\(\d+\)|\d+\)|\d+\.\d+\.?|\d+\.?|[IVX]+\.?|[a-z]\)|[A-Z]\)|[*\-•])")
        .expect("fallback section regex")
});

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Classify one raw, non-blank outline line.
///
/// The line is passed untrimmed so leading indentation survives. Below
/// the leaf form, an indented line is subordinate content: it can become
/// a subsection of the open section, or nothing, but never a fallback
/// section of its own.
pub fn classify(raw_line: &str, section_open: bool) -> LineClass {
    let trimmed = raw_line.trim();
    let indented = raw_line.starts_with([' ', '\t']);

    // Rule 1: chapter markers are never sections, whatever follows.
    if CHAPTER_MARKER_RE.is_match(trimmed) {
        return LineClass::ChapterMarker;
    }

    // Rule 2: the canonical leaf form wins over every broader pattern.
    if let Some(caps) = LEAF_SECTION_RE.captures(trimmed) {
        let token = caps.get(1).expect("leaf capture").as_str();
        let (number, title) = split_number_title(trimmed, token);
        return LineClass::SectionStart { number, title };
    }

    // Rule 3: indented lines subordinate to the open section.
    if indented {
        if section_open {
            if let Some(caps) = SUBSECTION_RE.captures(trimmed) {
                let token = caps.get(1).expect("subsection capture").as_str();
                let (number, rest) = split_number_title(trimmed, token);
                let title = strip_bullet_prefix(&rest).to_string();
                return LineClass::SubsectionStart { number, title };
            }
        }
        // An indented line with no open section (or no recognized
        // marker) is discarded rather than promoted to a section.
        return LineClass::Unstructured;
    }

    // Rule 4: broader numbering conventions, minus bracketed headings.
    if !BRACKETED_RE.is_match(trimmed) {
        if let Some(caps) = FALLBACK_SECTION_RE.captures(trimmed) {
            let token = caps.get(1).expect("fallback capture").as_str();
            let (number, title) = split_number_title(trimmed, token);
            return LineClass::SectionStart { number, title };
        }
    }

    // Rule 5: nothing matched.
    LineClass::Unstructured
}

// ---------------------------------------------------------------------------
// Normalization helpers
// ---------------------------------------------------------------------------

/// Split a trimmed line into (normalized number, trimmed title) given
/// the raw matched token.
fn split_number_title(trimmed: &str, token: &str) -> (String, String) {
    let number = normalize_number(token);
    let title = trimmed[token.len()..].trim().to_string();
    (number, title)
}

/// Strip one trailing `.` or `)`, then one leading `(`.
fn normalize_number(token: &str) -> String {
    let token = token
        .strip_suffix('.')
        .or_else(|| token.strip_suffix(')'))
        .unwrap_or(token);
    let token = token.strip_prefix('(').unwrap_or(token);
    token.to_string()
}

/// Drop leading bullet glyphs and whitespace from a subsection title.
fn strip_bullet_prefix(title: &str) -> &str {
    title.trim_start_matches(|c: char| c == '*' || c == '-' || c == '•' || c.is_whitespace())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn section(number: &str, title: &str) -> LineClass {
        LineClass::SectionStart {
            number: number.into(),
            title: title.into(),
        }
    }

    fn subsection(number: &str, title: &str) -> LineClass {
        LineClass::SubsectionStart {
            number: number.into(),
            title: title.into(),
        }
    }

    #[test]
    fn chapter_marker_never_becomes_section() {
        assert_eq!(classify("【第1章】Overview", false), LineClass::ChapterMarker);
        assert_eq!(classify("【第1章】Overview", true), LineClass::ChapterMarker);
        assert_eq!(classify("【第12節】補足", true), LineClass::ChapterMarker);
    }

    #[test]
    fn leaf_section_preferred_form() {
        assert_eq!(classify("1-1. 基礎", false), section("1-1", "基礎"));
        assert_eq!(classify("2-3 応用", false), section("2-3", "応用"));
        // Trailing dot is stripped from the number, kept out of the title
        assert_eq!(classify("10-2.", false), section("10-2", ""));
    }

    #[test]
    fn leaf_form_wins_over_fallback() {
        // "1-1. Intro" also matches the fallback's bare-number branch;
        // the leaf rule must capture the full compound label.
        let got = classify("1-1. Intro", false);
        assert_eq!(got, section("1-1", "Intro"));
    }

    #[test]
    fn fallback_numbering_conventions() {
        assert_eq!(classify("1. はじめに", false), section("1", "はじめに"));
        assert_eq!(classify("1.1. 背景", false), section("1.1", "背景"));
        assert_eq!(classify("第1章 導入", false), section("第1章", "導入"));
        assert_eq!(classify("IV. 演習", false), section("IV", "演習"));
        assert_eq!(classify("(1) 概要", false), section("1", "概要"));
        assert_eq!(classify("1) 概要", false), section("1", "概要"));
        assert_eq!(classify("a) 付録", false), section("a", "付録"));
        assert_eq!(classify("A) 付録", false), section("A", "付録"));
        assert_eq!(classify("- ポイント", false), section("-", "ポイント"));
    }

    #[test]
    fn bare_number_without_dot_is_a_section() {
        assert_eq!(classify("3 まとめ", false), section("3", "まとめ"));
    }

    #[test]
    fn bracketed_heading_excluded_from_fallback() {
        // Not a chapter marker (no 第N章), but still bracketed — rule 4
        // must not fire even though nothing else matches either.
        assert_eq!(classify("【コラム】余談", false), LineClass::Unstructured);
    }

    #[test]
    fn subsection_requires_open_section_and_indentation() {
        assert_eq!(classify("  - 詳細ポイント", true), subsection("-", "詳細ポイント"));
        assert_eq!(classify("\t1. 下位項目", true), subsection("1", "下位項目"));
        assert_eq!(classify("  a) 補足", true), subsection("a", "補足"));
        assert_eq!(classify("  1.2 詳細", true), subsection("1.2", "詳細"));

        // Same text without indentation becomes a fallback section
        assert_eq!(classify("- 詳細ポイント", true), section("-", "詳細ポイント"));

        // Indented before any section is open: discarded, not promoted
        assert_eq!(classify("  - 詳細ポイント", false), LineClass::Unstructured);
    }

    #[test]
    fn indented_prose_is_unstructured() {
        assert_eq!(classify("  ただのメモ", true), LineClass::Unstructured);
    }

    #[test]
    fn prose_is_unstructured() {
        assert_eq!(classify("この講座について", false), LineClass::Unstructured);
    }

    #[test]
    fn number_normalization() {
        assert_eq!(normalize_number("1."), "1");
        assert_eq!(normalize_number("1)"), "1");
        assert_eq!(normalize_number("(1)"), "1");
        assert_eq!(normalize_number("1-1."), "1-1");
        assert_eq!(normalize_number("IV."), "IV");
        assert_eq!(normalize_number("-"), "-");
    }
}
