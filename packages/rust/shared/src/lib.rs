//! Shared types, error model, and configuration for coursecraft.
//!
//! This crate is the foundation depended on by all other coursecraft crates.
//! It provides:
//! - [`CoursecraftError`] — the unified error type
//! - Domain types ([`Section`], [`ValidationResult`], [`LearningPath`],
//!   [`CourseInfo`], [`AnalysisReport`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, config_dir, config_file_path, init_config, load_config,
    load_config_from,
};
pub use error::{CoursecraftError, Result};
pub use types::{
    AnalysisId, AnalysisReport, CourseInfo, DEFAULT_COURSE_DURATION_MIN, LearningPath,
    LearningPathItem, ParsedOutline, Section, Subsection, ValidationResult,
};
