//! Curriculum validation and learning-path synthesis for coursecraft.
//!
//! Consumes the section tree produced by `coursecraft-outline`:
//! - [`mece`] — MECE structure scoring with actionable suggestions
//! - [`path`] — per-section complexity, timing, and objectives
//! - [`analyze`] — the one-call parse + validate + synthesize pipeline

pub mod analyze;
pub mod mece;
pub mod path;

pub use analyze::analyze;
pub use mece::validate;
pub use path::synthesize;
