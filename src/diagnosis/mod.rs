//! Best-effort interpretation of free-form crop-analysis text.
//!
//! A vision model asked to describe a crop photo answers in prose, not in
//! a schema. This module turns that prose into a [`DiagnosisResult`] a
//! display layer can render: each field is recovered by an ordered list of
//! pattern attempts over the full text, and every extractor substitutes a
//! fixed fallback when nothing matches. Interpretation is therefore total —
//! it never fails, and it never yields an empty field — but it also cannot
//! distinguish "the analysis reported nothing" from "the pattern missed".

pub mod extract;
pub mod interpret;
pub mod normalize;
pub mod report;
pub mod severity;

pub use interpret::interpret;
pub use normalize::normalize;
pub use report::{DiagnosisResult, Severity};
pub use severity::classify_severity;
