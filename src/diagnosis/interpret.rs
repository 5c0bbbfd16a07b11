//! Assembly of extracted fields into a [`DiagnosisResult`].

use tracing::debug;

use crate::diagnosis::extract::{
    extract_confidence, extract_description, extract_disease, extract_prevention,
    extract_treatment,
};
use crate::diagnosis::report::DiagnosisResult;
use crate::diagnosis::severity::classify_severity;

/// Interpret a raw analysis blob into a structured [`DiagnosisResult`].
///
/// Runs the five field extractors and the severity classifier against the
/// same text and packages their outputs. Every extractor is total, so
/// interpretation cannot fail and every field of the result is populated —
/// at worst with its fixed fallback value.
///
/// # Examples
///
/// ```
/// use cropsight::diagnosis::{interpret, Severity};
///
/// let raw = "Health assessment: 2\n\
///            Identified disease: Late Blight\n\
///            Treatment: Apply copper fungicide\n\
///            Prevention: Use resistant varieties";
/// let result = interpret(raw);
///
/// assert_eq!(result.disease, "Late Blight");
/// assert_eq!(result.severity, Severity::High);
/// assert_eq!(result.confidence, 50);
/// ```
pub fn interpret(raw: &str) -> DiagnosisResult {
    debug!(raw_len = raw.len(), "interpreting analysis text");
    let result = DiagnosisResult {
        disease: extract_disease(raw),
        confidence: extract_confidence(raw),
        description: extract_description(raw),
        treatment: extract_treatment(raw),
        prevention: extract_prevention(raw),
        severity: classify_severity(raw),
    };
    debug!(
        disease = %result.disease,
        confidence = result.confidence,
        severity = %result.severity,
        "assembled diagnosis result"
    );
    result
}
