use std::fmt;

use serde::{Deserialize, Serialize};

/// Urgency of a diagnosed crop condition.
///
/// Derived from the 1-10 health-assessment score embedded in the raw
/// analysis text: a low score means an unhealthy plant, so low scores map
/// to high severity. When no score is present at all the classifier
/// returns `Low`; note that the confidence heuristic defaults to a
/// moderate 50 in the same no-data scenario — the two defaults are
/// independent and intentionally left that way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Healthy or near-healthy crop (assessment score 8-10, or no score).
    #[default]
    Low,
    /// Noticeable damage worth treating soon (score 5-7).
    Moderate,
    /// Urgent condition needing immediate action (score 1-4).
    High,
}

impl Severity {
    /// Map a 1-10 health-assessment score to a severity level.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=4 => Severity::High,
            5..=7 => Severity::Moderate,
            _ => Severity::Low,
        }
    }

    /// Badge text for display layers ("Low Severity", "High Severity", ...).
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "Low Severity",
            Severity::Moderate => "Moderate Severity",
            Severity::High => "High Severity",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Moderate => "moderate",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured outcome of a crop-image analysis, as consumed by a
/// diagnosis page: disease name, confidence badge, three prose sections
/// and a severity badge.
///
/// Every field is always populated. The extractors behind
/// [`interpret`](crate::diagnosis::interpret) substitute fixed fallback
/// values when the raw text yields nothing, so a `DiagnosisResult` never
/// carries an empty string — but it cannot tell you whether a fallback
/// means "the analysis reported nothing" or "the pattern match missed".
/// The fields are extracted independently and may disagree with each
/// other (for example `severity: High` alongside the default confidence).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    /// Identified disease or threat, or `"Plant Health Concern"`.
    pub disease: String,
    /// Diagnosis confidence as a percentage, always within 0-100.
    pub confidence: u8,
    /// Summary of the health assessment, possibly truncated.
    pub description: String,
    /// Recommended treatment steps.
    pub treatment: String,
    /// Prevention measures.
    pub prevention: String,
    /// Urgency of the condition.
    pub severity: Severity,
}
