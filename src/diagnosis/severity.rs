//! Severity classification from the health-assessment score.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::diagnosis::report::Severity;

static ASSESSMENT_SCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bhealth\s+assessment\b[^0-9\n]*(\d{1,2})").unwrap());

/// Classify condition urgency from the raw analysis text.
///
/// Looks for the first `Health assessment: N` numeric pattern and maps the
/// 1-10 score through [`Severity::from_score`]: a score of 4 or below is
/// `High` severity, 5-7 is `Moderate`, 8 and above is `Low`.
///
/// With no score present at all the classifier returns `Low`. Note the
/// asymmetry with the confidence heuristic, which defaults to a moderate
/// 50 in the same no-data scenario; the two defaults are independent and
/// deliberately left unreconciled.
pub fn classify_severity(raw: &str) -> Severity {
    match ASSESSMENT_SCORE.captures(raw) {
        Some(caps) => {
            let score: u8 = caps[1].parse().unwrap_or(0);
            trace!(score, "health assessment score found");
            Severity::from_score(score)
        }
        None => {
            trace!("no health assessment score, defaulting to low severity");
            Severity::Low
        }
    }
}
