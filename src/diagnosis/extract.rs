//! Field extractors over the raw analysis text.
//!
//! Each extractor applies an explicit ordered list of pattern attempts
//! against the full raw response and substitutes a fixed fallback when
//! nothing matches, so every extractor is total. The rules are kept as
//! separate compiled patterns, in the order they are tried, so behavior
//! stays auditable and testable rule by rule.
//!
//! Extractors do not coordinate: each scans the same text independently,
//! and a fallback value is indistinguishable from a genuinely extracted
//! one. Callers that need to know *why* a field is populated cannot find
//! out here.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::diagnosis::normalize::normalize;

/// Returned when no disease name can be recovered from the text.
pub const FALLBACK_DISEASE: &str = "Plant Health Concern";

/// Returned when no description section is present.
pub const FALLBACK_DESCRIPTION: &str =
    "Detailed crop health information is unavailable for this image.";

/// Returned when no treatment section is present.
pub const FALLBACK_TREATMENT: &str =
    "Treatment recommendations are unavailable. Consult your local agricultural extension office.";

/// Returned when no prevention section is present.
pub const FALLBACK_PREVENTION: &str =
    "Prevention guidance is unavailable. Consult your local agricultural extension office.";

/// Descriptions longer than this are summarized down to two sentences.
const DESCRIPTION_LIMIT: usize = 150;

/// Keywords that promote a later sentence into the summary.
const IMPORTANCE_KEYWORDS: &[&str] = &["important", "severe", "critical", "key", "primary", "main"];

const SEVERE_KEYWORDS: &[&str] = &["severe", "critical", "emergency"];
const MODERATE_KEYWORDS: &[&str] = &["moderate", "mild", "minor"];

const DISEASE_LABELS: &str =
    r"identified\s+diseases?(?:\s*/\s*threats?)?|diseases?(?:\s*/\s*threats?)?|issues?";
const DESCRIPTION_LABELS: &str = r"health\s+assessment|description|analysis|findings";
const TREATMENT_LABELS: &str = r"recommended\s+treatments?|treatments?";
const PREVENTION_LABELS: &str = r"prevention\s+measures?|prevention";
const RECOVERY_LABELS: &str = r"(?:expected\s+)?recovery(?:\s+timeline)?";

// A label line: optional list numbering or markdown decor, then one of the
// given labels, then anything up to the first colon on that line. The
// match ends right after the colon so the section body starts at `end()`.
fn label_line(labels: &str) -> String {
    format!(r"(?mi)^\s*(?:[-*>#]+\s*)?(?:\d+\s*[.)]\s*)?[*_\s]*(?:{labels})\b[^:\n]*:")
}

// Every label any extractor recognizes. A line opening one of these ends
// the section that precedes it.
static SECTION_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    let labels = [
        DISEASE_LABELS,
        DESCRIPTION_LABELS,
        TREATMENT_LABELS,
        PREVENTION_LABELS,
        RECOVERY_LABELS,
    ]
    .join("|");
    Regex::new(&label_line(&labels)).unwrap()
});

static DESCRIPTION_OPENER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&label_line(DESCRIPTION_LABELS)).unwrap());

static TREATMENT_OPENER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&label_line(TREATMENT_LABELS)).unwrap());

static PREVENTION_OPENER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&label_line(PREVENTION_LABELS)).unwrap());

// Disease rules, tried in order. The labeled form wins over loose phrase
// patterns; the first match decides the outcome.
static DISEASE_RULES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        format!("{}{}", label_line(DISEASE_LABELS), r"\s*([^\n]+)"),
        r"(?i)\bappears\s+to\s+be\s+(?:an?\s+|the\s+)?([^.,;\n]+)".to_string(),
        r"(?i)\bsigns\s+of\s+(?:an?\s+|the\s+)?([^.,;\n]+)".to_string(),
        r"(?i)\b(?:probably|likely)\s+(?:an?\s+|the\s+)?([^.,;\n]+)".to_string(),
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static PERCENT_RULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:confidence|certainty|probability)\b[^0-9%\n]*(\d{1,3})\s*%").unwrap()
});

// An out-of-ten rating. A bare "Health assessment: N" with no /10 form
// feeds the severity classifier only, never the confidence score.
static RATING_RULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:health\s+assessment|score|rating)\b[^0-9\n]*(\d{1,2})\s*(?:/\s*10|out\s+of\s+10)\b")
        .unwrap()
});

/// Extract the disease or threat name.
///
/// Rules, in order:
/// 1. a labeled line: `Identified disease(s)[/threats]`, `Disease(s)`,
///    `Issue(s)` followed by a colon;
/// 2. the phrase `appears to be X`;
/// 3. the phrase `signs of X`;
/// 4. the phrase `probably X` / `likely X`.
///
/// The first matching rule decides: its capture is normalized and
/// returned, or [`FALLBACK_DISEASE`] if normalization leaves nothing.
/// With no match at all the fallback is returned.
pub fn extract_disease(raw: &str) -> String {
    for (index, rule) in DISEASE_RULES.iter().enumerate() {
        if let Some(caps) = rule.captures(raw) {
            let cleaned = normalize(&caps[1]);
            trace!(rule = index, name = %cleaned, "disease rule matched");
            if cleaned.is_empty() {
                return FALLBACK_DISEASE.to_string();
            }
            return cleaned;
        }
    }
    FALLBACK_DISEASE.to_string()
}

/// Extract a confidence percentage, always within 0-100.
///
/// Rules, in order:
/// 1. an explicit percentage after `confidence`, `certainty` or
///    `probability`, clamped to 100;
/// 2. an out-of-ten rating (`Score: 7/10`, `rated 8 out of 10`),
///    multiplied by 10 and clamped;
/// 3. keyword heuristic: severe wording → 85, moderate wording → 65,
///    otherwise 50.
///
/// A labeled rating without an out-of-ten qualifier (`Score: 7`,
/// `Health assessment: 2`) is deliberately not a confidence source: the
/// bare assessment score belongs to the severity classifier, and such
/// text falls through to the keyword heuristic here.
pub fn extract_confidence(raw: &str) -> u8 {
    if let Some(caps) = PERCENT_RULE.captures(raw) {
        let value: u32 = caps[1].parse().unwrap_or(0);
        trace!(value, "explicit confidence percentage matched");
        return value.min(100) as u8;
    }

    if let Some(caps) = RATING_RULE.captures(raw) {
        let value: u32 = caps[1].parse().unwrap_or(0);
        trace!(value, "out-of-ten rating matched");
        return (value * 10).min(100) as u8;
    }

    let lower = raw.to_lowercase();
    if SEVERE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        85
    } else if MODERATE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        65
    } else {
        50
    }
}

/// Extract the health-assessment description, summarized when long.
///
/// The section opens at a `Health assessment`, `Description`, `Analysis`
/// or `Findings` label and runs until the next recognized section label
/// or the end of the text. Spans over 150 characters are reduced to the
/// first sentence plus either the first later sentence carrying an
/// importance keyword or, failing that, the second sentence, terminated
/// with an ellipsis marker.
pub fn extract_description(raw: &str) -> String {
    match labeled_section(raw, &DESCRIPTION_OPENER) {
        Some(section) if section.chars().count() > DESCRIPTION_LIMIT => summarize(&section),
        Some(section) => section,
        None => FALLBACK_DESCRIPTION.to_string(),
    }
}

/// Extract the treatment section (`Recommended treatments` / `Treatment`).
pub fn extract_treatment(raw: &str) -> String {
    labeled_section(raw, &TREATMENT_OPENER).unwrap_or_else(|| FALLBACK_TREATMENT.to_string())
}

/// Extract the prevention section (`Prevention measures` / `Prevention`).
pub fn extract_prevention(raw: &str) -> String {
    labeled_section(raw, &PREVENTION_OPENER).unwrap_or_else(|| FALLBACK_PREVENTION.to_string())
}

/// Find a labeled section and return its normalized body, or `None` when
/// the label is absent or the body normalizes to nothing.
///
/// The body starts right after the label's colon and ends at the next
/// recognized label line. The remainder of the label line itself is
/// always part of the body, so prose like "Treatment: see below" cannot
/// terminate its own section.
fn labeled_section(raw: &str, opener: &Regex) -> Option<String> {
    let start = opener.find(raw)?.end();
    let body = &raw[start..];

    // Boundary labels only open sections at line starts, so scanning
    // begins on the next line.
    let scan_from = body.find('\n').map(|i| i + 1).unwrap_or(body.len());
    let end = SECTION_BOUNDARY
        .find(&body[scan_from..])
        .map(|m| scan_from + m.start())
        .unwrap_or(body.len());

    let cleaned = normalize(&body[..end]);
    if cleaned.is_empty() { None } else { Some(cleaned) }
}

/// Reduce a long normalized span to two sentences: the first, plus the
/// first later sentence containing an importance keyword (or the second
/// sentence when none qualifies), joined by a space and terminated with
/// `...`.
fn summarize(text: &str) -> String {
    let sentences = split_sentences(text);
    match sentences.len() {
        0 => text.to_string(),
        1 => format!("{}...", sentences[0].trim_end_matches(['.', '!', '?'])),
        _ => {
            let chosen = sentences[1..]
                .iter()
                .find(|s| {
                    let lower = s.to_lowercase();
                    IMPORTANCE_KEYWORDS.iter().any(|k| lower.contains(k))
                })
                .unwrap_or(&sentences[1]);
            format!(
                "{} {}...",
                sentences[0],
                chosen.trim_end_matches(['.', '!', '?'])
            )
        }
    }
}

static SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?](?:\s+|$)").unwrap());

/// Split on sentence-ending punctuation followed by whitespace or end of
/// text. Terminators stay attached to their sentence; a trailing
/// fragment without one still counts as a sentence.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for m in SENTENCE_END.find_iter(text) {
        let sentence = text[start..m.start() + 1].trim();
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
        start = m.end();
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disease_labeled_line() {
        assert_eq!(extract_disease("Disease: Late Blight\nTreatment: spray"), "Late Blight");
        assert_eq!(
            extract_disease("2. **Identified diseases/threats:** Powdery Mildew\n3. next"),
            "Powdery Mildew"
        );
        assert_eq!(extract_disease("Issue: Aphid infestation"), "Aphid infestation");
    }

    #[test]
    fn test_disease_phrase_patterns() {
        assert_eq!(
            extract_disease("The damage appears to be early blight, spreading fast."),
            "early blight"
        );
        assert_eq!(
            extract_disease("Leaves show clear signs of rust fungus. Act now."),
            "rust fungus"
        );
        assert_eq!(extract_disease("This is probably leaf curl virus, unfortunately."), "leaf curl virus");
    }

    #[test]
    fn test_disease_label_beats_phrase() {
        let raw = "It appears to be nothing serious.\nDisease: Bacterial Spot";
        assert_eq!(extract_disease(raw), "Bacterial Spot");
    }

    #[test]
    fn test_disease_fallback() {
        assert_eq!(extract_disease("The plant looks perfectly fine."), FALLBACK_DISEASE);
        assert_eq!(extract_disease(""), FALLBACK_DISEASE);
    }

    #[test]
    fn test_disease_empty_after_normalize_falls_back() {
        assert_eq!(extract_disease("Disease: ** **"), FALLBACK_DISEASE);
    }

    #[test]
    fn test_confidence_explicit_percentage() {
        assert_eq!(extract_confidence("Confidence: 92%"), 92);
        assert_eq!(extract_confidence("certainty is about 70 %"), 70);
    }

    #[test]
    fn test_confidence_clamps_out_of_range() {
        assert_eq!(extract_confidence("confidence: 250%"), 100);
    }

    #[test]
    fn test_confidence_out_of_ten_rating() {
        assert_eq!(extract_confidence("Score: 7/10 overall"), 70);
        assert_eq!(extract_confidence("rating of 8 out of 10"), 80);
        assert_eq!(extract_confidence("Health assessment: 9/10"), 90);
    }

    #[test]
    fn test_confidence_bare_assessment_is_not_a_rating() {
        // A bare assessment score feeds severity, not confidence.
        assert_eq!(extract_confidence("Health assessment: 2"), 50);
    }

    #[test]
    fn test_confidence_bare_labeled_ratings_fall_to_heuristic() {
        // Without an out-of-ten qualifier, labeled ratings are excluded
        // from the rating rule and only the keywords decide.
        assert_eq!(extract_confidence("Score: 7"), 50);
        assert_eq!(extract_confidence("Rating: 9 for overall vigor"), 50);
        assert_eq!(extract_confidence("Score: 7, a mild case"), 65);
    }

    #[test]
    fn test_confidence_keyword_heuristic() {
        assert_eq!(extract_confidence("This is a severe infestation"), 85);
        assert_eq!(extract_confidence("a critical emergency for the crop"), 85);
        assert_eq!(extract_confidence("only moderate leaf damage"), 65);
        assert_eq!(extract_confidence("a mild case of rust"), 65);
        assert_eq!(extract_confidence("nothing notable here"), 50);
        assert_eq!(extract_confidence(""), 50);
    }

    #[test]
    fn test_confidence_percent_beats_keywords() {
        assert_eq!(extract_confidence("severe case, confidence: 40%"), 40);
    }

    #[test]
    fn test_description_short_section_returned_whole() {
        let raw = "Health assessment: leaves show small dark spots.\nTreatment: spray";
        assert_eq!(extract_description(raw), "leaves show small dark spots.");
    }

    #[test]
    fn test_description_spans_lines_until_next_label() {
        let raw = "Description: dark spots\nwith yellow halos\nTreatment: copper spray";
        assert_eq!(extract_description(raw), "dark spots with yellow halos");
    }

    #[test]
    fn test_description_summarizes_long_sections() {
        let raw = "Analysis: The leaves carry widespread dark lesions across most of the canopy, \
                   and several stems are blackened near the soil line. Humidity has clearly \
                   accelerated the spread. It is important to remove infected material today. \
                   Recovery may take weeks.";
        let summary = extract_description(raw);
        assert!(summary.ends_with("..."), "summary should end with ellipsis: {summary}");
        assert!(summary.starts_with("The leaves carry widespread dark lesions"));
        assert!(summary.contains("important to remove infected material"));
        assert!(!summary.contains("Recovery may take weeks"));
    }

    #[test]
    fn test_description_summary_takes_second_sentence_without_keyword() {
        let raw = "Findings: The canopy shows extensive spotting that covers the majority of the \
                   upper leaves and some of the lower ones as well. New growth is also affected. \
                   Older leaves are curling.";
        let summary = extract_description(raw);
        assert!(summary.contains("New growth is also affected"));
        assert!(!summary.contains("curling"));
        assert!(summary.ends_with("..."));
    }

    #[test]
    fn test_description_single_long_sentence_gets_ellipsis() {
        let raw = "Description: The entire canopy is covered in a fine grey mold that has \
                   spread from the lower leaves to the growing tips over what looks like \
                   several weeks of humid weather without any intervention.";
        assert_eq!(
            extract_description(raw),
            "The entire canopy is covered in a fine grey mold that has spread from the \
             lower leaves to the growing tips over what looks like several weeks of humid \
             weather without any intervention..."
        );
    }

    #[test]
    fn test_description_fallback() {
        assert_eq!(extract_description("no labels at all here"), FALLBACK_DESCRIPTION);
    }

    #[test]
    fn test_treatment_and_prevention_sections() {
        let raw = "3. **Recommended treatments:** Apply copper fungicide\nremove infected leaves\n\
                   4. **Prevention measures:** Rotate crops yearly\n5. Recovery timeline: two weeks";
        assert_eq!(
            extract_treatment(raw),
            "Apply copper fungicide remove infected leaves"
        );
        assert_eq!(extract_prevention(raw), "Rotate crops yearly");
    }

    #[test]
    fn test_treatment_fallback() {
        assert_eq!(extract_treatment("nothing here"), FALLBACK_TREATMENT);
        assert_eq!(extract_prevention("nothing here"), FALLBACK_PREVENTION);
    }

    #[test]
    fn test_section_not_terminated_by_same_line_prose() {
        let raw = "Treatment: spray in the evening\nkeep soil dry";
        assert_eq!(extract_treatment(raw), "spray in the evening keep soil dry");
    }

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences("One here. Two there! Three everywhere? Four");
        assert_eq!(
            sentences,
            vec!["One here.", "Two there!", "Three everywhere?", "Four"]
        );
    }

    #[test]
    fn test_split_sentences_ignores_decimals() {
        let sentences = split_sentences("Apply 1.5 ml per liter. Repeat weekly.");
        assert_eq!(sentences, vec!["Apply 1.5 ml per liter.", "Repeat weekly."]);
    }

    #[test]
    fn test_extractors_total_on_adversarial_input() {
        let inputs = ["", "::::", "\n\n\n", "%%%%%", "Disease:", "1234567890"];
        for raw in inputs {
            assert!(!extract_disease(raw).is_empty());
            assert!(extract_confidence(raw) <= 100);
            assert!(!extract_description(raw).is_empty());
            assert!(!extract_treatment(raw).is_empty());
            assert!(!extract_prevention(raw).is_empty());
        }
    }
}
