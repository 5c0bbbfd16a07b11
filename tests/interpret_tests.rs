//! End-to-end tests for interpreting raw analysis text.
//!
//! These exercise the public interpretation surface the way a diagnosis
//! page uses it: one raw blob in, one fully-populated result out.

use cropsight::diagnosis::normalize;
use cropsight::{Severity, classify_severity, interpret};

#[test]
fn test_structured_response_end_to_end() {
    let raw = "Health assessment: 2\nIdentified disease: Late Blight\n\
               Treatment: Apply copper fungicide\nPrevention: Use resistant varieties";
    let result = interpret(raw);

    assert_eq!(result.disease, "Late Blight");
    assert_eq!(result.severity, Severity::High);
    assert_eq!(result.treatment, "Apply copper fungicide");
    assert_eq!(result.prevention, "Use resistant varieties");
    // No explicit percentage or out-of-ten rating is present, so the
    // confidence heuristic defaults to 50.
    assert_eq!(result.confidence, 50);
}

#[test]
fn test_markdown_heavy_response() {
    let raw = "## Crop Analysis\n\n\
               1. **Health assessment:** 6/10\n\
               2. **Identified diseases/threats:** *Powdery Mildew*\n\
               3. **Recommended treatments:** Apply `sulfur dust` weekly\n\
               4. **Prevention measures:** Improve air circulation\n\
               5. **Expected recovery timeline:** 2-3 weeks";
    let result = interpret(raw);

    assert_eq!(result.disease, "Powdery Mildew");
    assert_eq!(result.severity, Severity::Moderate);
    assert_eq!(result.confidence, 60);
    assert_eq!(result.treatment, "Apply sulfur dust weekly");
    assert_eq!(result.prevention, "Improve air circulation");
    assert!(!result.description.contains('*'));
}

#[test]
fn test_unstructured_prose_still_yields_a_result() {
    let raw = "The plant in this photo appears to be tomato leaf curl, \
               a moderate case by the look of the younger leaves.";
    let result = interpret(raw);

    assert_eq!(result.disease, "tomato leaf curl");
    assert_eq!(result.confidence, 65); // "moderate" keyword heuristic
    assert_eq!(result.severity, Severity::Low); // no assessment score
}

#[test]
fn test_every_field_populated_on_arbitrary_input() {
    let inputs = [
        "",
        "no recognizable structure whatsoever",
        "1234567890 %% :: \n\n\n",
        "```json\n{\"not\": \"prose\"}\n```",
    ];
    for raw in inputs {
        let result = interpret(raw);
        assert!(!result.disease.is_empty(), "disease empty for {raw:?}");
        assert!(!result.description.is_empty(), "description empty for {raw:?}");
        assert!(!result.treatment.is_empty(), "treatment empty for {raw:?}");
        assert!(!result.prevention.is_empty(), "prevention empty for {raw:?}");
        assert!(result.confidence <= 100);
    }
}

#[test]
fn test_confidence_clamped_on_adversarial_numbers() {
    assert_eq!(interpret("confidence: 250%").confidence, 100);
    assert_eq!(interpret("Score: 99/10").confidence, 100);
}

#[test]
fn test_severity_classification_table() {
    assert_eq!(classify_severity("Health assessment: 3"), Severity::High);
    assert_eq!(classify_severity("Health assessment: 6"), Severity::Moderate);
    assert_eq!(classify_severity("Health assessment: 9"), Severity::Low);
    assert_eq!(classify_severity("no marker here"), Severity::Low);
}

#[test]
fn test_disease_fallback_literal() {
    let result = interpret("Everything looks green and unremarkable today.");
    assert_eq!(result.disease, "Plant Health Concern");
}

#[test]
fn test_long_description_summarized_to_two_sentences() {
    let raw = "Description: The leaves show large brown patches spreading inward from the \
               margins, and many have already curled at the edges under the stress. \
               The stems remain firm for now. It is critical to act within days. \
               Yield loss is likely either way.";
    let summary = interpret(raw).description;

    assert!(summary.ends_with("..."), "expected ellipsis: {summary}");
    // First sentence plus the importance-keyword sentence, nothing else.
    assert!(summary.starts_with("The leaves show large brown patches"));
    assert!(summary.contains("critical to act within days"));
    assert!(!summary.contains("stems remain firm"));
    assert!(!summary.contains("Yield loss"));
    let sentence_count = summary.matches(". ").count() + 1;
    assert_eq!(sentence_count, 2, "expected two sentences: {summary}");
}

#[test]
fn test_short_description_returned_unmodified() {
    let raw = "Description: Small dark spots on lower leaves.\nTreatment: none needed";
    assert_eq!(interpret(raw).description, "Small dark spots on lower leaves.");
}

#[test]
fn test_normalizer_idempotent_through_public_api() {
    let raw = "**Late** blight\n\nspreading on  `leaves`";
    let once = normalize(raw);
    assert_eq!(normalize(&once), once);
}

#[test]
fn test_result_serializes_for_the_ui() {
    let result = interpret("Health assessment: 2\nDisease: Late Blight");
    let json = serde_json::to_value(&result).expect("result should serialize");
    assert_eq!(json["disease"], "Late Blight");
    assert_eq!(json["severity"], "high");
    assert!(json["confidence"].is_u64());
}
