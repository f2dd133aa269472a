//! Short-circuit paths of the model tester.
//!
//! Every verdict in this file must be produced without a network call; the
//! client's request counter is asserted to stay at zero throughout.

use apiprobe::http::Client;
use apiprobe::model::CheckKind;
use apiprobe::providers::test_model;
use pretty_assertions::assert_eq;
use serde_json::json;

const DUMMY_KEY: &str = "test-key-not-real-0000";

// ═══════════════════════════════════════════════════════════════════════
// Unknown provider
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn unknown_provider_fails_without_network() {
    let client = Client::new();
    for tag in ["mistral", "cohere", "deepseek", "", "database"] {
        let result = test_model(&client, tag, "some-model", DUMMY_KEY, &[], None);
        assert!(!result.success);
        assert_eq!(result.check_kind, CheckKind::ModelTest);
        assert!(
            result.message.contains("Unknown provider"),
            "message was: {}",
            result.message
        );
        assert!(
            result
                .suggestions
                .iter()
                .any(|s| s.contains("google") && s.contains("anthropic")),
            "suggestions must list the supported set"
        );
    }
    assert_eq!(client.request_count(), 0);
}

// ═══════════════════════════════════════════════════════════════════════
// Known-bad model names
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn known_bad_name_fails_with_correction_and_no_network() {
    let client = Client::new();
    let result = test_model(
        &client,
        "google",
        "gemini-3-flash-preview",
        DUMMY_KEY,
        &[],
        None,
    );

    assert!(!result.success);
    assert_eq!(result.check_kind, CheckKind::ModelTest);
    assert!(result.message.contains("incorrect or deprecated"));
    assert_eq!(result.details["requested_model"], json!("gemini-3-flash-preview"));
    assert_eq!(result.details["corrected_model"], json!("gemini-1.5-flash"));
    assert!(
        result.suggestions.iter().any(|s| s.contains("gemini-1.5-flash")),
        "suggestion must name the corrected model"
    );
    assert_eq!(client.request_count(), 0, "correction check must not hit the network");
}

#[test]
fn every_documented_correction_short_circuits() {
    let client = Client::new();
    for correction in apiprobe::provider_metadata::MODEL_CORRECTIONS {
        let result = test_model(
            &client,
            correction.provider.as_str(),
            correction.incorrect,
            DUMMY_KEY,
            &[],
            None,
        );
        assert!(!result.success, "{} should fail", correction.incorrect);
        assert_eq!(result.details["requested_model"], json!(correction.incorrect));
        assert_eq!(result.details["corrected_model"], json!(correction.correct));
    }
    assert_eq!(client.request_count(), 0);
}

// ═══════════════════════════════════════════════════════════════════════
// Known-unsupported features
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn unsupported_feature_fails_as_feature_validation() {
    let client = Client::new();
    let result = test_model(
        &client,
        "google",
        "gemini-2.0-flash",
        DUMMY_KEY,
        &["systemInstruction".to_string()],
        Some("v1"),
    );

    assert!(!result.success);
    assert_eq!(result.check_kind, CheckKind::FeatureValidation);
    assert!(result.message.contains("systemInstruction"));
    assert_eq!(result.details["api_version"], json!("v1"));
    assert_eq!(result.details["unsupported_features"], json!(["systemInstruction"]));
    assert_eq!(client.request_count(), 0, "feature check must not hit the network");
}

#[test]
fn all_unsupported_features_are_collected_together() {
    let client = Client::new();
    let result = test_model(
        &client,
        "google",
        "gemini-2.0-flash",
        DUMMY_KEY,
        &["systemInstruction".to_string(), "tools".to_string(), "generationConfig".to_string()],
        Some("v1"),
    );

    assert!(!result.success);
    assert_eq!(result.check_kind, CheckKind::FeatureValidation);
    // generationConfig is supported on v1 and must not be flagged.
    assert_eq!(
        result.details["unsupported_features"],
        json!(["systemInstruction", "tools"])
    );
    assert_eq!(client.request_count(), 0);
}

#[test]
fn xai_tools_are_known_unsupported() {
    let client = Client::new();
    let result = test_model(&client, "xai", "grok-2", DUMMY_KEY, &["tools".to_string()], None);
    assert!(!result.success);
    assert_eq!(result.check_kind, CheckKind::FeatureValidation);
    assert_eq!(client.request_count(), 0);
}

#[test]
fn unknown_features_do_not_short_circuit_the_decision_order() {
    // A feature absent from the table means "probe live": with a known-bad
    // model name the correction check must still win first.
    let client = Client::new();
    let result = test_model(
        &client,
        "google",
        "gemini-2.0-flash-exp",
        DUMMY_KEY,
        &["candidateCount".to_string()],
        None,
    );
    assert_eq!(result.check_kind, CheckKind::ModelTest);
    assert!(result.message.contains("incorrect or deprecated"));
    assert_eq!(client.request_count(), 0);
}

#[test]
fn correction_check_wins_over_feature_check() {
    let client = Client::new();
    let result = test_model(
        &client,
        "google",
        "gemini-3-flash-preview",
        DUMMY_KEY,
        &["systemInstruction".to_string()],
        Some("v1"),
    );
    assert_eq!(result.check_kind, CheckKind::ModelTest);
    assert!(result.details.contains_key("corrected_model"));
    assert_eq!(client.request_count(), 0);
}
