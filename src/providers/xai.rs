//! xAI Grok API: model discovery and smoke testing.
//!
//! The listing endpoint has been observed returning both an OpenAI-style
//! `{"data": [...]}` envelope and a bare array; both shapes are accepted,
//! with a small static fallback inventory when neither yields anything.

use super::{SMOKE_TEST_PROMPT, SMOKE_TEST_SYSTEM, error_message};
use crate::http::Client;
use crate::model::{CheckKind, ModelInfo, ValidationResult};
use crate::provider::Provider;
use crate::provider_metadata::{default_api_version, endpoint_base_url};
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// Request types
// ============================================================================

#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionsRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

fn base_url() -> Option<&'static str> {
    endpoint_base_url(Provider::Xai, default_api_version(Provider::Xai))
}

// ============================================================================
// Listing
// ============================================================================

fn fallback_models() -> Vec<ModelInfo> {
    vec![
        ModelInfo::new("grok-beta", Provider::Xai.as_str()).with_display_name("Grok Beta"),
        ModelInfo::new("grok-2", Provider::Xai.as_str()).with_display_name("Grok 2"),
    ]
}

fn record_id(record: &Value) -> Option<String> {
    record
        .get("id")
        .or_else(|| record.get("name"))
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(ToString::to_string)
}

/// List models from the xAI endpoint, tolerating both response shapes.
pub(crate) fn list_models(client: &Client, api_key: &str) -> Vec<ModelInfo> {
    let Some(base) = base_url() else {
        return fallback_models();
    };

    let (status, body) = client
        .get(format!("{base}/models"))
        .header("Authorization", format!("Bearer {api_key}"))
        .send();

    let mut models = Vec::new();
    if status == 200 {
        let records = body
            .get("data")
            .and_then(Value::as_array)
            .or_else(|| body.as_array());
        if let Some(records) = records {
            models.extend(
                records
                    .iter()
                    .filter_map(record_id)
                    .map(|id| ModelInfo::new(id, Provider::Xai.as_str())),
            );
        }
    }

    if models.is_empty() {
        return fallback_models();
    }
    models
}

// ============================================================================
// Smoke test
// ============================================================================

/// Build the minimal chat-completions body. xAI only gets the system-message
/// feature encoding; its tool support is marked unsupported in the knowledge
/// base and short-circuits before reaching here.
pub(crate) fn build_test_request(model: &str, features: &[String]) -> ChatCompletionsRequest {
    let mut messages = vec![ChatMessage {
        role: "user".to_string(),
        content: SMOKE_TEST_PROMPT.to_string(),
    }];
    if features.iter().any(|f| f == "system") {
        messages.insert(
            0,
            ChatMessage {
                role: "system".to_string(),
                content: SMOKE_TEST_SYSTEM.to_string(),
            },
        );
    }

    ChatCompletionsRequest {
        model: model.to_string(),
        max_tokens: 10,
        messages,
    }
}

/// Run the live smoke test against a Grok model.
pub(crate) fn test_model(
    client: &Client,
    model: &str,
    api_key: &str,
    features: &[String],
) -> ValidationResult {
    let Some(base) = base_url() else {
        return ValidationResult::fail(
            Provider::Xai.as_str(),
            CheckKind::ModelTest,
            "No xai endpoint configured",
        );
    };

    let (status, body) = client
        .post(format!("{base}/chat/completions"))
        .header("Authorization", format!("Bearer {api_key}"))
        .json(&build_test_request(model, features))
        .send();
    classify_test_response(model, features, status, &body)
}

/// Map a chat-completions response onto a validation verdict.
pub(crate) fn classify_test_response(
    model: &str,
    features: &[String],
    status: u16,
    body: &Value,
) -> ValidationResult {
    if status == 200 {
        ValidationResult::pass(
            Provider::Xai.as_str(),
            CheckKind::ModelTest,
            format!("Model '{model}' is working correctly"),
        )
        .with_detail("model", model)
        .with_detail("features_tested", features.to_vec())
    } else {
        ValidationResult::fail(
            Provider::Xai.as_str(),
            CheckKind::ModelTest,
            format!("API error: {}", error_message(body)),
        )
        .with_detail("error", body.clone())
        .with_detail("status", status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_id_accepts_id_or_name() {
        assert_eq!(record_id(&json!({ "id": "grok-2" })), Some("grok-2".to_string()));
        assert_eq!(record_id(&json!({ "name": "grok-beta" })), Some("grok-beta".to_string()));
        assert_eq!(record_id(&json!({ "other": 1 })), None);
        assert_eq!(record_id(&json!({ "id": "" })), None);
    }

    #[test]
    fn fallback_inventory_is_used_when_nothing_lists() {
        let models = fallback_models();
        assert_eq!(models.len(), 2);
        assert_eq!(models[0].display_name, "Grok Beta");
    }

    #[test]
    fn system_feature_prepends_a_system_message() {
        let value = serde_json::to_value(build_test_request("grok-2", &["system".into()]))
            .expect("serializes");
        assert_eq!(value["messages"][0]["role"], "system");
    }
}
