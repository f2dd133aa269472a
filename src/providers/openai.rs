//! OpenAI API: model discovery and smoke testing.
//!
//! The discovery endpoint returns a mixed catalog (embeddings, audio,
//! moderation, ...); listings are filtered down to chat-capable families via
//! the knowledge base's model-name pattern.

use super::{SMOKE_TEST_FUNCTION, SMOKE_TEST_PROMPT, SMOKE_TEST_SYSTEM, error_message};
use crate::http::Client;
use crate::model::{CheckKind, ModelInfo, ValidationResult};
use crate::provider::Provider;
use crate::provider_metadata::{default_api_version, endpoint_base_url, model_name_matches};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

// ============================================================================
// Request/response types
// ============================================================================

#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionsRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<OpenAiTool>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct OpenAiTool {
    r#type: String,
    function: OpenAiFunction,
}

#[derive(Debug, Serialize)]
struct OpenAiFunction {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Debug, Deserialize)]
struct ModelsListResponse {
    #[serde(default)]
    data: Vec<ModelRecord>,
}

#[derive(Debug, Deserialize)]
struct ModelRecord {
    #[serde(default)]
    id: String,
}

fn base_url() -> Option<&'static str> {
    endpoint_base_url(Provider::OpenAi, default_api_version(Provider::OpenAi))
}

// ============================================================================
// Listing
// ============================================================================

/// List chat-capable models from the OpenAI catalog.
pub(crate) fn list_models(client: &Client, api_key: &str) -> Vec<ModelInfo> {
    let Some(base) = base_url() else {
        return Vec::new();
    };

    let (status, body) = client
        .get(format!("{base}/models"))
        .header("Authorization", format!("Bearer {api_key}"))
        .send();
    if status != 200 {
        return Vec::new();
    }

    let Ok(parsed) = serde_json::from_value::<ModelsListResponse>(body) else {
        return Vec::new();
    };

    parsed
        .data
        .into_iter()
        .filter(|record| !record.id.is_empty() && model_name_matches(Provider::OpenAi, &record.id))
        .map(|record| ModelInfo::new(record.id, Provider::OpenAi.as_str()))
        .collect()
}

// ============================================================================
// Smoke test
// ============================================================================

/// Build the minimal chat-completions body, encoding requested features in
/// OpenAI's native request shape.
pub(crate) fn build_test_request(model: &str, features: &[String]) -> ChatCompletionsRequest {
    let has = |name: &str| features.iter().any(|f| f == name);

    let mut messages = vec![ChatMessage {
        role: "user".to_string(),
        content: SMOKE_TEST_PROMPT.to_string(),
    }];
    if has("system") {
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
        tools: has("tools").then(|| {
            vec![OpenAiTool {
                r#type: "function".to_string(),
                function: OpenAiFunction {
                    name: SMOKE_TEST_FUNCTION.0.to_string(),
                    description: SMOKE_TEST_FUNCTION.1.to_string(),
                    parameters: json!({ "type": "object", "properties": {} }),
                },
            }]
        }),
    }
}

/// Run the live smoke test against an OpenAI model.
pub(crate) fn test_model(
    client: &Client,
    model: &str,
    api_key: &str,
    features: &[String],
) -> ValidationResult {
    let Some(base) = base_url() else {
        return ValidationResult::fail(
            Provider::OpenAi.as_str(),
            CheckKind::ModelTest,
            "No openai endpoint configured",
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
            Provider::OpenAi.as_str(),
            CheckKind::ModelTest,
            format!("Model '{model}' is working correctly"),
        )
        .with_detail("model", model)
        .with_detail("features_tested", features.to_vec())
    } else {
        ValidationResult::fail(
            Provider::OpenAi.as_str(),
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

    #[test]
    fn system_feature_prepends_a_system_message() {
        let request = build_test_request("gpt-4o", &["system".into()]);
        let value = serde_json::to_value(&request).expect("serializes");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["role"], "user");
    }

    #[test]
    fn tools_feature_declares_a_function() {
        let request = build_test_request("gpt-4o", &["tools".into()]);
        let value = serde_json::to_value(&request).expect("serializes");
        assert_eq!(value["tools"][0]["type"], "function");
        assert_eq!(value["tools"][0]["function"]["name"], "test_function");
    }

    #[test]
    fn error_classification_carries_status_and_body() {
        let body = serde_json::json!({ "error": { "message": "insufficient_quota" } });
        let verdict = classify_test_response("gpt-4o", &[], 429, &body);
        assert!(!verdict.success);
        assert!(verdict.message.contains("insufficient_quota"));
        assert_eq!(verdict.details["status"], 429);
    }
}
