//! Anthropic Messages API: known-model inventory and smoke testing.
//!
//! Anthropic has no model-discovery endpoint, so listing works by probing a
//! single representative model to confirm the key, then returning a static,
//! maintained inventory. Only a clean authentication failure (401) empties
//! the list; any other outcome still returns the inventory.

use super::{SMOKE_TEST_FUNCTION, SMOKE_TEST_PROMPT, SMOKE_TEST_SYSTEM, error_message};
use crate::http::Client;
use crate::model::{CheckKind, ModelInfo, ValidationResult};
use crate::provider::Provider;
use crate::provider_metadata::{default_api_version, endpoint_base_url};
use serde::Serialize;
use serde_json::{Value, json};

const ANTHROPIC_API_VERSION: &str = "2023-06-01";
const PROBE_MODEL: &str = "claude-3-5-haiku-20241022";

// ============================================================================
// Request types
// ============================================================================

#[derive(Debug, Serialize)]
pub(crate) struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<AnthropicTool>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct AnthropicTool {
    name: String,
    description: String,
    input_schema: Value,
}

fn messages_url() -> Option<String> {
    endpoint_base_url(Provider::Anthropic, default_api_version(Provider::Anthropic))
        .map(|base| format!("{base}/messages"))
}

fn auth_headers(api_key: &str) -> [(&'static str, String); 2] {
    [
        ("x-api-key", api_key.to_string()),
        ("anthropic-version", ANTHROPIC_API_VERSION.to_string()),
    ]
}

// ============================================================================
// Listing
// ============================================================================

/// The static inventory returned once the key is confirmed.
pub(crate) fn known_models() -> Vec<ModelInfo> {
    [
        ("claude-opus-4-20250514", "Claude Opus 4"),
        ("claude-sonnet-4-20250514", "Claude Sonnet 4"),
        ("claude-3-5-sonnet-20241022", "Claude 3.5 Sonnet"),
        ("claude-3-5-haiku-20241022", "Claude 3.5 Haiku"),
        ("claude-3-opus-20240229", "Claude 3 Opus"),
    ]
    .into_iter()
    .map(|(name, display)| {
        ModelInfo::new(name, Provider::Anthropic.as_str())
            .with_display_name(display)
            .with_input_token_limit(200_000)
    })
    .collect()
}

/// Probe the key with a one-token request, then return the inventory.
pub(crate) fn list_models(client: &Client, api_key: &str) -> Vec<ModelInfo> {
    let Some(url) = messages_url() else {
        return Vec::new();
    };

    let probe = json!({
        "model": PROBE_MODEL,
        "max_tokens": 1,
        "messages": [{ "role": "user", "content": "Hi" }],
    });
    let mut request = client.post(url).json(&probe);
    for (name, value) in auth_headers(api_key) {
        request = request.header(name, value);
    }
    let (status, _body) = request.send();

    match status {
        200 | 201 => known_models(),
        401 => Vec::new(),
        // Can't confirm the inventory, but the key isn't provably bad.
        _ => known_models(),
    }
}

// ============================================================================
// Smoke test
// ============================================================================

/// Build the minimal messages body, encoding requested features in
/// Anthropic's native request shape.
pub(crate) fn build_test_request(model: &str, features: &[String]) -> MessagesRequest {
    let has = |name: &str| features.iter().any(|f| f == name);

    MessagesRequest {
        model: model.to_string(),
        max_tokens: 10,
        messages: vec![ChatMessage {
            role: "user".to_string(),
            content: SMOKE_TEST_PROMPT.to_string(),
        }],
        system: has("system").then(|| SMOKE_TEST_SYSTEM.to_string()),
        tools: has("tools").then(|| {
            vec![AnthropicTool {
                name: SMOKE_TEST_FUNCTION.0.to_string(),
                description: SMOKE_TEST_FUNCTION.1.to_string(),
                input_schema: json!({ "type": "object", "properties": {} }),
            }]
        }),
    }
}

/// Run the live smoke test against a Claude model.
pub(crate) fn test_model(
    client: &Client,
    model: &str,
    api_key: &str,
    features: &[String],
) -> ValidationResult {
    let Some(url) = messages_url() else {
        return ValidationResult::fail(
            Provider::Anthropic.as_str(),
            CheckKind::ModelTest,
            "No anthropic endpoint configured",
        );
    };

    let mut request = client.post(url).json(&build_test_request(model, features));
    for (name, value) in auth_headers(api_key) {
        request = request.header(name, value);
    }
    let (status, body) = request.send();
    classify_test_response(model, features, status, &body)
}

/// Map a messages response onto a validation verdict.
pub(crate) fn classify_test_response(
    model: &str,
    features: &[String],
    status: u16,
    body: &Value,
) -> ValidationResult {
    match status {
        200 | 201 => ValidationResult::pass(
            Provider::Anthropic.as_str(),
            CheckKind::ModelTest,
            format!("Model '{model}' is working correctly"),
        )
        .with_detail("model", model)
        .with_detail("features_tested", features.to_vec()),
        404 => ValidationResult::fail(
            Provider::Anthropic.as_str(),
            CheckKind::ModelTest,
            format!("Model '{model}' not found"),
        )
        .with_detail("error", body.clone())
        .with_suggestion("Check the Anthropic documentation for available models"),
        _ => ValidationResult::fail(
            Provider::Anthropic.as_str(),
            CheckKind::ModelTest,
            format!("API error: {}", error_message(body)),
        )
        .with_detail("error", body.clone())
        .with_detail("status", status),
    }
}
