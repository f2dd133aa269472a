//! Google Gemini API: model discovery and smoke testing.
//!
//! Google is the one provider with two parallel endpoint families (v1 and
//! v1beta) whose feature support differs; the resolved API version is
//! threaded through both listing and testing.

use super::{SMOKE_TEST_FUNCTION, SMOKE_TEST_PROMPT, SMOKE_TEST_SYSTEM, error_message};
use crate::http::Client;
use crate::model::{CheckKind, ModelInfo, ValidationResult};
use crate::provider::Provider;
use crate::provider_metadata::endpoint_base_url;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

// ============================================================================
// Request/response types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    contents: Vec<GoogleContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GoogleContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<GoogleTool>>,
}

#[derive(Debug, Serialize)]
struct GoogleContent {
    parts: Vec<GooglePart>,
}

#[derive(Debug, Serialize)]
struct GooglePart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GoogleTool {
    function_declarations: Vec<GoogleFunctionDeclaration>,
}

#[derive(Debug, Serialize)]
struct GoogleFunctionDeclaration {
    name: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ModelsListResponse {
    #[serde(default)]
    models: Vec<GoogleModelRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleModelRecord {
    #[serde(default)]
    name: String,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    input_token_limit: u32,
    #[serde(default)]
    output_token_limit: u32,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

// ============================================================================
// Listing
// ============================================================================

/// List models from the Gemini discovery endpoint.
pub(crate) fn list_models(client: &Client, api_key: &str, api_version: &str) -> Vec<ModelInfo> {
    let Some(base_url) = endpoint_base_url(Provider::Google, api_version) else {
        return Vec::new();
    };
    let Ok(mut url) = Url::parse(&format!("{base_url}/models")) else {
        return Vec::new();
    };
    url.query_pairs_mut().append_pair("key", api_key);

    let (status, body) = client.get(url.as_str()).send();
    if status != 200 {
        return Vec::new();
    }

    let Ok(parsed) = serde_json::from_value::<ModelsListResponse>(body) else {
        return Vec::new();
    };

    parsed
        .models
        .into_iter()
        .map(|record| {
            // Record names arrive as "models/<id>".
            let name = record
                .name
                .strip_prefix("models/")
                .unwrap_or(&record.name)
                .to_string();
            ModelInfo::new(name, Provider::Google.as_str())
                .with_display_name(record.display_name)
                .with_description(record.description)
                .with_input_token_limit(record.input_token_limit)
                .with_output_token_limit(record.output_token_limit)
                .with_supported_features(record.supported_generation_methods)
        })
        .collect()
}

// ============================================================================
// Smoke test
// ============================================================================

/// Build the minimal `generateContent` body, encoding requested features in
/// Google's native request shape.
pub(crate) fn build_test_request(features: &[String]) -> GenerateContentRequest {
    let has = |name: &str| features.iter().any(|f| f == name);

    GenerateContentRequest {
        contents: vec![GoogleContent {
            parts: vec![GooglePart {
                text: SMOKE_TEST_PROMPT.to_string(),
            }],
        }],
        system_instruction: has("systemInstruction").then(|| GoogleContent {
            parts: vec![GooglePart {
                text: SMOKE_TEST_SYSTEM.to_string(),
            }],
        }),
        tools: has("tools").then(|| {
            vec![GoogleTool {
                function_declarations: vec![GoogleFunctionDeclaration {
                    name: SMOKE_TEST_FUNCTION.0.to_string(),
                    description: SMOKE_TEST_FUNCTION.1.to_string(),
                }],
            }]
        }),
    }
}

/// Run the live smoke test against a Gemini model.
pub(crate) fn test_model(
    client: &Client,
    model: &str,
    api_key: &str,
    api_version: &str,
    features: &[String],
) -> ValidationResult {
    let Some(base_url) = endpoint_base_url(Provider::Google, api_version) else {
        return ValidationResult::fail(
            Provider::Google.as_str(),
            CheckKind::ModelTest,
            format!("No google endpoint for API version '{api_version}'"),
        )
        .with_detail("api_version", api_version)
        .with_suggestion("Known google API versions: v1, v1beta");
    };
    let Ok(mut url) = Url::parse(&format!("{base_url}/models/{model}:generateContent")) else {
        return ValidationResult::fail(
            Provider::Google.as_str(),
            CheckKind::ModelTest,
            format!("Model name '{model}' does not form a valid request URL"),
        )
        .with_suggestion("Check if the model name is spelled correctly");
    };
    url.query_pairs_mut().append_pair("key", api_key);

    let (status, body) = client
        .post(url.as_str())
        .json(&build_test_request(features))
        .send();
    classify_test_response(model, api_version, features, status, &body)
}

/// Map a `generateContent` response onto a validation verdict.
pub(crate) fn classify_test_response(
    model: &str,
    api_version: &str,
    features: &[String],
    status: u16,
    body: &Value,
) -> ValidationResult {
    match status {
        200 => ValidationResult::pass(
            Provider::Google.as_str(),
            CheckKind::ModelTest,
            format!("Model '{model}' is working correctly"),
        )
        .with_detail("model", model)
        .with_detail("api_version", api_version)
        .with_detail("features_tested", features.to_vec()),
        404 => ValidationResult::fail(
            Provider::Google.as_str(),
            CheckKind::ModelTest,
            format!("Model '{model}' not found"),
        )
        .with_detail("error", body.clone())
        .with_detail("api_version", api_version)
        .with_suggestion("Run 'apiprobe list-models --provider google' to see available models")
        .with_suggestion("Check if the model name is spelled correctly"),
        400 => ValidationResult::fail(
            Provider::Google.as_str(),
            CheckKind::ModelTest,
            format!("Bad request: {}", error_message(body)),
        )
        .with_detail("error", body.clone())
        .with_detail("api_version", api_version)
        .with_detail("features", features.to_vec())
        .with_suggestion("Check if the API version supports the requested features")
        .with_suggestion("Try with api_version='v1beta' for full feature support"),
        _ => ValidationResult::fail(
            Provider::Google.as_str(),
            CheckKind::ModelTest,
            format!("API error (status {status})"),
        )
        .with_detail("error", body.clone())
        .with_detail("status", status),
    }
}
