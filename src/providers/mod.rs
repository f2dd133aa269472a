//! Per-provider model listing and smoke testing.
//!
//! This module owns the dispatch over the fixed provider set and the
//! short-circuit decision order for model tests. Concrete request building
//! and response classification live in the per-provider submodules.

use crate::http::Client;
use crate::model::{CheckKind, ModelInfo, ValidationResult};
use crate::provider::Provider;
use crate::provider_metadata::{default_api_version, feature_support, model_correction};
use serde_json::Value;
use tracing::debug;

pub mod anthropic;
pub mod google;
pub mod openai;
pub mod xai;

/// List available models for a provider.
///
/// Never fails: unknown providers, unreachable endpoints, and malformed
/// responses all produce an empty sequence.
pub fn list_models(
    client: &Client,
    provider: &str,
    api_key: &str,
    api_version: Option<&str>,
) -> Vec<ModelInfo> {
    let Some(provider) = Provider::parse(provider) else {
        return Vec::new();
    };
    let api_version = api_version.unwrap_or_else(|| default_api_version(provider));
    debug!(%provider, api_version, "listing models");

    match provider {
        Provider::Google => google::list_models(client, api_key, api_version),
        Provider::Anthropic => anthropic::list_models(client, api_key),
        Provider::OpenAi => openai::list_models(client, api_key),
        Provider::Xai => xai::list_models(client, api_key),
    }
}

/// Test a model, with optional feature validation.
///
/// Decision order, first match wins:
/// 1. unknown provider tag - verdict without any lookup or network call;
/// 2. documented wrong model name - verdict from the correction table;
/// 3. features explicitly marked unsupported for (provider, version);
/// 4. live smoke test, classified per provider.
pub fn test_model(
    client: &Client,
    provider: &str,
    model: &str,
    api_key: &str,
    features: &[String],
    api_version: Option<&str>,
) -> ValidationResult {
    let Some(parsed) = Provider::parse(provider) else {
        return ValidationResult::fail(
            provider,
            CheckKind::ModelTest,
            format!("Unknown provider: {provider}"),
        )
        .with_suggestion(format!(
            "Supported providers: {}",
            Provider::supported_list()
        ));
    };
    let api_version = api_version.unwrap_or_else(|| default_api_version(parsed));

    if let Some(corrected) = model_correction(parsed, model) {
        return ValidationResult::fail(
            parsed.as_str(),
            CheckKind::ModelTest,
            format!("Model name '{model}' is incorrect or deprecated"),
        )
        .with_detail("requested_model", model)
        .with_detail("corrected_model", corrected)
        .with_suggestion(format!("Use '{corrected}' instead of '{model}'"));
    }

    let unsupported: Vec<String> = features
        .iter()
        .filter(|f| feature_support(parsed, api_version, f) == Some(false))
        .cloned()
        .collect();
    if !unsupported.is_empty() {
        return ValidationResult::fail(
            parsed.as_str(),
            CheckKind::FeatureValidation,
            format!(
                "Features not supported in {api_version}: {}",
                unsupported.join(", ")
            ),
        )
        .with_detail("requested_features", features.to_vec())
        .with_detail("unsupported_features", unsupported.clone())
        .with_detail("api_version", api_version)
        .with_suggestion("Use a different API version (e.g., v1beta for Google)")
        .with_suggestion(format!(
            "Remove unsupported features: {}",
            unsupported.join(", ")
        ));
    }

    debug!(provider = %parsed, model, api_version, "running live smoke test");
    match parsed {
        Provider::Google => google::test_model(client, model, api_key, api_version, features),
        Provider::Anthropic => anthropic::test_model(client, model, api_key, features),
        Provider::OpenAi => openai::test_model(client, model, api_key, features),
        Provider::Xai => xai::test_model(client, model, api_key, features),
    }
}

/// Extract the provider's own error text from a response body, falling back
/// to the whole payload.
pub(crate) fn error_message(body: &Value) -> String {
    body.get("error")
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .map_or_else(|| body.to_string(), ToString::to_string)
}

/// The short prompt every smoke test sends.
pub(crate) const SMOKE_TEST_PROMPT: &str = "Say 'test successful'";

/// System text used when a system-style feature is requested.
pub(crate) const SMOKE_TEST_SYSTEM: &str = "You are a test assistant.";

/// Name/description of the throwaway function declared when tool support is
/// being probed.
pub(crate) const SMOKE_TEST_FUNCTION: (&str, &str) = ("test_function", "A test function");
