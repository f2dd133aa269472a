//! Full-run orchestration: list + test per provider, plus config drift.
//!
//! Strictly sequential: providers are processed one after another, and
//! within a provider, listing happens before testing. No state is shared
//! between steps beyond the read-only knowledge base.

use crate::auth::resolve_api_key;
use crate::config_diff::config_diff;
use crate::http::Client;
use crate::model::{CheckKind, Severity, ValidationResult};
use crate::provider::Provider;
use crate::providers;
use serde_json::Value;
use std::path::Path;
use tracing::info;

/// Validate every configured provider, then check the datastore if given.
pub fn validate_all(
    client: &Client,
    env_path: Option<&Path>,
    db_path: Option<&Path>,
    providers_filter: Option<&[String]>,
) -> Vec<ValidationResult> {
    let selected: Vec<String> = providers_filter.map_or_else(
        || Provider::ALL.iter().map(|p| p.as_str().to_string()).collect(),
        <[String]>::to_vec,
    );

    let mut results = Vec::new();
    for provider_tag in &selected {
        info!(provider = provider_tag.as_str(), "validating provider");
        results.extend(validate_provider(client, provider_tag, env_path));
    }

    if let Some(db_path) = db_path {
        if db_path.exists() {
            for diff in config_diff(db_path, None) {
                let success = diff.severity != Severity::Error;
                let mut result = ValidationResult {
                    success,
                    provider: "database".to_string(),
                    check_kind: CheckKind::ConfigDiff,
                    message: diff.message.clone(),
                    details: serde_json::Map::new(),
                    suggestions: Vec::new(),
                };
                if let Ok(Value::Object(map)) = serde_json::to_value(&diff) {
                    result.details = map;
                }
                results.push(result);
            }
        }
    }

    results
}

fn validate_provider(
    client: &Client,
    provider_tag: &str,
    env_path: Option<&Path>,
) -> Vec<ValidationResult> {
    let api_key = Provider::parse(provider_tag)
        .and_then(|provider| resolve_api_key(provider, env_path));
    let Some(api_key) = api_key else {
        return vec![
            ValidationResult::fail(
                provider_tag,
                CheckKind::ApiKey,
                format!("No API key found for {provider_tag}"),
            )
            .with_suggestion(format!(
                "Set {}_API_KEY environment variable",
                provider_tag.to_ascii_uppercase()
            ))
            .with_suggestion("Or provide a .env file with the API key"),
        ];
    };

    let mut results = Vec::new();
    let models = providers::list_models(client, provider_tag, &api_key, None);
    if models.is_empty() {
        results.push(
            ValidationResult::fail(
                provider_tag,
                CheckKind::ListModels,
                format!("Could not list models for {provider_tag}"),
            )
            .with_suggestion("Check API key validity")
            .with_suggestion("Check network connection"),
        );
        return results;
    }

    let preview: Vec<String> = models.iter().take(5).map(|m| m.name.clone()).collect();
    results.push(
        ValidationResult::pass(
            provider_tag,
            CheckKind::ListModels,
            format!("Found {} models for {provider_tag}", models.len()),
        )
        .with_detail("model_count", models.len())
        .with_detail("models", preview),
    );

    // Smoke-test the first listed model.
    results.push(providers::test_model(
        client,
        provider_tag,
        &models[0].name,
        &api_key,
        &[],
        None,
    ));

    results
}
