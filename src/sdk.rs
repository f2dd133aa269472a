//! Programmatic facade for embedding the validator in other tools.
//!
//! Unlike the CLI (which prints and sets an exit code), the facade surfaces
//! a missing API key as [`Error::Auth`]. Everything else follows the same
//! error-as-value policy as the underlying checks.

use crate::auth::resolve_api_key;
use crate::config_diff;
use crate::error::{Error, Result};
use crate::http::Client;
use crate::model::{ConfigDiff, ModelInfo, ValidationResult};
use crate::provider::Provider;
use crate::{providers, validate};
use std::path::{Path, PathBuf};

/// Handle on the validator with a fixed `.env` path and a shared client.
#[derive(Debug, Clone, Default)]
pub struct Probe {
    env_path: Option<PathBuf>,
    client: Client,
}

impl Probe {
    /// Create a probe resolving keys from the process environment only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a probe that also consults a `.env` file.
    pub fn with_env_path(env_path: impl Into<PathBuf>) -> Self {
        Self {
            env_path: Some(env_path.into()),
            client: Client::new(),
        }
    }

    /// Replace the HTTP client (custom timeout, test instrumentation).
    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    fn require_key(&self, provider: &str) -> Result<String> {
        Provider::parse(provider)
            .and_then(|p| resolve_api_key(p, self.env_path.as_deref()))
            .ok_or_else(|| Error::auth(format!("No API key found for {provider}")))
    }

    /// List available models for a provider.
    pub fn list_models(&self, provider: &str, api_version: Option<&str>) -> Result<Vec<ModelInfo>> {
        let api_key = self.require_key(provider)?;
        Ok(providers::list_models(&self.client, provider, &api_key, api_version))
    }

    /// Test a specific model.
    pub fn test_model(
        &self,
        provider: &str,
        model: &str,
        features: &[String],
        api_version: Option<&str>,
    ) -> Result<ValidationResult> {
        let api_key = self.require_key(provider)?;
        Ok(providers::test_model(
            &self.client,
            provider,
            model,
            &api_key,
            features,
            api_version,
        ))
    }

    /// Compare datastore configuration against code defaults.
    pub fn config_diff(&self, db_path: &Path, code_path: Option<&Path>) -> Vec<ConfigDiff> {
        config_diff::config_diff(db_path, code_path)
    }

    /// Full validation of all (or the given) providers.
    pub fn validate_all(
        &self,
        db_path: Option<&Path>,
        providers_filter: Option<&[String]>,
    ) -> Vec<ValidationResult> {
        validate::validate_all(
            &self.client,
            self.env_path.as_deref(),
            db_path,
            providers_filter,
        )
    }
}
