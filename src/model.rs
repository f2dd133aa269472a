//! Shared record types: validation verdicts, model descriptors, config diffs.
//!
//! Every check function produces one of these immutable records; renderers
//! in [`crate::output`] are their only consumers. A failed
//! [`ValidationResult`] always carries a (possibly empty) suggestions list,
//! never a missing one - renderers rely on list semantics.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

// ============================================================================
// Check kinds
// ============================================================================

/// The kind of check that produced a [`ValidationResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    ApiKey,
    ListModels,
    ModelTest,
    FeatureValidation,
    ConfigDiff,
}

impl CheckKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ApiKey => "api_key",
            Self::ListModels => "list_models",
            Self::ModelTest => "model_test",
            Self::FeatureValidation => "feature_validation",
            Self::ConfigDiff => "config_diff",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Validation result
// ============================================================================

/// Outcome of one validation check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub success: bool,
    pub provider: String,
    pub check_kind: CheckKind,
    pub message: String,
    #[serde(default)]
    pub details: Map<String, Value>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl ValidationResult {
    /// Create a passing result.
    pub fn pass(provider: impl Into<String>, check_kind: CheckKind, message: impl Into<String>) -> Self {
        Self {
            success: true,
            provider: provider.into(),
            check_kind,
            message: message.into(),
            details: Map::new(),
            suggestions: Vec::new(),
        }
    }

    /// Create a failing result.
    pub fn fail(provider: impl Into<String>, check_kind: CheckKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            provider: provider.into(),
            check_kind,
            message: message.into(),
            details: Map::new(),
            suggestions: Vec::new(),
        }
    }

    /// Attach a detail entry.
    #[must_use]
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Attach a suggestion.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }
}

// ============================================================================
// Model descriptor
// ============================================================================

/// Descriptor of a model available from a provider.
///
/// Token limits default to 0, meaning "unknown". `display_name` falls back
/// to `name` at construction so downstream consumers never see an empty one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub provider: String,
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub input_token_limit: u32,
    #[serde(default)]
    pub output_token_limit: u32,
    #[serde(default)]
    pub supported_features: Vec<String>,
}

impl ModelInfo {
    /// Create a descriptor with the display name defaulted to the name.
    pub fn new(name: impl Into<String>, provider: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            provider: provider.into(),
            description: String::new(),
            input_token_limit: 0,
            output_token_limit: 0,
            supported_features: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        let display_name = display_name.into();
        if !display_name.is_empty() {
            self.display_name = display_name;
        }
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub const fn with_input_token_limit(mut self, limit: u32) -> Self {
        self.input_token_limit = limit;
        self
    }

    #[must_use]
    pub const fn with_output_token_limit(mut self, limit: u32) -> Self {
        self.output_token_limit = limit;
        self
    }

    #[must_use]
    pub fn with_supported_features(mut self, features: Vec<String>) -> Self {
        self.supported_features = features;
        self
    }
}

// ============================================================================
// Config diff
// ============================================================================

/// Severity of a detected configuration difference.
///
/// `Error` is reserved for known-incorrect model names and an unreadable
/// datastore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected discrepancy between datastore, code, and known-good values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigDiff {
    /// `table.column` for datastore fields, `file:field` for code fields.
    pub field: String,
    pub db_value: Value,
    pub code_value: Value,
    pub severity: Severity,
    pub message: String,
}
