//! Canonical provider knowledge shared across all checks.
//!
//! This module is intentionally data-first: it centralizes endpoint URLs,
//! default API versions, auth env keys, model-name patterns, the per-version
//! feature-support matrix, and the known model-name corrections, so the
//! lister/tester/diff paths don't drift independently. Pure lookups, no I/O;
//! every table is a compiled-in constant and is never mutated.

use crate::provider::Provider;
use regex::Regex;
use std::sync::LazyLock;

// ============================================================================
// Endpoints
// ============================================================================

/// Base endpoint URL for one (provider, API version) pair.
#[derive(Debug, Clone, Copy)]
pub struct Endpoint {
    pub provider: Provider,
    pub version: &'static str,
    pub base_url: &'static str,
}

pub const ENDPOINTS: &[Endpoint] = &[
    Endpoint {
        provider: Provider::Google,
        version: "v1",
        base_url: "https://generativelanguage.googleapis.com/v1",
    },
    Endpoint {
        provider: Provider::Google,
        version: "v1beta",
        base_url: "https://generativelanguage.googleapis.com/v1beta",
    },
    Endpoint {
        provider: Provider::Anthropic,
        version: "v1",
        base_url: "https://api.anthropic.com/v1",
    },
    Endpoint {
        provider: Provider::OpenAi,
        version: "v1",
        base_url: "https://api.openai.com/v1",
    },
    Endpoint {
        provider: Provider::Xai,
        version: "v1",
        base_url: "https://api.x.ai/v1",
    },
];

/// Resolve a provider's base endpoint for a given API version.
///
/// `None` means the provider has no endpoint for that version; callers must
/// handle it (typically by returning an empty model list).
pub fn endpoint_base_url(provider: Provider, version: &str) -> Option<&'static str> {
    ENDPOINTS
        .iter()
        .find(|e| e.provider == provider && e.version == version)
        .map(|e| e.base_url)
}

// ============================================================================
// Default API versions
// ============================================================================

const DEFAULT_API_VERSIONS: &[(Provider, &str)] = &[
    (Provider::Google, "v1beta"),
    (Provider::Anthropic, "v1"),
    (Provider::OpenAi, "v1"),
    (Provider::Xai, "v1"),
];

/// The API version used when the caller does not specify one.
pub fn default_api_version(provider: Provider) -> &'static str {
    DEFAULT_API_VERSIONS
        .iter()
        .find(|(p, _)| *p == provider)
        .map_or("v1", |(_, v)| v)
}

// ============================================================================
// Auth environment keys
// ============================================================================

/// Recognized API-key environment variable names, in resolution order.
pub const fn auth_env_keys(provider: Provider) -> &'static [&'static str] {
    match provider {
        Provider::Google => &["GOOGLE_API_KEY", "GEMINI_API_KEY"],
        Provider::Anthropic => &["ANTHROPIC_API_KEY", "CLAUDE_API_KEY"],
        Provider::OpenAi => &["OPENAI_API_KEY"],
        Provider::Xai => &["XAI_API_KEY", "GROK_API_KEY"],
    }
}

// ============================================================================
// Model name patterns
// ============================================================================

const GOOGLE_MODEL_PATTERN: &str = r"gemini[\w\-\.]*";
const ANTHROPIC_MODEL_PATTERN: &str = r"claude[\w\-\.]*";
const OPENAI_MODEL_PATTERN: &str = r"gpt[\w\-\.]*|o1[\w\-\.]*|chatgpt[\w\-\.]*";
const XAI_MODEL_PATTERN: &str = r"grok[\w\-\.]*";

static GOOGLE_MODEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(GOOGLE_MODEL_PATTERN).expect("static pattern"));
static ANTHROPIC_MODEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ANTHROPIC_MODEL_PATTERN).expect("static pattern"));
static OPENAI_MODEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(OPENAI_MODEL_PATTERN).expect("static pattern"));
static XAI_MODEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(XAI_MODEL_PATTERN).expect("static pattern"));

/// The expected model-name pattern for a provider.
pub fn model_pattern(provider: Provider) -> &'static str {
    match provider {
        Provider::Google => GOOGLE_MODEL_PATTERN,
        Provider::Anthropic => ANTHROPIC_MODEL_PATTERN,
        Provider::OpenAi => OPENAI_MODEL_PATTERN,
        Provider::Xai => XAI_MODEL_PATTERN,
    }
}

/// Whether a model identifier matches the provider's expected naming
/// pattern. Used to filter mixed catalogs from discovery endpoints.
pub fn model_name_matches(provider: Provider, id: &str) -> bool {
    let re: &Regex = match provider {
        Provider::Google => &GOOGLE_MODEL_RE,
        Provider::Anthropic => &ANTHROPIC_MODEL_RE,
        Provider::OpenAi => &OPENAI_MODEL_RE,
        Provider::Xai => &XAI_MODEL_RE,
    };
    re.is_match(&id.to_ascii_lowercase())
}

// ============================================================================
// Feature support
// ============================================================================

/// Known feature-support entry for one (provider, version, feature) triple.
///
/// Absence from [`FEATURE_SUPPORT`] means "unknown, must probe live"; only
/// an explicit `supported: false` short-circuits a network call.
#[derive(Debug, Clone, Copy)]
pub struct FeatureSupport {
    pub provider: Provider,
    pub version: &'static str,
    pub feature: &'static str,
    pub supported: bool,
}

pub const FEATURE_SUPPORT: &[FeatureSupport] = &[
    // Google v1 lacks systemInstruction and tools; v1beta has both.
    FeatureSupport { provider: Provider::Google, version: "v1", feature: "systemInstruction", supported: false },
    FeatureSupport { provider: Provider::Google, version: "v1", feature: "tools", supported: false },
    FeatureSupport { provider: Provider::Google, version: "v1", feature: "generationConfig", supported: true },
    FeatureSupport { provider: Provider::Google, version: "v1beta", feature: "systemInstruction", supported: true },
    FeatureSupport { provider: Provider::Google, version: "v1beta", feature: "tools", supported: true },
    FeatureSupport { provider: Provider::Google, version: "v1beta", feature: "generationConfig", supported: true },
    FeatureSupport { provider: Provider::Anthropic, version: "v1", feature: "system", supported: true },
    FeatureSupport { provider: Provider::Anthropic, version: "v1", feature: "tools", supported: true },
    FeatureSupport { provider: Provider::Anthropic, version: "v1", feature: "max_tokens", supported: true },
    FeatureSupport { provider: Provider::OpenAi, version: "v1", feature: "system", supported: true },
    FeatureSupport { provider: Provider::OpenAi, version: "v1", feature: "functions", supported: true },
    FeatureSupport { provider: Provider::OpenAi, version: "v1", feature: "tools", supported: true },
    FeatureSupport { provider: Provider::OpenAi, version: "v1", feature: "response_format", supported: true },
    FeatureSupport { provider: Provider::Xai, version: "v1", feature: "system", supported: true },
    // Limited tool support on xAI.
    FeatureSupport { provider: Provider::Xai, version: "v1", feature: "tools", supported: false },
];

/// Whether a feature is known to be supported under (provider, version).
///
/// `None` means the triple is not in the table (unknown).
pub fn feature_support(provider: Provider, version: &str, feature: &str) -> Option<bool> {
    FEATURE_SUPPORT
        .iter()
        .find(|f| f.provider == provider && f.version == version && f.feature == feature)
        .map(|f| f.supported)
}

// ============================================================================
// Model corrections
// ============================================================================

/// A documented wrong model name and its correction.
#[derive(Debug, Clone, Copy)]
pub struct ModelCorrection {
    pub provider: Provider,
    pub incorrect: &'static str,
    pub correct: &'static str,
}

pub const MODEL_CORRECTIONS: &[ModelCorrection] = &[
    ModelCorrection {
        provider: Provider::Google,
        incorrect: "gemini-2.0-flash-exp",
        correct: "gemini-2.0-flash",
    },
    // Common mistake: no such model family exists.
    ModelCorrection {
        provider: Provider::Google,
        incorrect: "gemini-3-flash-preview",
        correct: "gemini-1.5-flash",
    },
];

/// Look up the correction for a known-bad model name under one provider.
pub fn model_correction(provider: Provider, name: &str) -> Option<&'static str> {
    MODEL_CORRECTIONS
        .iter()
        .find(|c| c.provider == provider && c.incorrect == name)
        .map(|c| c.correct)
}

/// Look up a known-bad model name across all providers (config-diff path).
pub fn any_model_correction(name: &str) -> Option<&'static ModelCorrection> {
    MODEL_CORRECTIONS.iter().find(|c| c.incorrect == name)
}
