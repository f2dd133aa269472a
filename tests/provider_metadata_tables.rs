//! Structural invariants over the provider knowledge base.
//!
//! These tables short-circuit live probes, so a bad entry silently changes
//! verdicts; every table is checked for internal consistency here.

use apiprobe::provider::Provider;
use apiprobe::provider_metadata::{
    ENDPOINTS, FEATURE_SUPPORT, MODEL_CORRECTIONS, auth_env_keys, default_api_version,
    endpoint_base_url, feature_support, model_correction, model_name_matches, model_pattern,
};
use std::collections::HashSet;

// ═══════════════════════════════════════════════════════════════════════
// Endpoints
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn endpoint_pairs_are_unique() {
    let mut seen = HashSet::new();
    for endpoint in ENDPOINTS {
        assert!(
            seen.insert((endpoint.provider, endpoint.version)),
            "duplicate endpoint entry: {} {}",
            endpoint.provider,
            endpoint.version
        );
    }
}

#[test]
fn endpoints_are_https_and_unversioned_suffix_matches() {
    for endpoint in ENDPOINTS {
        assert!(
            endpoint.base_url.starts_with("https://"),
            "{}: endpoint must use TLS",
            endpoint.provider
        );
        assert!(
            endpoint.base_url.ends_with(endpoint.version),
            "{}: base URL should end with its version segment",
            endpoint.provider
        );
        assert!(!endpoint.base_url.ends_with('/'));
    }
}

#[test]
fn every_provider_has_a_default_version_with_an_endpoint() {
    for provider in Provider::ALL {
        let version = default_api_version(provider);
        assert!(
            endpoint_base_url(provider, version).is_some(),
            "{provider}: default version '{version}' has no endpoint"
        );
    }
}

#[test]
fn unknown_versions_resolve_to_none() {
    for provider in Provider::ALL {
        assert_eq!(endpoint_base_url(provider, "v99"), None);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Auth env keys
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn every_provider_has_uppercase_env_keys() {
    for provider in Provider::ALL {
        let keys = auth_env_keys(provider);
        assert!(!keys.is_empty(), "{provider}: no recognized env keys");
        for key in keys {
            assert_eq!(*key, key.to_ascii_uppercase(), "{provider}: env key not uppercase");
            assert!(key.ends_with("_API_KEY"), "{provider}: unexpected env key shape: {key}");
        }
    }
}

#[test]
fn env_keys_do_not_collide_across_providers() {
    let mut seen = HashSet::new();
    for provider in Provider::ALL {
        for key in auth_env_keys(provider) {
            assert!(seen.insert(*key), "env key '{key}' claimed by two providers");
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Feature support
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn feature_triples_are_unique_and_reference_known_endpoints() {
    let mut seen = HashSet::new();
    for entry in FEATURE_SUPPORT {
        assert!(
            seen.insert((entry.provider, entry.version, entry.feature)),
            "duplicate feature entry: {} {} {}",
            entry.provider,
            entry.version,
            entry.feature
        );
        assert!(
            endpoint_base_url(entry.provider, entry.version).is_some(),
            "feature entry references unknown endpoint: {} {}",
            entry.provider,
            entry.version
        );
    }
}

#[test]
fn google_v1_marks_system_instruction_unsupported() {
    assert_eq!(feature_support(Provider::Google, "v1", "systemInstruction"), Some(false));
    assert_eq!(feature_support(Provider::Google, "v1", "tools"), Some(false));
    assert_eq!(feature_support(Provider::Google, "v1beta", "systemInstruction"), Some(true));
}

#[test]
fn absent_triples_mean_unknown_not_unsupported() {
    assert_eq!(feature_support(Provider::Anthropic, "v1", "thinking"), None);
    assert_eq!(feature_support(Provider::Xai, "v2", "system"), None);
}

// ═══════════════════════════════════════════════════════════════════════
// Model corrections and patterns
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn corrections_never_map_a_name_to_itself() {
    for correction in MODEL_CORRECTIONS {
        assert_ne!(
            correction.incorrect, correction.correct,
            "{}: correction maps to itself",
            correction.incorrect
        );
    }
}

#[test]
fn corrections_point_at_names_matching_the_provider_pattern() {
    for correction in MODEL_CORRECTIONS {
        assert!(
            model_name_matches(correction.provider, correction.correct),
            "{}: corrected name '{}' does not match pattern '{}'",
            correction.provider,
            correction.correct,
            model_pattern(correction.provider)
        );
    }
}

#[test]
fn corrected_names_are_never_themselves_corrections() {
    for correction in MODEL_CORRECTIONS {
        assert_eq!(
            model_correction(correction.provider, correction.correct),
            None,
            "correction chain detected via '{}'",
            correction.correct
        );
    }
}

#[test]
fn known_google_mistakes_are_present() {
    assert_eq!(
        model_correction(Provider::Google, "gemini-2.0-flash-exp"),
        Some("gemini-2.0-flash")
    );
    assert_eq!(
        model_correction(Provider::Google, "gemini-3-flash-preview"),
        Some("gemini-1.5-flash")
    );
}
