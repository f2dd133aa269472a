//! API key resolution and masking.
//!
//! Resolution order per provider: recognized process environment variables
//! first, then the optional `.env` file - first match wins, and file values
//! never override already-set environment values.
//!
//! The `.env` parser is deliberately minimal and side-effect free (it never
//! mutates the process environment): line-oriented `KEY=VALUE`, blank lines
//! and `#` comments ignored, surrounding single or double quotes stripped.

use crate::provider::Provider;
use crate::provider_metadata::auth_env_keys;
use std::collections::HashMap;
use std::path::Path;

/// Load environment variables from a `.env`-style file.
///
/// A nonexistent or unreadable file yields an empty mapping.
pub fn load_env_file(path: &Path) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    let Ok(content) = std::fs::read_to_string(path) else {
        return vars;
    };

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = strip_quotes(value.trim());
        if !key.is_empty() {
            vars.insert(key.to_string(), value.to_string());
        }
    }
    vars
}

fn strip_quotes(value: &str) -> &str {
    if value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')))
    {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Resolve the API key for a provider from the environment or a `.env` file.
pub fn resolve_api_key(provider: Provider, env_path: Option<&Path>) -> Option<String> {
    let file_vars = env_path.map(load_env_file).unwrap_or_default();

    for key_name in auth_env_keys(provider) {
        match std::env::var(key_name) {
            Ok(value) if !value.is_empty() => return Some(value),
            _ => {}
        }
        match file_vars.get(*key_name) {
            Some(value) if !value.is_empty() => return Some(value.clone()),
            _ => {}
        }
    }
    None
}

/// Mask an API key for display, showing only the first and last 4 characters.
///
/// Keys of 8 characters or fewer are fully masked.
pub fn mask_api_key(key: &str) -> String {
    const VISIBLE: usize = 4;
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= VISIBLE * 2 {
        return "***".to_string();
    }
    let head: String = chars[..VISIBLE].iter().collect();
    let tail: String = chars[chars.len() - VISIBLE..].iter().collect();
    format!("{head}...{tail}")
}
