//! The fixed provider set.
//!
//! Providers are a closed enum matched exhaustively; adding one is a
//! compile-time-checked change. Unknown tags are handled once, at the parse
//! boundary, and become an "Unknown provider" verdict rather than an error.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four AI API vendors this tool understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Google,
    Anthropic,
    OpenAi,
    Xai,
}

impl Provider {
    /// All providers, in validation order.
    pub const ALL: [Self; 4] = [Self::Google, Self::Anthropic, Self::OpenAi, Self::Xai];

    /// The canonical lowercase tag.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Anthropic => "anthropic",
            Self::OpenAi => "openai",
            Self::Xai => "xai",
        }
    }

    /// Parse a provider tag (case-insensitive). Returns `None` for anything
    /// outside the supported set.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "google" => Some(Self::Google),
            "anthropic" => Some(Self::Anthropic),
            "openai" => Some(Self::OpenAi),
            "xai" => Some(Self::Xai),
            _ => None,
        }
    }

    /// Comma-separated list of supported tags, for error messages.
    pub fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_canonical_tags() {
        for provider in Provider::ALL {
            assert_eq!(Provider::parse(provider.as_str()), Some(provider));
        }
    }

    #[test]
    fn parse_is_case_insensitive_and_trimmed() {
        assert_eq!(Provider::parse("  Google "), Some(Provider::Google));
        assert_eq!(Provider::parse("OPENAI"), Some(Provider::OpenAi));
    }

    #[test]
    fn parse_rejects_unknown_tags() {
        assert_eq!(Provider::parse("mistral"), None);
        assert_eq!(Provider::parse(""), None);
    }

    #[test]
    fn supported_list_names_all_four() {
        assert_eq!(Provider::supported_list(), "google, anthropic, openai, xai");
    }
}
