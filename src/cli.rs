//! CLI argument parsing using Clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// APIProbe - API configuration validator
#[derive(Parser, Debug)]
#[command(name = "apiprobe")]
#[command(version, about, long_about = None)]
#[command(after_help = "Examples:
  apiprobe list-models --provider google
  apiprobe test-model --provider google --model gemini-2.0-flash
  apiprobe test-model --provider google --model gemini-2.0-flash --features systemInstruction,tools
  apiprobe config-diff --db data/comms.db --code backend/
  apiprobe validate-all --env .env --db data/comms.db

Supported Providers:
  google     - Google Gemini (API key: GOOGLE_API_KEY)
  anthropic  - Anthropic Claude (API key: ANTHROPIC_API_KEY)
  openai     - OpenAI GPT (API key: OPENAI_API_KEY)
  xai        - xAI Grok (API key: XAI_API_KEY)
")]
pub struct Cli {
    /// Path to .env file with API keys
    #[arg(long, global = true)]
    pub env: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Markdown,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Markdown => "markdown",
        };
        f.write_str(name)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List available models
    ListModels {
        /// AI provider
        #[arg(long, value_parser = ["google", "anthropic", "openai", "xai"])]
        provider: String,

        /// API version (e.g., v1, v1beta)
        #[arg(long)]
        api_version: Option<String>,

        /// API key (overrides environment)
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Test a specific model
    TestModel {
        /// AI provider
        #[arg(long, value_parser = ["google", "anthropic", "openai", "xai"])]
        provider: String,

        /// Model name to test
        #[arg(long)]
        model: String,

        /// Comma-separated features to test
        #[arg(long)]
        features: Option<String>,

        /// API version (e.g., v1, v1beta)
        #[arg(long)]
        api_version: Option<String>,

        /// API key (overrides environment)
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Compare DB vs code config
    ConfigDiff {
        /// Database file path
        #[arg(long)]
        db: PathBuf,

        /// Code directory or file
        #[arg(long)]
        code: Option<PathBuf>,
    },

    /// Full validation
    ValidateAll {
        /// Database file path
        #[arg(long)]
        db: Option<PathBuf>,

        /// Comma-separated list of providers
        #[arg(long)]
        providers: Option<String>,
    },
}

/// Split a comma-separated CLI list, dropping empty segments.
pub fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}
