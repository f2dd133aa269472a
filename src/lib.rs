//! APIProbe - AI provider configuration validator.
//!
//! Validates that configured AI-provider settings (API key, model name, API
//! version, requested features) actually work against the live endpoint, and
//! flags drift between a deployed datastore and values hard-coded in source.
//! A pre-deployment sanity checker, not a long-running service: fully
//! synchronous, one fresh round trip per check, no retries, no caching.

pub mod auth;
pub mod cli;
pub mod config_diff;
pub mod error;
pub mod http;
pub mod model;
pub mod output;
pub mod provider;
pub mod provider_metadata;
pub mod providers;
pub mod sdk;
pub mod validate;

pub use error::{Error, Result};
pub use sdk::Probe;
