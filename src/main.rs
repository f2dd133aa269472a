//! APIProbe - API configuration validator CLI.
//!
//! Exit codes: 0 when all checks pass, 1 when any check fails or an
//! unexpected error escapes to the top level, 130 on interrupt.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::Result;
use apiprobe::auth::{mask_api_key, resolve_api_key};
use apiprobe::cli::{Cli, Commands, OutputFormat, split_csv};
use apiprobe::config_diff::config_diff;
use apiprobe::http::Client;
use apiprobe::model::{ConfigDiff, Severity, ValidationResult};
use apiprobe::output::{format_json, format_markdown, format_result, format_table};
use apiprobe::provider::Provider;
use apiprobe::{providers, validate};
use clap::{CommandFactory as _, Parser as _};
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Interrupt is the only cancellation mechanism; give it a distinct exit
    // status so callers can tell "aborted" from "failed".
    let _ = ctrlc::set_handler(|| {
        eprintln!("\n[!] Operation cancelled");
        std::process::exit(130);
    });

    match main_impl() {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("[X] Error: {err}");
            ExitCode::from(1)
        }
    }
}

fn main_impl() -> Result<u8> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(0);
    };

    let use_color = !cli.no_color && io::stdout().is_terminal();
    let env_path = cli.env.as_deref();
    let client = Client::new();

    match command {
        Commands::ListModels {
            provider,
            api_version,
            api_key,
        } => {
            let Some(api_key) = api_key
                .or_else(|| Provider::parse(&provider).and_then(|p| resolve_api_key(p, env_path)))
            else {
                println!("[X] No API key found for {provider}");
                println!("    Set {}_API_KEY or use --api-key", provider.to_ascii_uppercase());
                return Ok(1);
            };
            debug!(provider = provider.as_str(), key = mask_api_key(&api_key).as_str(), "listing models");

            let models =
                providers::list_models(&client, &provider, &api_key, api_version.as_deref());
            if cli.format == OutputFormat::Json {
                println!("{}", format_json(&models));
            } else if models.is_empty() {
                println!("[!] No models found for {provider}");
            } else {
                let headers = ["Model Name", "Display Name", "Input Limit"];
                let rows: Vec<Vec<String>> = models
                    .iter()
                    .map(|m| {
                        vec![
                            m.name.clone(),
                            m.display_name.clone(),
                            if m.input_token_limit == 0 {
                                "N/A".to_string()
                            } else {
                                m.input_token_limit.to_string()
                            },
                        ]
                    })
                    .collect();
                println!("\n{} Models ({} found):\n", provider.to_ascii_uppercase(), models.len());
                println!("{}", format_table(&headers, &rows));
            }
            Ok(0)
        }

        Commands::TestModel {
            provider,
            model,
            features,
            api_version,
            api_key,
        } => {
            let Some(api_key) = api_key
                .or_else(|| Provider::parse(&provider).and_then(|p| resolve_api_key(p, env_path)))
            else {
                println!("[X] No API key found for {provider}");
                return Ok(1);
            };
            debug!(provider = provider.as_str(), key = mask_api_key(&api_key).as_str(), "testing model");

            let features = features.as_deref().map(split_csv).unwrap_or_default();
            let result = providers::test_model(
                &client,
                &provider,
                &model,
                &api_key,
                &features,
                api_version.as_deref(),
            );

            if cli.format == OutputFormat::Json {
                println!("{}", format_json(&result));
            } else {
                println!("{}", format_result(&result, use_color));
            }
            Ok(u8::from(!result.success))
        }

        Commands::ConfigDiff { db, code } => {
            let diffs = config_diff(&db, code.as_deref());
            if cli.format == OutputFormat::Json {
                println!("{}", format_json(&diffs));
                return Ok(u8::from(diffs.iter().any(|d| d.severity == Severity::Error)));
            }

            if diffs.is_empty() {
                println!("[OK] No configuration differences found");
                return Ok(0);
            }
            println!("\nConfiguration Differences Found ({}):\n", diffs.len());
            for diff in &diffs {
                print_diff(diff);
            }
            Ok(u8::from(diffs.iter().any(|d| d.severity == Severity::Error)))
        }

        Commands::ValidateAll { db, providers } => {
            let providers_filter = providers.as_deref().map(split_csv);
            let results = validate::validate_all(
                &client,
                env_path,
                db.as_deref(),
                providers_filter.as_deref(),
            );

            match cli.format {
                OutputFormat::Json => println!("{}", format_json(&results)),
                OutputFormat::Markdown => println!("{}", format_markdown(&results)),
                OutputFormat::Table => print_validation_report(&results, use_color),
            }

            let failed = results.iter().filter(|r| !r.success).count();
            Ok(u8::from(failed > 0))
        }
    }
}

fn print_diff(diff: &ConfigDiff) {
    println!("[{}] {}", diff.severity.as_str().to_ascii_uppercase(), diff.field);
    println!("    DB value:   {}", display_value(&diff.db_value));
    println!("    Code value: {}", display_value(&diff.code_value));
    println!("    {}\n", diff.message);
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

fn print_validation_report(results: &[ValidationResult], use_color: bool) {
    let banner = "=".repeat(60);
    println!("\n{banner}");
    println!("  APIProbe Validation Report");
    println!("{banner}\n");

    for result in results {
        println!("{}\n", format_result(result, use_color));
    }

    let passed = results.iter().filter(|r| r.success).count();
    let failed = results.len() - passed;
    println!("{banner}");
    println!("  Summary: {passed} passed, {failed} failed");
    println!("{banner}");
}
