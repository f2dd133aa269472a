//! Renderer contracts shared by all commands.

use apiprobe::model::{CheckKind, ModelInfo, ValidationResult};
use apiprobe::output::{format_json, format_markdown, format_table};
use pretty_assertions::assert_eq;
use serde_json::Value;

#[test]
fn zero_rows_render_the_no_data_literal() {
    assert_eq!(format_table(&["Model Name", "Display Name"], &[]), "No data");
}

#[test]
fn columns_are_right_truncated_at_fifty_chars() {
    let long = "m".repeat(100);
    let rows = vec![vec![long.clone(), "short".to_string()]];
    let table = format_table(&["Model Name", "Display Name"], &rows);

    for line in table.lines() {
        for segment in line.split(" | ") {
            assert!(
                segment.chars().count() <= 50,
                "segment exceeds cap: {segment:?}"
            );
        }
    }
    // The value is truncated, not wrapped.
    assert!(table.contains(&"m".repeat(50)));
    assert!(!table.contains(&"m".repeat(51)));
}

#[test]
fn table_aligns_header_separator_and_rows() {
    let rows = vec![
        vec!["gemini-2.0-flash".to_string(), "Gemini 2.0 Flash".to_string()],
        vec!["gpt-4o".to_string(), "GPT-4o".to_string()],
    ];
    let table = format_table(&["Model Name", "Display Name"], &rows);
    let lines: Vec<&str> = table.lines().collect();

    assert_eq!(lines.len(), 4);
    let width = lines[0].chars().count();
    assert!(lines.iter().all(|l| l.chars().count() == width), "ragged table:\n{table}");
    assert!(lines[1].chars().all(|c| c == '-' || c == '+'));
}

#[test]
fn json_rendering_mirrors_record_attributes() {
    let models = vec![
        ModelInfo::new("grok-2", "xai").with_display_name("Grok 2"),
        ModelInfo::new("grok-beta", "xai"),
    ];
    let rendered = format_json(&models);
    let parsed: Value = serde_json::from_str(&rendered).expect("valid JSON");

    assert_eq!(parsed[0]["name"], "grok-2");
    assert_eq!(parsed[0]["display_name"], "Grok 2");
    assert_eq!(parsed[1]["display_name"], "grok-beta");
    assert_eq!(parsed[0]["input_token_limit"], 0);
    assert!(rendered.contains('\n'), "JSON output is indented");
}

#[test]
fn markdown_report_counts_passed_and_failed() {
    let results = vec![
        ValidationResult::pass("google", CheckKind::ListModels, "Found 12 models for google"),
        ValidationResult::fail("xai", CheckKind::ApiKey, "No API key found for xai")
            .with_suggestion("Set XAI_API_KEY environment variable"),
    ];
    let report = format_markdown(&results);

    assert!(report.starts_with("# APIProbe Validation Report"));
    assert!(report.contains("- **Passed:** 1"));
    assert!(report.contains("- **Failed:** 1"));
    assert!(report.contains("- **Total:** 2"));
    assert!(report.contains("### [OK] GOOGLE - list_models"));
    assert!(report.contains("### [X] XAI - api_key"));
    assert!(report.contains("- Set XAI_API_KEY environment variable"));
}
