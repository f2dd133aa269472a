//! Output renderers: ASCII table, JSON, Markdown, and the one-line result
//! formatter used by the table format.
//!
//! Columns are capped at 50 characters and right-truncated; renderers never
//! fail, they only format what they are given.

use crate::model::ValidationResult;
use serde::Serialize;

const MAX_COLUMN_WIDTH: usize = 50;

const GREEN: &str = "\x1b[92m";
const RED: &str = "\x1b[91m";
const RESET: &str = "\x1b[0m";

/// Format rows as a fixed-width ASCII table. Zero rows render as "No data".
pub fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return "No data".to_string();
    }

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let cells = rows.iter().filter_map(|row| row.get(i));
            let max = cells
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.chars().count());
            max.min(MAX_COLUMN_WIDTH)
        })
        .collect();

    let header_line = headers
        .iter()
        .enumerate()
        .map(|(i, header)| pad_or_truncate(header, widths[i]))
        .collect::<Vec<_>>()
        .join(" | ");
    let separator = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("-+-");

    let mut lines = vec![header_line, separator];
    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(i, width)| pad_or_truncate(row.get(i).map_or("", String::as_str), *width))
            .collect::<Vec<_>>()
            .join(" | ");
        lines.push(line);
    }
    lines.join("\n")
}

fn pad_or_truncate(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let len = out.chars().count();
    if len < width {
        out.extend(std::iter::repeat_n(' ', width - len));
    }
    out
}

/// Format one validation result for terminal display.
pub fn format_result(result: &ValidationResult, use_color: bool) -> String {
    let tag = if result.success { "[OK]" } else { "[X]" };
    let status = if use_color {
        let color = if result.success { GREEN } else { RED };
        format!("{color}{tag}{RESET}")
    } else {
        tag.to_string()
    };

    let mut output = format!(
        "{status} [{}] {}",
        result.provider.to_ascii_uppercase(),
        result.message
    );
    if !result.suggestions.is_empty() {
        output.push_str("\n    Suggestions:");
        for suggestion in &result.suggestions {
            output.push_str(&format!("\n      - {suggestion}"));
        }
    }
    output
}

/// Format any serializable record (or list of records) as indented JSON.
pub fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}

/// Format results as a Markdown report with a summary and one subsection per
/// result.
pub fn format_markdown(results: &[ValidationResult]) -> String {
    let mut lines = vec![
        "# APIProbe Validation Report".to_string(),
        String::new(),
        format!("**Generated:** {}", chrono::Local::now().to_rfc3339()),
        String::new(),
    ];

    let passed = results.iter().filter(|r| r.success).count();
    let failed = results.len() - passed;
    lines.push("## Summary".to_string());
    lines.push(format!("- **Passed:** {passed}"));
    lines.push(format!("- **Failed:** {failed}"));
    lines.push(format!("- **Total:** {}", results.len()));
    lines.push(String::new());

    lines.push("## Details".to_string());
    for result in results {
        let tag = if result.success { "[OK]" } else { "[X]" };
        lines.push(format!(
            "### {tag} {} - {}",
            result.provider.to_ascii_uppercase(),
            result.check_kind
        ));
        lines.push(result.message.clone());
        if !result.suggestions.is_empty() {
            lines.push("**Suggestions:**".to_string());
            for suggestion in &result.suggestions {
                lines.push(format!("- {suggestion}"));
            }
        }
        lines.push(String::new());
    }

    lines.join("\n")
}
