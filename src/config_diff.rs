//! Configuration drift detection between a deployed datastore and code.
//!
//! Schema discovery is heuristic by design: tables are selected by name
//! keywords and columns by name fragments, because the source system's real
//! schema is unknown. False positives and negatives are expected and
//! accepted; the same applies to the source-text scrape, whose loose
//! assignment patterns will happily match unrelated variables named `model`.

use crate::model::{ConfigDiff, Severity};
use crate::provider_metadata::any_model_correction;
use ignore::WalkBuilder;
use regex::Regex;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// Table-name keywords that mark a table as configuration-bearing.
const TABLE_KEYWORDS: [&str; 4] = ["provider", "model", "ai", "config"];

/// Column-name fragments that mark a column as a model/name field.
const COLUMN_KEYWORDS: [&str; 2] = ["model", "name"];

/// Source-file extensions included in the code scrape.
const CODE_EXTENSIONS: [&str; 5] = ["py", "rs", "js", "ts", "toml"];

/// Assignment patterns matched against source text, one captured value each.
const CODE_PATTERNS: [&str; 4] = [
    r#"(?i)model\s*[=:]\s*["']([^"']+)["']"#,
    r#"(?i)MODEL\s*[=:]\s*["']([^"']+)["']"#,
    r#"(?i)default_model\s*[=:]\s*["']([^"']+)["']"#,
    r#"(?i)model_name\s*[=:]\s*["']([^"']+)["']"#,
];

/// Compare datastore configuration against known-good values and code.
///
/// Returns an ordered list of differences. The only fatal condition is an
/// unreadable datastore, reported as a single error-severity diff; missing
/// files likewise yield exactly one error diff. Per-table read failures are
/// skipped.
pub fn config_diff(db_path: &Path, code_path: Option<&Path>) -> Vec<ConfigDiff> {
    if !db_path.exists() {
        return vec![ConfigDiff {
            field: "database".to_string(),
            db_value: Value::Null,
            code_value: Value::String(db_path.display().to_string()),
            severity: Severity::Error,
            message: format!("Database file not found: {}", db_path.display()),
        }];
    }

    let db_config = match read_db_config(db_path) {
        Ok(config) => config,
        Err(e) => {
            return vec![ConfigDiff {
                field: "database".to_string(),
                db_value: Value::Null,
                code_value: Value::String(db_path.display().to_string()),
                severity: Severity::Error,
                message: format!("Database error: {e}"),
            }];
        }
    };

    let mut diffs = Vec::new();

    // Known-bad model names in the datastore are errors regardless of what
    // the code says.
    for (field, value) in &db_config {
        if let Value::String(text) = value {
            if let Some(correction) = any_model_correction(text) {
                diffs.push(ConfigDiff {
                    field: field.clone(),
                    db_value: value.clone(),
                    code_value: Value::String(correction.correct.to_string()),
                    severity: Severity::Error,
                    message: "Deprecated/incorrect model name in database".to_string(),
                });
            }
        }
    }

    if let Some(code_path) = code_path {
        if code_path.exists() {
            let code_config = extract_config_from_code(code_path);
            for (field, db_value) in &db_config {
                let field_name = field.rsplit('.').next().unwrap_or(field).to_ascii_lowercase();
                for (code_field, code_value) in &code_config {
                    if code_field.to_ascii_lowercase().contains(&field_name)
                        && db_value != &Value::String(code_value.clone())
                    {
                        diffs.push(ConfigDiff {
                            field: field.clone(),
                            db_value: db_value.clone(),
                            code_value: Value::String(code_value.clone()),
                            severity: Severity::Warning,
                            message: "Configuration drift detected".to_string(),
                        });
                    }
                }
            }
        }
    }

    diffs
}

/// Scan configuration-looking tables for model/name columns.
///
/// Keyed by `table.column`; later rows overwrite earlier ones, keeping the
/// scan cheap and deterministic.
fn read_db_config(db_path: &Path) -> rusqlite::Result<BTreeMap<String, Value>> {
    let conn = Connection::open_with_flags(db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;

    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table'")?;
    let tables: Vec<String> = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<_>>()?;
    drop(stmt);

    let mut config = BTreeMap::new();
    for table in tables {
        let lowered = table.to_ascii_lowercase();
        if !TABLE_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
            continue;
        }
        if let Err(e) = scan_table(&conn, &table, &mut config) {
            warn!(table = table.as_str(), error = %e, "skipping unreadable table");
        }
    }

    Ok(config)
}

fn scan_table(
    conn: &Connection,
    table: &str,
    config: &mut BTreeMap<String, Value>,
) -> rusqlite::Result<()> {
    // Table names come from sqlite_master, not user input; quoting guards
    // against names with spaces or keywords.
    let mut stmt = conn.prepare(&format!("SELECT * FROM \"{}\"", table.replace('"', "\"\"")))?;
    let columns: Vec<String> = stmt.column_names().iter().map(ToString::to_string).collect();

    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        for (index, column) in columns.iter().enumerate() {
            let lowered = column.to_ascii_lowercase();
            if !COLUMN_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
                continue;
            }
            let value = match row.get_ref(index)? {
                ValueRef::Null => Value::Null,
                ValueRef::Integer(i) => Value::from(i),
                ValueRef::Real(f) => Value::from(f),
                ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
                ValueRef::Blob(_) => continue,
            };
            config.insert(format!("{table}.{column}"), value);
        }
    }
    Ok(())
}

/// Extract configuration values from source text.
///
/// One value per `file:field` key; later matches overwrite earlier ones,
/// mirroring the breadth/precision trade-off documented above.
fn extract_config_from_code(code_path: &Path) -> BTreeMap<String, String> {
    let patterns: Vec<Regex> = CODE_PATTERNS
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect();

    let files: Vec<std::path::PathBuf> = if code_path.is_file() {
        vec![code_path.to_path_buf()]
    } else {
        WalkBuilder::new(code_path)
            .build()
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
            .map(ignore::DirEntry::into_path)
            .filter(|path| {
                path.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|ext| CODE_EXTENSIONS.contains(&ext))
            })
            .collect()
    };

    let mut config = BTreeMap::new();
    for path in files {
        let Ok(content) = std::fs::read_to_string(&path) else {
            continue;
        };
        let file_name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        for pattern in &patterns {
            for captures in pattern.captures_iter(&content) {
                if let Some(value) = captures.get(1) {
                    debug!(file = file_name.as_str(), value = value.as_str(), "code config match");
                    config.insert(format!("{file_name}:model"), value.as_str().to_string());
                }
            }
        }
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_patterns_match_loose_assignments() {
        let patterns: Vec<Regex> = CODE_PATTERNS.iter().filter_map(|p| Regex::new(p).ok()).collect();
        assert_eq!(patterns.len(), CODE_PATTERNS.len());

        let source = r#"
            model = "gemini-2.0-flash"
            DEFAULT_MODEL: 'gpt-4o'
            model_name = "claude-3-opus-20240229"
        "#;
        let matched: Vec<&str> = patterns
            .iter()
            .flat_map(|p| p.captures_iter(source))
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect();
        assert!(matched.contains(&"gemini-2.0-flash"));
        assert!(matched.contains(&"gpt-4o"));
        assert!(matched.contains(&"claude-3-opus-20240229"));
    }
}
