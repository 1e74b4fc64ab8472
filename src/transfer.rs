//! JSON import/export of the command list.
//!
//! Import is lenient per entry: every field is coerced to text, label and
//! insert are trimmed, and entries left without a label or insert are dropped.
//! The payload as a whole is rejected only when it is not an array or when
//! no entry survives.

use anyhow::Result;
use serde_json::{Map, Value};

use crate::{
    error::{SnippetError, SnippetResult},
    model::Snippet,
};

pub fn import_snippets(raw: &str) -> SnippetResult<Vec<Snippet>> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| SnippetError::InvalidFormat(format!("invalid JSON: {e}")))?;
    let Value::Array(entries) = value else {
        return Err(SnippetError::InvalidFormat(
            "JSON is not an array.".to_string(),
        ));
    };

    let total = entries.len();
    let cleaned: Vec<Snippet> = entries
        .iter()
        .filter_map(Value::as_object)
        .map(clean_entry)
        .filter(Snippet::is_valid)
        .collect();

    if cleaned.is_empty() {
        return Err(SnippetError::InvalidFormat(
            "No valid command entries found.".to_string(),
        ));
    }

    if cleaned.len() < total {
        tracing::warn!(
            kept = cleaned.len(),
            dropped = total - cleaned.len(),
            "import dropped invalid entries"
        );
    }
    Ok(cleaned)
}

pub fn export_snippets(snippets: &[Snippet]) -> Result<String> {
    Ok(serde_json::to_string_pretty(snippets)?)
}

fn clean_entry(entry: &Map<String, Value>) -> Snippet {
    let field = |name: &str| entry.get(name).map(coerce_text).unwrap_or_default();
    Snippet {
        label: field("label").trim().to_string(),
        insert: field("insert").trim().to_string(),
        hint: field("hint"),
    }
}

/// Loose string conversion: falsy values become empty, everything else its
/// display text.
fn coerce_text(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::Bool(true) => "true".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f == 0.0 || f.is_nan() => String::new(),
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => {
                format!("{f:.0}")
            }
            _ => n.to_string(),
        },
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                Value::Bool(false) => "false".to_string(),
                Value::Number(n) if n.as_f64() == Some(0.0) => "0".to_string(),
                other => coerce_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}
