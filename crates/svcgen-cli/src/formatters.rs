//! Output formatters for command summaries.
//!
//! `json` is machine-readable, `text` is an indented plain listing and
//! `pretty` is the same listing with colors.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;
use svcgen_core::cli::OutputFormat;

/// Formats `data` according to `format`.
///
/// # Errors
///
/// Returns an error if `data` cannot be serialized.
///
/// # Examples
///
/// ```
/// use serde::Serialize;
/// use svcgen_cli::formatters::format_output;
/// use svcgen_core::cli::OutputFormat;
///
/// #[derive(Serialize)]
/// struct Summary {
///     generated_files: usize,
/// }
///
/// let output = format_output(&Summary { generated_files: 7 }, OutputFormat::Text)?;
/// assert_eq!(output, "generated_files: 7");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(data)?),
        OutputFormat::Text => {
            let value = serde_json::to_value(data)?;
            Ok(render(&value, &Plain))
        }
        OutputFormat::Pretty => {
            let value = serde_json::to_value(data)?;
            Ok(render(&value, &Colored))
        }
    }
}

trait Style {
    fn key(&self, key: &str) -> String;
    fn scalar(&self, value: &Value) -> String;
}

struct Plain;

impl Style for Plain {
    fn key(&self, key: &str) -> String {
        key.to_string()
    }

    fn scalar(&self, value: &Value) -> String {
        scalar_text(value)
    }
}

struct Colored;

impl Style for Colored {
    fn key(&self, key: &str) -> String {
        key.blue().bold().to_string()
    }

    fn scalar(&self, value: &Value) -> String {
        let text = scalar_text(value);
        match value {
            Value::Null => text.dimmed().to_string(),
            Value::Bool(_) => text.yellow().to_string(),
            Value::Number(_) => text.cyan().to_string(),
            _ => text.green().to_string(),
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) if items.is_empty() => "[]".to_string(),
        Value::Object(map) if map.is_empty() => "{}".to_string(),
        other => other.to_string(),
    }
}

fn is_scalar(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => true,
    }
}

fn render(value: &Value, style: &dyn Style) -> String {
    let mut lines = Vec::new();
    render_into(value, 0, style, &mut lines);
    lines.join("\n")
}

fn render_into(value: &Value, depth: usize, style: &dyn Style, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                if is_scalar(child) {
                    lines.push(format!("{indent}{}: {}", style.key(key), style.scalar(child)));
                } else {
                    lines.push(format!("{indent}{}:", style.key(key)));
                    render_into(child, depth + 1, style, lines);
                }
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for item in items {
                if is_scalar(item) {
                    lines.push(format!("{indent}- {}", style.scalar(item)));
                } else {
                    lines.push(format!("{indent}-"));
                    render_into(item, depth + 1, style, lines);
                }
            }
        }
        scalar => lines.push(format!("{indent}{}", style.scalar(scalar))),
    }
}
