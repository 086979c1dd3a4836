//! Output formatters for CLI commands.
//!
//! Every command reports a serializable summary; this module turns it into
//! JSON, `key=value` text, or a colored listing.

use anyhow::Result;
use colored::Colorize;
use nativegen_core::cli::OutputFormat;
use serde::Serialize;
use serde_json::Value;

/// Format data according to the specified output format.
///
/// # Errors
///
/// Returns an error if serialization fails.
///
/// # Examples
///
/// ```
/// use nativegen_cli::formatters::format_output;
/// use nativegen_core::cli::OutputFormat;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Summary {
///     output: String,
///     export_count: usize,
/// }
///
/// let summary = Summary { output: "index.d.ts".to_string(), export_count: 3 };
///
/// let json = format_output(&summary, OutputFormat::Json)?;
/// assert!(json.contains("\"export_count\": 3"));
///
/// let text = format_output(&summary, OutputFormat::Text)?;
/// assert_eq!(text, "output=index.d.ts\nexport_count=3");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(data),
        OutputFormat::Text => text::format(data),
        OutputFormat::Pretty => pretty::format(data),
    }
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Format data as JSON with 2-space indentation.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }
}

/// Plain text output for scripts.
pub mod text {
    use super::{Result, Serialize, Value, scalar};

    /// Format data as one `key=value` line per field.
    ///
    /// Nested objects use dotted keys; arrays of scalars are joined with
    /// commas.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut lines = Vec::new();
        flatten("", &value, &mut lines);
        Ok(lines.join("\n"))
    }

    fn flatten(prefix: &str, value: &Value, lines: &mut Vec<String>) {
        match value {
            Value::Object(map) => {
                for (key, val) in map {
                    let key = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    flatten(&key, val, lines);
                }
            }
            Value::Array(items) if items.iter().all(|v| !v.is_object()) => {
                let joined: Vec<String> = items.iter().map(scalar).collect();
                lines.push(format!("{prefix}={}", joined.join(",")));
            }
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    flatten(&format!("{prefix}.{index}"), item, lines);
                }
            }
            other => lines.push(format!("{prefix}={}", scalar(other))),
        }
    }
}

/// Pretty (human-readable) output formatting.
pub mod pretty {
    use super::{Colorize, Result, Serialize, Value, scalar};

    /// Format data as an indented, colored listing.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut out = Vec::new();
        write_value(&value, 0, &mut out);
        Ok(out.join("\n"))
    }

    fn colored_scalar(value: &Value) -> String {
        match value {
            Value::Null => "-".dimmed().to_string(),
            Value::Bool(b) => b.to_string().yellow().to_string(),
            Value::Number(n) => n.to_string().cyan().to_string(),
            other => scalar(other).green().to_string(),
        }
    }

    fn write_value(value: &Value, depth: usize, out: &mut Vec<String>) {
        let indent = "  ".repeat(depth);
        match value {
            Value::Object(map) => {
                for (key, val) in map {
                    let label = key.replace('_', " ");
                    match val {
                        Value::Object(_) => {
                            out.push(format!("{indent}{}:", label.blue().bold()));
                            write_value(val, depth + 1, out);
                        }
                        Value::Array(items) if !items.is_empty() => {
                            out.push(format!("{indent}{}:", label.blue().bold()));
                            write_value(val, depth + 1, out);
                        }
                        _ => out.push(format!(
                            "{indent}{}: {}",
                            label.blue().bold(),
                            colored_scalar(val)
                        )),
                    }
                }
            }
            Value::Array(items) => {
                for item in items {
                    if item.is_object() {
                        out.push(format!("{indent}-"));
                        write_value(item, depth + 1, out);
                    } else {
                        out.push(format!("{indent}- {}", colored_scalar(item)));
                    }
                }
            }
            other => out.push(format!("{indent}{}", colored_scalar(other))),
        }
    }
}

/// Renders a non-container value without quotes.
fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
