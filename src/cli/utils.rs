use serde_json::{json, Value};
use crate::cli::OutputFormat;

/// Print a report payload in the appropriate format
pub fn output_payload(output_format: &OutputFormat, payload: &Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let response = json!({
                "success": true,
                "data": payload
            });
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => match payload.as_array() {
            Some(rows) if rows.is_empty() => println!("No rows"),
            Some(rows) => {
                for row in rows {
                    println!("{}", format_row(row));
                }
            }
            None => println!("{}", serde_json::to_string_pretty(payload)?),
        },
    }
    Ok(())
}

/// Render one result row as `key=value` pairs
fn format_row(row: &Value) -> String {
    match row.as_object() {
        Some(columns) => columns
            .iter()
            .map(|(key, value)| match value {
                Value::String(s) => format!("{}={}", key, s),
                other => format!("{}={}", key, other),
            })
            .collect::<Vec<_>>()
            .join("  "),
        None => row.to_string(),
    }
}

/// Parse a `field=value` filter argument
pub fn parse_filter(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => {
            Ok((field.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("invalid filter '{}', expected field=value", arg)),
    }
}
