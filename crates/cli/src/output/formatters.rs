//! Output formatters

use anyhow::Result;
use serde::Serialize;

/// JSON formatter
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format a value as pretty JSON
    pub fn format<T: Serialize>(value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }
}

/// Plain text formatter
pub struct PlainFormatter;

impl PlainFormatter {
    /// Format a value as indented `key: value` lines
    pub fn format<T: Serialize>(value: &T) -> Result<String> {
        let json = serde_json::to_value(value)?;
        Ok(Self::format_value(&json, 0))
    }

    fn format_value(value: &serde_json::Value, indent: usize) -> String {
        let indent_str = "  ".repeat(indent);
        match value {
            serde_json::Value::Null => "-".to_string(),
            serde_json::Value::Bool(b) => b.to_string(),
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Array(arr) => arr
                .iter()
                .map(|v| match v {
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        format!("{}-\n{}", indent_str, Self::format_value(v, indent + 1))
                    }
                    _ => format!("{}- {}", indent_str, Self::format_value(v, indent + 1)),
                })
                .collect::<Vec<_>>()
                .join("\n"),
            serde_json::Value::Object(obj) => obj
                .iter()
                .map(|(k, v)| match v {
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        format!("{}{}:\n{}", indent_str, k, Self::format_value(v, indent + 1))
                    }
                    _ => format!("{}{}: {}", indent_str, k, Self::format_value(v, indent + 1)),
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}
