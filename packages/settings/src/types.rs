// ABOUTME: Type definitions for live settings
// ABOUTME: Stored records, display views, and loosely-typed value helpers

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A stored live setting
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LiveSetting {
    pub name: String,
    pub value: Value,
    pub error: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// A known setting merged with its stored record, ready for display
#[derive(Debug, Clone, Serialize)]
pub struct SettingView {
    pub name: String,
    pub description: String,
    /// Masked when the setting is secret
    pub value: Option<Value>,
    pub is_secret: bool,
    pub validated: bool,
    pub error: Option<String>,
    pub updated_at: Option<String>,
}

/// Absent, `null`, and the empty string all count as "no value"
pub fn is_empty_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Render a value as text: strings unquoted, everything else as JSON
pub fn value_as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Interpret a raw environment value: `true`/`false` become booleans,
/// anything else stays a string
pub fn parse_env_value(raw: &str) -> Value {
    match raw.trim() {
        "true" | "True" => Value::Bool(true),
        "false" | "False" => Value::Bool(false),
        _ => Value::String(raw.to_string()),
    }
}

/// Mask a secret for display, keeping the first four characters
pub fn mask_secret(text: &str) -> String {
    let visible = 4;
    let len = text.chars().count();
    if len <= visible {
        return "*".repeat(len);
    }

    let prefix: String = text.chars().take(visible).collect();
    format!("{}{}", prefix, "*".repeat(len - visible))
}
