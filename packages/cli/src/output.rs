// ABOUTME: Terminal rendering helpers
// ABOUTME: Settings table, value display, and command line value parsing

use anyhow::Context;
use colored::*;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use oncall_cloud::CloudConnection;
use oncall_settings::{value_as_text, SettingView};
use serde_json::Value;

const MAX_CELL_WIDTH: usize = 40;

/// Values are strings unless `json` asks for JSON parsing
pub fn parse_cli_value(raw: &str, json: bool) -> anyhow::Result<Value> {
    if json {
        serde_json::from_str(raw).with_context(|| format!("'{}' is not valid JSON", raw))
    } else {
        Ok(Value::String(raw.to_string()))
    }
}

pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None => "—".to_string(),
        Some(Value::Null) => "null".to_string(),
        Some(v) => truncate(&value_as_text(v), MAX_CELL_WIDTH),
    }
}

pub fn settings_table(views: &[SettingView]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec!["Name", "Value", "Checked", "Error", "Updated"]);

    for view in views {
        table.add_row(vec![
            view.name.clone(),
            display_value(view.value.as_ref()),
            if view.validated { "yes" } else { "" }.to_string(),
            view.error.clone().unwrap_or_default(),
            view.updated_at.clone().unwrap_or_default(),
        ]);
    }

    table
}

pub fn status_line(name: &str, error: Option<&str>) -> String {
    match error {
        None => format!("{} {}", "✓".green(), name),
        Some(reason) => format!("{} {}: {}", "✗".red(), name, reason),
    }
}

pub fn cloud_status_line(connection: Option<&CloudConnection>) -> String {
    match connection {
        Some(c) => format!(
            "Grafana Cloud: {} (synced {})",
            c.cloud_url.cyan(),
            c.synced_at
        ),
        None => format!("Grafana Cloud: {}", "not connected".dimmed()),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
