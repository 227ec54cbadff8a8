// ABOUTME: Handlers for the oncall-settings subcommands
// ABOUTME: Each returns whether every value involved is valid

use colored::*;
use oncall_cloud::CloudConnectorStorage;
use oncall_settings::SettingsError;

use crate::context::AppContext;
use crate::output::{cloud_status_line, parse_cli_value, settings_table, status_line};

pub async fn list(ctx: &AppContext) -> anyhow::Result<bool> {
    let views = ctx.service.list().await?;

    println!("{}", "Live settings".blue().bold());
    println!("{}", settings_table(&views));

    let connection = CloudConnectorStorage::new(ctx.db.pool().clone()).get().await?;
    println!("{}", cloud_status_line(connection.as_ref()));

    let failing = views.iter().filter(|v| v.error.is_some()).count();
    if failing > 0 {
        println!("{} setting(s) with errors", failing.to_string().red());
    }

    Ok(failing == 0)
}

pub async fn get(ctx: &AppContext, name: &str) -> anyhow::Result<bool> {
    match ctx.service.settings().get(name).await? {
        Some(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        None => println!("{}", format!("{} is not set", name).yellow()),
    }
    Ok(true)
}

pub async fn set(
    ctx: &AppContext,
    name: &str,
    raw: &str,
    force: bool,
    json: bool,
) -> anyhow::Result<bool> {
    let value = parse_cli_value(raw, json)?;

    if force {
        let stored = ctx.service.force_update(name, value).await?;
        println!("{}", status_line(&stored.name, stored.error.as_deref()));
        return Ok(stored.error.is_none());
    }

    match ctx.service.update(name, value).await {
        Ok(stored) => {
            println!("{}", status_line(&stored.name, None));
            Ok(true)
        }
        Err(SettingsError::Rejected { name, reason }) => {
            println!("{}", status_line(&name, Some(&reason)));
            println!("{}", "Use --force to store it anyway".dimmed());
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn validate(
    ctx: &AppContext,
    name: &str,
    raw: Option<&str>,
    json: bool,
) -> anyhow::Result<bool> {
    let error = match raw {
        Some(raw) => {
            let value = parse_cli_value(raw, json)?;
            ctx.service.validate(name, &value).await
        }
        None => ctx.service.validate_stored(name).await?,
    };

    println!("{}", status_line(name, error.as_deref()));
    Ok(error.is_none())
}

pub async fn check(ctx: &AppContext) -> anyhow::Result<bool> {
    let results = ctx.service.refresh_errors().await?;

    if results.is_empty() {
        println!("{}", "No settings stored".yellow());
        return Ok(true);
    }

    for (name, error) in &results {
        println!("{}", status_line(name, error.as_deref()));
    }

    Ok(results.iter().all(|(_, error)| error.is_none()))
}
