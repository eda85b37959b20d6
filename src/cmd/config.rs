use std::path::Path;

use clap::Subcommand;

use crate::config::{AppConfig, LogFormat};
use crate::error::AppResult;

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Show the resolved configuration (secrets masked).
    Show,
}

pub fn run(command: ConfigCommand, config_path: &Path) -> AppResult<()> {
    match command {
        ConfigCommand::Show => run_show(config_path),
    }
}

fn run_show(config_path: &Path) -> AppResult<()> {
    let cfg = AppConfig::load(config_path)?;

    let file_state = if config_path.exists() {
        ""
    } else {
        " (not found, using defaults and environment)"
    };
    println!("Configuration file: {}{file_state}", config_path.display());
    println!("Listen address: {}", cfg.server.url);
    println!("Gitea base URL: {}", display_value(&cfg.gitea.url));
    println!("Gitea user: {}", display_value(&cfg.gitea.user));
    println!("Gitea password: {}", mask_secret(&cfg.gitea.password));
    println!("Gitea token: {}", mask_secret(&cfg.gitea.token));
    println!("Redmine base URL: {}", display_value(&cfg.redmine.url));
    println!("Redmine API key: {}", mask_secret(&cfg.redmine.api_key));
    println!("Redmine project: {}", cfg.redmine.project_key);
    println!("Redmine tracker id: {}", cfg.redmine.tracker_id);
    println!("Redmine closed status id: {}", cfg.redmine.closed_status_id);
    println!("Redmine public URL: {}", cfg.redmine.public_url);
    println!(
        "HTTP timeout: {}",
        cfg.http
            .timeout_secs
            .map(|secs| format!("{secs}s"))
            .unwrap_or_else(|| "<none>".to_string())
    );
    println!(
        "Logging: {} ({})",
        cfg.logging.level,
        match cfg.logging.format {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    );

    Ok(())
}

fn display_value(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "<not set>".to_string())
}

fn mask_secret(value: &Option<String>) -> String {
    match value {
        Some(token) if token.len() > 6 && token.is_ascii() => {
            let prefix = &token[..3];
            let suffix = &token[token.len() - 3..];
            format!("{prefix}***{suffix}")
        }
        Some(token) if !token.is_empty() => "***".to_string(),
        _ => "<not set>".to_string(),
    }
}
