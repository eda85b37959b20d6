use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::gitea::{GiteaAuth, GiteaClient};
use crate::infra::redmine::RedmineClient;
use crate::{logging, server};

pub async fn run(config_path: &Path) -> AppResult<()> {
    let config = AppConfig::load(config_path)?;
    logging::init(&config.logging)?;

    if !config_path.exists() {
        warn!(path = %config_path.display(), "no configuration file found");
    }
    for warning in config.missing_settings() {
        warn!("{warning}");
    }

    let timeout = config.http.timeout_secs.map(Duration::from_secs);
    let hosting = Arc::new(GiteaClient::new(
        config.gitea.url.clone(),
        gitea_auth(&config),
        timeout,
    )?);
    let issue_tracker = Arc::new(RedmineClient::new(
        config.redmine.url.clone(),
        config.redmine.api_key.clone(),
        timeout,
    )?);

    info!(
        project = %config.redmine.project_key,
        tracker_id = config.redmine.tracker_id,
        closed_status_id = config.redmine.closed_status_id,
        "starting relay"
    );

    let ctx = AppContext::new(config, hosting, issue_tracker);
    server::serve(ctx).await
}

fn gitea_auth(config: &AppConfig) -> Option<GiteaAuth> {
    if let Some(token) = &config.gitea.token {
        return Some(GiteaAuth::Token(token.clone()));
    }
    config.gitea.user.as_ref().map(|user| GiteaAuth::Basic {
        user: user.clone(),
        password: config.gitea.password.clone().unwrap_or_default(),
    })
}
