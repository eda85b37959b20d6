use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

use crate::domain::mirror::DEFAULT_PUBLIC_URL;
use crate::error::{AppError, AppResult};

pub const DEFAULT_CONFIG_FILE: &str = "config.yml";
const CONFIG_ROOT_KEY: &str = "girs";
const ENV_PREFIX: &str = "GIRS_";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub gitea: GiteaConfig,
    pub redmine: RedmineConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address, `host:port`.
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GiteaConfig {
    pub url: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    /// Access token; takes precedence over user/password when set.
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedmineConfig {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub project_key: String,
    pub tracker_id: u64,
    pub closed_status_id: u64,
    /// Base URL written into the back-reference comment.
    pub public_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                url: "0.0.0.0:8085".to_string(),
            },
            gitea: GiteaConfig::default(),
            redmine: RedmineConfig {
                url: None,
                api_key: None,
                project_key: "bu-contentserv-devops".to_string(),
                tracker_id: 0,
                closed_status_id: 0,
                public_url: DEFAULT_PUBLIC_URL.to_string(),
            },
            http: HttpConfig {
                timeout_secs: Some(30),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: LogFormat::Pretty,
            },
        }
    }
}

impl AppConfig {
    /// Defaults, then the `girs:` section of the YAML file, then
    /// environment variables. Both `GIRS_<SECTION>_<KEY>` and
    /// `GIRS_<SECTION>__<KEY>` are read; the double-underscore form wins.
    pub fn load(path: &Path) -> AppResult<Self> {
        let config: AppConfig = Figment::new()
            .merge(Yaml::file(path))
            .focus(CONFIG_ROOT_KEY)
            .join(Serialized::defaults(AppConfig::default()))
            .merge(section_env())
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|err| AppError::Configuration(format!("failed to load configuration: {err}")))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(AppError::Configuration(format!(
                "invalid log level '{}', expected one of: {}",
                self.logging.level,
                valid_levels.join(", ")
            )));
        }
        if self.redmine.project_key.trim().is_empty() {
            return Err(AppError::Configuration(
                "redmine project key must not be empty".to_string(),
            ));
        }
        if self.redmine.tracker_id == 0 {
            return Err(AppError::Configuration(
                "redmine tracker_id must be set to a positive id".to_string(),
            ));
        }
        if self.redmine.closed_status_id == 0 {
            return Err(AppError::Configuration(
                "redmine closed_status_id must be set to a positive id".to_string(),
            ));
        }
        if self.server.url.trim().is_empty() {
            return Err(AppError::Configuration(
                "server listen address must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Settings that are optional to load but required to do any useful
    /// work. Reported as startup warnings.
    pub fn missing_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.gitea.url.is_none() {
            missing.push("Gitea base URL not configured; comment calls will fail.");
        }
        if self.gitea.token.is_none() && self.gitea.user.is_none() {
            missing.push("Gitea credentials not configured; comment calls will fail.");
        }
        if self.redmine.url.is_none() {
            missing.push("Redmine base URL not configured; ticket calls will fail.");
        }
        if self.redmine.api_key.is_none() {
            missing.push("Redmine API key not configured; ticket calls will fail.");
        }
        missing
    }
}

/// `GIRS_REDMINE_API_KEY` -> `redmine.api_key`. Section names hold no
/// underscore, so the first one after the prefix is the separator.
fn section_env() -> Env {
    Env::prefixed(ENV_PREFIX)
        .filter(|key| !key.as_str().contains("__"))
        .map(|key| key.as_str().replacen('_', ".", 1).into())
}

pub fn resolve_config_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}
