use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, CONTENT_TYPE},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::ticket::{Created, Project, Ticket, TicketDraft, TicketUpdate};
use crate::error::{AppError, AppResult};
use crate::services::IssueTrackerService;

const API_KEY_HEADER: &str = "X-Redmine-API-Key";

pub struct RedmineClient {
    http: Client,
    base_url: Option<String>,
    api_key: Option<String>,
}

impl RedmineClient {
    pub fn new(
        base_url: Option<String>,
        api_key: Option<String>,
        timeout: Option<Duration>,
    ) -> AppResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|err| {
            AppError::Configuration(format!("failed to build Redmine HTTP client: {err}"))
        })?;

        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    fn api_details(&self) -> AppResult<(&str, &str)> {
        let base_url = self
            .base_url
            .as_deref()
            .ok_or_else(|| AppError::Configuration("Redmine base URL not configured".to_string()))?;
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Configuration("Redmine API key not configured".to_string()))?;
        Ok((base_url, api_key))
    }

    fn endpoint(base_url: &str, path: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl IssueTrackerService for RedmineClient {
    async fn get_project(&self, key: &str) -> AppResult<Project> {
        let (base_url, api_key) = self.api_details()?;

        let response = self
            .http
            .get(Self::endpoint(base_url, &format!("projects/{key}.json")))
            .header(API_KEY_HEADER, api_key)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| {
                AppError::IssueTracker(format!("error getting project with error: {err}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::IssueTracker(format!(
                "error getting project '{key}': Redmine responded with {status}: {body}"
            )));
        }

        let payload: ProjectEnvelope = response.json().await.map_err(|err| {
            AppError::IssueTracker(format!("failed to parse Redmine project response: {err}"))
        })?;

        Ok(Project {
            id: payload.project.id,
        })
    }

    async fn create_issue(&self, draft: TicketDraft) -> AppResult<Created> {
        let (base_url, api_key) = self.api_details()?;
        let request_body = IssueCreateRequest {
            issue: IssueCreateFields {
                project_id: draft.project_id,
                tracker_id: draft.tracker_id,
                subject: draft.subject,
                description: draft.description,
            },
        };

        let response = self
            .http
            .post(Self::endpoint(base_url, "issues.json"))
            .header(API_KEY_HEADER, api_key)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|err| {
                AppError::IssueTracker(format!("error creating issue with error: {err}"))
            })?;

        let status = response.status();
        debug!(status = status.as_u16(), "Redmine issue create answered");
        if status != StatusCode::CREATED {
            return Ok(Created {
                status: status.as_u16(),
                ticket: None,
            });
        }

        let payload: IssueEnvelope = response.json().await.map_err(|err| {
            AppError::IssueTracker(format!("failed to parse Redmine issue response: {err}"))
        })?;

        Ok(Created {
            status: status.as_u16(),
            ticket: Some(Ticket {
                id: payload.issue.id,
            }),
        })
    }

    async fn update_issue(&self, id: u64, update: TicketUpdate) -> AppResult<u16> {
        let (base_url, api_key) = self.api_details()?;
        let request_body = IssueUpdateRequest {
            issue: IssueUpdateFields {
                status_id: update.status_id,
                notes: update.notes,
            },
        };

        let response = self
            .http
            .put(Self::endpoint(base_url, &format!("issues/{id}.json")))
            .header(API_KEY_HEADER, api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|err| {
                AppError::IssueTracker(format!("error closing issue with error: {err}"))
            })?;

        Ok(response.status().as_u16())
    }
}

#[derive(Serialize)]
struct IssueCreateRequest {
    issue: IssueCreateFields,
}

#[derive(Serialize)]
struct IssueCreateFields {
    project_id: u64,
    tracker_id: u64,
    subject: String,
    description: String,
}

#[derive(Serialize)]
struct IssueUpdateRequest {
    issue: IssueUpdateFields,
}

#[derive(Serialize)]
struct IssueUpdateFields {
    status_id: u64,
    notes: String,
}

#[derive(Deserialize)]
struct ProjectEnvelope {
    project: IdOnly,
}

#[derive(Deserialize)]
struct IssueEnvelope {
    issue: IdOnly,
}

#[derive(Deserialize)]
struct IdOnly {
    id: u64,
}
