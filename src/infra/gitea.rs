use std::time::Duration;

use async_trait::async_trait;
use base64::prelude::{BASE64_STANDARD, Engine as _};
use reqwest::{
    Client,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use serde::{Deserialize, Serialize};

use crate::domain::comment::Comment;
use crate::domain::event::IssueRef;
use crate::error::{AppError, AppResult};
use crate::services::HostingService;

pub enum GiteaAuth {
    Basic { user: String, password: String },
    Token(String),
}

pub struct GiteaClient {
    http: Client,
    base_url: Option<String>,
    auth: Option<GiteaAuth>,
}

impl GiteaClient {
    pub fn new(
        base_url: Option<String>,
        auth: Option<GiteaAuth>,
        timeout: Option<Duration>,
    ) -> AppResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|err| {
            AppError::Configuration(format!("failed to build Gitea HTTP client: {err}"))
        })?;

        Ok(Self {
            http,
            base_url,
            auth,
        })
    }

    fn api_details(&self) -> AppResult<(&str, &GiteaAuth)> {
        let base_url = self
            .base_url
            .as_deref()
            .ok_or_else(|| AppError::Configuration("Gitea base URL not configured".to_string()))?;
        let auth = self
            .auth
            .as_ref()
            .ok_or_else(|| AppError::Configuration("Gitea credentials not configured".to_string()))?;
        Ok((base_url, auth))
    }

    fn auth_header(auth: &GiteaAuth) -> String {
        match auth {
            GiteaAuth::Basic { user, password } => {
                let encoded = BASE64_STANDARD.encode(format!("{user}:{password}"));
                format!("Basic {encoded}")
            }
            GiteaAuth::Token(token) => format!("token {token}"),
        }
    }

    fn comments_endpoint(base_url: &str, issue: &IssueRef) -> String {
        format!(
            "{}/api/v1/repos/{}/{}/issues/{}/comments",
            base_url.trim_end_matches('/'),
            issue.owner,
            issue.repo,
            issue.number
        )
    }
}

#[async_trait]
impl HostingService for GiteaClient {
    async fn list_issue_comments(&self, issue: &IssueRef) -> AppResult<Vec<Comment>> {
        let (base_url, auth) = self.api_details()?;

        let response = self
            .http
            .get(Self::comments_endpoint(base_url, issue))
            .header(AUTHORIZATION, Self::auth_header(auth))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| AppError::Hosting(format!("error getting comments: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::Hosting(format!(
                "error getting comments: Gitea responded with {status}: {body}"
            )));
        }

        let payload: Vec<GiteaComment> = response.json().await.map_err(|err| {
            AppError::Hosting(format!("failed to parse Gitea comments response: {err}"))
        })?;

        Ok(payload.into_iter().map(Comment::from).collect())
    }

    async fn create_issue_comment(&self, issue: &IssueRef, body: &str) -> AppResult<Comment> {
        let (base_url, auth) = self.api_details()?;

        let response = self
            .http
            .post(Self::comments_endpoint(base_url, issue))
            .header(AUTHORIZATION, Self::auth_header(auth))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(&CreateCommentRequest { body })
            .send()
            .await
            .map_err(|err| AppError::Hosting(format!("error commenting issue with error: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::Hosting(format!(
                "error commenting issue: Gitea responded with {status}: {body}"
            )));
        }

        let payload: GiteaComment = response.json().await.map_err(|err| {
            AppError::Hosting(format!("failed to parse Gitea comment response: {err}"))
        })?;

        Ok(payload.into())
    }
}

#[derive(Serialize)]
struct CreateCommentRequest<'a> {
    body: &'a str,
}

#[derive(Deserialize)]
struct GiteaComment {
    id: u64,
    #[serde(default)]
    body: String,
}

impl From<GiteaComment> for Comment {
    fn from(comment: GiteaComment) -> Self {
        Comment {
            id: comment.id,
            body: comment.body,
        }
    }
}
