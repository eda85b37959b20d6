use serde::Deserialize;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueAction {
    Opened,
    Closed,
    Other(String),
}

impl IssueAction {
    pub fn as_str(&self) -> &str {
        match self {
            IssueAction::Opened => "opened",
            IssueAction::Closed => "closed",
            IssueAction::Other(value) => value,
        }
    }

    pub fn from_str(value: &str) -> Self {
        match value {
            "opened" => IssueAction::Opened,
            "closed" => IssueAction::Closed,
            other => IssueAction::Other(other.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for IssueAction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(IssueAction::from_str(&value))
    }
}

/// Issue webhook payload as delivered by Gitea. Only the fields the relay
/// reads are modelled; everything else in the delivery is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueEvent {
    pub action: IssueAction,
    #[serde(default)]
    pub number: Option<u64>,
    #[serde(default)]
    pub issue: Option<IssuePayload>,
    #[serde(default)]
    pub repository: Option<RepositoryPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssuePayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub owner: Option<OwnerPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwnerPayload {
    #[serde(default)]
    pub login: Option<String>,
}

/// Coordinates of an upstream issue: `owner/repo#number`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRef {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl std::fmt::Display for IssueRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

impl IssueEvent {
    pub fn from_slice(body: &[u8]) -> AppResult<Self> {
        serde_json::from_slice(body)
            .map_err(|err| AppError::InvalidEvent(format!("failed to parse payload: {err}")))
    }

    pub fn issue_ref(&self) -> AppResult<IssueRef> {
        let repository = self
            .repository
            .as_ref()
            .ok_or_else(|| AppError::InvalidEvent("payload has no repository".to_string()))?;
        let owner = repository
            .owner
            .as_ref()
            .and_then(|owner| owner.login.clone())
            .ok_or_else(|| AppError::InvalidEvent("payload has no repository owner".to_string()))?;
        let repo = repository
            .name
            .clone()
            .ok_or_else(|| AppError::InvalidEvent("payload has no repository name".to_string()))?;
        let number = self
            .number
            .ok_or_else(|| AppError::InvalidEvent("payload has no issue number".to_string()))?;

        Ok(IssueRef {
            owner,
            repo,
            number,
        })
    }

    /// Title and body of the opened issue. A missing body is an empty
    /// description, a missing title is an error.
    pub fn issue_content(&self) -> AppResult<(String, String)> {
        let issue = self
            .issue
            .as_ref()
            .ok_or_else(|| AppError::InvalidEvent("payload has no issue".to_string()))?;
        let title = issue
            .title
            .clone()
            .ok_or_else(|| AppError::InvalidEvent("issue has no title".to_string()))?;
        Ok((title, issue.body.clone().unwrap_or_default()))
    }
}
