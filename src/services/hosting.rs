use async_trait::async_trait;

use crate::domain::comment::Comment;
use crate::domain::event::IssueRef;
use crate::error::AppResult;

/// Upstream Git hosting service that owns the issues and their comments.
#[async_trait]
pub trait HostingService: Send + Sync {
    /// Comments in the order the service lists them.
    async fn list_issue_comments(&self, issue: &IssueRef) -> AppResult<Vec<Comment>>;
    async fn create_issue_comment(&self, issue: &IssueRef, body: &str) -> AppResult<Comment>;
}
