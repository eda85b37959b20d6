use async_trait::async_trait;

use crate::domain::ticket::{Created, Project, TicketDraft, TicketUpdate};
use crate::error::AppResult;

/// Downstream ticket system. Status codes of the mutating calls are returned
/// to the caller instead of being judged here.
#[async_trait]
pub trait IssueTrackerService: Send + Sync {
    async fn get_project(&self, key: &str) -> AppResult<Project>;
    async fn create_issue(&self, draft: TicketDraft) -> AppResult<Created>;
    async fn update_issue(&self, id: u64, update: TicketUpdate) -> AppResult<u16>;
}
