use thiserror::Error;
use tracing::{info, warn};

use crate::context::AppContext;
use crate::domain::event::IssueEvent;
use crate::domain::ticket::TicketDraft;
use crate::error::AppError;

const EXPECTED_CREATE_STATUS: u16 = 201;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorCreated {
    pub ticket_id: u64,
    pub comment_id: u64,
}

#[derive(Debug, Error)]
pub enum CreateMirrorError {
    /// Nothing was created downstream.
    #[error(transparent)]
    NotCreated(#[from] AppError),
    /// The ticket exists but the back-reference comment could not be posted.
    #[error("ticket {ticket_id} created but not linked: {source}")]
    NotLinked {
        ticket_id: u64,
        #[source]
        source: AppError,
    },
}

impl CreateMirrorError {
    pub fn ticket_id(&self) -> Option<u64> {
        match self {
            CreateMirrorError::NotCreated(_) => None,
            CreateMirrorError::NotLinked { ticket_id, .. } => Some(*ticket_id),
        }
    }
}

/// Opens a Redmine ticket for a freshly opened upstream issue and links the
/// two with a marker comment on the upstream issue.
pub async fn create_mirror(
    ctx: &AppContext,
    event: &IssueEvent,
) -> Result<MirrorCreated, CreateMirrorError> {
    let issue = event.issue_ref()?;
    let (title, body) = event.issue_content()?;

    let project = ctx
        .issue_tracker
        .get_project(&ctx.config.redmine.project_key)
        .await?;

    let created = ctx
        .issue_tracker
        .create_issue(TicketDraft {
            project_id: project.id,
            tracker_id: ctx.config.redmine.tracker_id,
            subject: title,
            description: body,
        })
        .await?;

    if created.status != EXPECTED_CREATE_STATUS {
        return Err(AppError::IssueTracker(format!(
            "error creating issue with unexpected code: {}",
            created.status
        ))
        .into());
    }
    let ticket = created.ticket.ok_or_else(|| {
        AppError::IssueTracker("issue created but response carried no issue id".to_string())
    })?;
    info!(%issue, ticket_id = ticket.id, "created Redmine ticket");

    let comment = ctx
        .hosting
        .create_issue_comment(&issue, &ctx.marker.encode(ticket.id))
        .await
        .map_err(|source| {
            warn!(%issue, ticket_id = ticket.id, error = %source, "failed to link ticket");
            CreateMirrorError::NotLinked {
                ticket_id: ticket.id,
                source,
            }
        })?;

    Ok(MirrorCreated {
        ticket_id: ticket.id,
        comment_id: comment.id,
    })
}
