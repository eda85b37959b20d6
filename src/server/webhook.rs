//! Gitea issue webhook endpoint.
//!
//! Routes `opened` and `closed` deliveries to the mirror workflows and turns
//! their outcome into a [`MessageResponse`]. Every other action is accepted
//! and ignored.

use axum::body::Bytes;
use axum::extract::State;
use tracing::{debug, info, warn};

use super::response::MessageResponse;
use crate::context::AppContext;
use crate::domain::event::{IssueAction, IssueEvent};
use crate::workflow::{CloseOutcome, MirrorCreated, close_mirror, create_mirror};

pub const CLOSED_MESSAGE: &str = "Success! Issue closed in Redmine.";

pub async fn webhook_handler(State(ctx): State<AppContext>, body: Bytes) -> MessageResponse {
    let event = match IssueEvent::from_slice(&body) {
        Ok(event) => event,
        Err(err) => {
            warn!(error = %err, "rejected webhook delivery");
            return MessageResponse::error(err.to_string());
        }
    };

    dispatch(&ctx, &event).await
}

pub async fn dispatch(ctx: &AppContext, event: &IssueEvent) -> MessageResponse {
    debug!(action = event.action.as_str(), number = ?event.number, "received issue event");

    match event.action {
        IssueAction::Closed => match close_mirror(ctx, event).await {
            Ok(CloseOutcome::Closed { ticket_id }) => {
                info!(ticket_id, "mirrored ticket closed");
                MessageResponse::ok(CLOSED_MESSAGE)
            }
            Ok(CloseOutcome::NotMirrored) => {
                info!(number = ?event.number, "closed issue has no mirrored ticket");
                MessageResponse::ok(CLOSED_MESSAGE)
            }
            Err(err) => {
                warn!(error = %err, "failed to close mirrored ticket");
                MessageResponse::error(err.to_string())
            }
        },
        IssueAction::Opened => match create_mirror(ctx, event).await {
            Ok(MirrorCreated {
                ticket_id,
                comment_id,
            }) => MessageResponse::ok(format!(
                "Success! Issue created with ID: {ticket_id}. Comment created with ID: {comment_id}"
            )),
            Err(err) => {
                warn!(error = %err, ticket_id = ?err.ticket_id(), "failed to mirror issue");
                MessageResponse::error(err.to_string())
            }
        },
        IssueAction::Other(ref action) => {
            info!(action = %action, "ignoring issue action");
            MessageResponse::ok("")
        }
    }
}
