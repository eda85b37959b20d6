use tracing::{debug, info};

use crate::context::AppContext;
use crate::domain::event::IssueEvent;
use crate::domain::ticket::TicketUpdate;
use crate::error::{AppError, AppResult};

pub const CLOSE_NOTE: &str = "Closed by webhook";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed { ticket_id: u64 },
    NotMirrored,
}

/// Closes the Redmine ticket linked from the upstream issue's comments.
///
/// Only the first marker comment in listing order is honored; later markers
/// are never looked at, even when the first one fails to parse.
pub async fn close_mirror(ctx: &AppContext, event: &IssueEvent) -> AppResult<CloseOutcome> {
    let issue = event.issue_ref()?;
    let comments = ctx.hosting.list_issue_comments(&issue).await?;

    let Some(ticket_id) = comments
        .iter()
        .find_map(|comment| ctx.marker.decode(&comment.body))
    else {
        debug!(%issue, "no mirror link found, nothing to close");
        return Ok(CloseOutcome::NotMirrored);
    };
    let ticket_id = ticket_id?;

    let status = ctx
        .issue_tracker
        .update_issue(
            ticket_id,
            TicketUpdate {
                status_id: ctx.config.redmine.closed_status_id,
                notes: CLOSE_NOTE.to_string(),
            },
        )
        .await?;

    if status >= 400 {
        return Err(AppError::IssueTracker(format!(
            "error closing issue with code: {status}"
        )));
    }

    info!(%issue, ticket_id, "closed Redmine ticket");
    Ok(CloseOutcome::Closed { ticket_id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::fakes::{FakeHosting, FakeTracker, context, event};

    const MARKER: &str = "IssueInRedmine: https://projects.sdzecom.de/issues/";

    #[tokio::test]
    async fn closes_only_the_first_linked_ticket() {
        let hosting = FakeHosting::default().with_comments(&[
            "unrelated",
            &format!("{MARKER}42"),
            &format!("{MARKER}99"),
        ]);
        let tracker = FakeTracker::default();
        let ctx = context(hosting, tracker.clone());

        let outcome = close_mirror(&ctx, &event("closed")).await.unwrap();

        assert_eq!(outcome, CloseOutcome::Closed { ticket_id: 42 });
        assert_eq!(
            tracker.updates(),
            vec![(
                42,
                TicketUpdate {
                    status_id: 5,
                    notes: "Closed by webhook".to_string(),
                }
            )]
        );
    }

    #[tokio::test]
    async fn missing_link_is_a_no_op() {
        let hosting = FakeHosting::default().with_comments(&["lgtm", "IssueInRedmine: soon"]);
        let tracker = FakeTracker::default();
        let ctx = context(hosting, tracker.clone());

        let outcome = close_mirror(&ctx, &event("closed")).await.unwrap();

        assert_eq!(outcome, CloseOutcome::NotMirrored);
        assert!(tracker.updates().is_empty());
    }

    #[tokio::test]
    async fn unparsable_id_aborts_before_update() {
        let hosting = FakeHosting::default()
            .with_comments(&[&format!("{MARKER}abc"), &format!("{MARKER}99")]);
        let tracker = FakeTracker::default();
        let ctx = context(hosting, tracker.clone());

        let err = close_mirror(&ctx, &event("closed")).await.unwrap_err();

        assert!(matches!(err, AppError::MirrorLink(_)));
        assert!(tracker.updates().is_empty());
    }

    #[tokio::test]
    async fn update_status_404_is_an_error() {
        let hosting = FakeHosting::default()
            .with_comments(&[&format!("{MARKER}42"), &format!("{MARKER}99")]);
        let tracker = FakeTracker::default().with_update_status(404);
        let ctx = context(hosting, tracker.clone());

        let err = close_mirror(&ctx, &event("closed")).await.unwrap_err();

        assert!(err.to_string().contains("404"));
        assert_eq!(tracker.updates().len(), 1);
        assert_eq!(tracker.updates()[0].0, 42);
    }

    #[tokio::test]
    async fn update_transport_error_is_reported() {
        let hosting = FakeHosting::default().with_comments(&[&format!("{MARKER}42")]);
        let tracker = FakeTracker::default().failing_update();
        let ctx = context(hosting, tracker.clone());

        let err = close_mirror(&ctx, &event("closed")).await.unwrap_err();

        assert!(matches!(err, AppError::IssueTracker(_)));
        assert!(err.to_string().contains("error closing issue"));
        assert_eq!(tracker.updates().len(), 1);
    }

    #[tokio::test]
    async fn listing_failure_is_reported() {
        let hosting = FakeHosting::default().failing_listing();
        let ctx = context(hosting, FakeTracker::default());

        let err = close_mirror(&ctx, &event("closed")).await.unwrap_err();

        assert!(matches!(err, AppError::Hosting(_)));
    }
}
