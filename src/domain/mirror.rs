use crate::error::{AppError, AppResult};

pub const DEFAULT_PUBLIC_URL: &str = "https://projects.sdzecom.de";

const MARKER_LABEL: &str = "IssueInRedmine: ";

/// Encodes and recognises the back-reference comment that links an upstream
/// issue to its Redmine ticket: `IssueInRedmine: <public-url>/issues/<id>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorMarker {
    prefix: String,
}

impl MirrorMarker {
    pub fn new(public_url: &str) -> Self {
        Self {
            prefix: format!(
                "{MARKER_LABEL}{}/issues/",
                public_url.trim_end_matches('/')
            ),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn encode(&self, ticket_id: u64) -> String {
        format!("{}{ticket_id}", self.prefix)
    }

    /// Returns `None` when the comment carries no marker. A marker whose
    /// trailing path segment is not a ticket id yields an error.
    pub fn decode(&self, comment_body: &str) -> Option<AppResult<u64>> {
        if !comment_body.contains(self.prefix()) {
            return None;
        }

        let suffix = comment_body
            .rsplit('/')
            .next()
            .unwrap_or(comment_body)
            .trim();

        Some(match suffix.parse::<i64>() {
            Ok(id) if id > 0 => Ok(id as u64),
            Ok(id) => Err(AppError::MirrorLink(format!(
                "issue id {id} is not a positive ticket id"
            ))),
            Err(err) => Err(AppError::MirrorLink(format!(
                "error parsing issue id '{suffix}': {err}"
            ))),
        })
    }
}

impl Default for MirrorMarker {
    fn default() -> Self {
        Self::new(DEFAULT_PUBLIC_URL)
    }
}
