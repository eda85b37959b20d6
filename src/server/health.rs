use chrono::{SecondsFormat, Utc};

use super::response::MessageResponse;

/// Liveness probe. The message is the current time in RFC 3339.
pub async fn health_handler() -> MessageResponse {
    MessageResponse::ok(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true))
}
