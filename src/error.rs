use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("hosting service error: {0}")]
    Hosting(String),
    #[error("issue tracker error: {0}")]
    IssueTracker(String),
    #[error("mirror link error: {0}")]
    MirrorLink(String),
    #[error("invalid event: {0}")]
    InvalidEvent(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
