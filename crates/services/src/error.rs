//! Shared error types for the services crate.

use thiserror::Error;

use buddy_core::SessionError;

/// Errors emitted by the tutor transport.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TutorError {
    #[error("tutor is not configured")]
    Disabled,
    #[error("tutor returned an empty response")]
    EmptyResponse,
    #[error("tutor request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `PracticeService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PracticeError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Tutor(#[from] TutorError),
}
