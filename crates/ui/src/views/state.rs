use buddy_core::SessionError;
use services::{PracticeError, TutorError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    TutorDisabled,
    TutorUnreachable,
    UnreadableWords,
    Busy,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::TutorDisabled => {
                "The tutor is not configured. Set WORD_BUDDY_API_KEY and restart."
            }
            ViewError::TutorUnreachable => "Could not reach the tutor. Please try again.",
            ViewError::UnreadableWords => {
                "The tutor's word list could not be read. Please try again."
            }
            ViewError::Busy => "Still waiting for the tutor.",
            ViewError::Unknown => "Something went wrong. Please try again.",
        }
    }

    #[must_use]
    pub fn from_session(err: &SessionError) -> Self {
        match err {
            SessionError::Busy => ViewError::Busy,
            SessionError::Parse(_) => ViewError::UnreadableWords,
            _ => ViewError::Unknown,
        }
    }

    #[must_use]
    pub fn from_practice(err: &PracticeError) -> Self {
        match err {
            PracticeError::Session(err) => Self::from_session(err),
            PracticeError::Tutor(TutorError::Disabled) => ViewError::TutorDisabled,
            PracticeError::Tutor(_) => ViewError::TutorUnreachable,
            _ => ViewError::Unknown,
        }
    }
}
