use std::sync::Arc;

use buddy_core::{PendingRequest, Session, SessionError};

use crate::error::{PracticeError, TutorError};
use crate::tutor::ChatCompletions;

/// Result of submitting a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The sentence was blank; nothing was sent.
    Ignored,
    /// Feedback was recorded and more words remain.
    Continue,
    /// Feedback for the last word was recorded.
    Finished,
}

/// Drives a [`Session`] against the tutor.
///
/// The `start_round`/`submit_sentence` helpers hold the session for the whole
/// request. Callers that must keep rendering while a request is in flight
/// (the UI) use the split form instead: `Session::begin_*`, then [`Self::send`],
/// then [`Self::resolve_word_set`] or [`Self::resolve_feedback`].
#[derive(Clone)]
pub struct PracticeService {
    tutor: Arc<dyn ChatCompletions>,
}

impl PracticeService {
    #[must_use]
    pub fn new(tutor: Arc<dyn ChatCompletions>) -> Self {
        Self { tutor }
    }

    #[must_use]
    pub fn tutor_enabled(&self) -> bool {
        self.tutor.enabled()
    }

    /// Fetch a fresh word list and restart the round at the first word.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::Session` if a request is already in flight or the
    /// reply holds no usable word list, and `PracticeError::Tutor` for transport
    /// failures. The session is unchanged apart from its loading flag on error.
    pub async fn start_round(&self, session: &mut Session) -> Result<(), PracticeError> {
        let pending = session.begin_word_set()?;
        let reply = self.send(&pending).await;
        Self::resolve_word_set(session, pending, reply)
    }

    /// Same as [`Self::start_round`]; discards the previous round on success.
    ///
    /// # Errors
    ///
    /// See [`Self::start_round`].
    pub async fn restart_round(&self, session: &mut Session) -> Result<(), PracticeError> {
        self.start_round(session).await
    }

    /// Ask the tutor for feedback on a sentence for the current word.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::Session` when no word is loaded, the round is
    /// finished, or a request is in flight, and `PracticeError::Tutor` for
    /// transport failures.
    pub async fn submit_sentence(
        &self,
        session: &mut Session,
        sentence: &str,
    ) -> Result<SubmitOutcome, PracticeError> {
        let Some(pending) = session.begin_submission(sentence)? else {
            return Ok(SubmitOutcome::Ignored);
        };
        let reply = self.send(&pending).await;
        Self::resolve_feedback(session, pending, reply)
    }

    /// Move to the next word. Returns whether the index changed.
    pub fn advance_word(session: &mut Session) -> bool {
        session.advance()
    }

    /// Send a pending request's transcript to the tutor.
    ///
    /// # Errors
    ///
    /// Returns `TutorError` from the backend.
    pub async fn send(&self, pending: &PendingRequest) -> Result<String, TutorError> {
        tracing::debug!(request = %pending.id(), kind = ?pending.kind(), "tutor request");
        self.tutor.complete(pending.messages()).await
    }

    /// Apply a word list reply, or release the slot if the request failed.
    ///
    /// # Errors
    ///
    /// Returns the transport error, or the session error if the reply could not
    /// be parsed.
    pub fn resolve_word_set(
        session: &mut Session,
        pending: PendingRequest,
        reply: Result<String, TutorError>,
    ) -> Result<(), PracticeError> {
        let reply = match reply {
            Ok(reply) => reply,
            Err(err) => {
                tracing::warn!(error = %err, "word list request failed");
                session.abandon(pending)?;
                return Err(err.into());
            }
        };

        match session.complete_word_set(pending, &reply) {
            Ok(words) => {
                tracing::info!(words = words.len(), "practice round started");
                Ok(())
            }
            Err(err @ SessionError::Parse(_)) => {
                tracing::warn!(error = %err, reply = %reply, "failed to parse tutor word list");
                Err(err.into())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Apply a feedback reply, or release the slot if the request failed.
    ///
    /// # Errors
    ///
    /// Returns the transport error, or a session error for a stale token.
    pub fn resolve_feedback(
        session: &mut Session,
        pending: PendingRequest,
        reply: Result<String, TutorError>,
    ) -> Result<SubmitOutcome, PracticeError> {
        match reply {
            Ok(reply) => {
                session.complete_feedback(pending, reply)?;
                if session.is_finished() {
                    tracing::info!("practice round finished");
                    Ok(SubmitOutcome::Finished)
                } else {
                    Ok(SubmitOutcome::Continue)
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "feedback request failed");
                session.abandon(pending)?;
                Err(err.into())
            }
        }
    }
}
