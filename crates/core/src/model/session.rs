use thiserror::Error;

use crate::extract::{ExtractError, extract_word_set};
use crate::model::{Message, RequestId, Word, WordSet};
use crate::prompt;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("a tutor request is already in flight")]
    Busy,

    #[error("no words loaded")]
    NoWords,

    #[error("round already finished")]
    Finished,

    #[error("request {0} does not belong to the in-flight slot")]
    StaleRequest(RequestId),

    #[error("request {0} completed as the wrong kind")]
    RequestMismatch(RequestId),

    #[error(transparent)]
    Parse(#[from] ExtractError),
}

/// Coarse lifecycle of a practice session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No words loaded yet.
    Idle,
    /// A word is shown and no request is pending.
    AwaitingInput,
    /// A tutor request is in flight.
    Submitting,
    /// The last word has been answered. Only a restart leaves this phase.
    Finished,
}

/// What an in-flight request is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    WordSet,
    /// Feedback on a sentence written for the word at `index`.
    Feedback { index: usize },
}

/// Token for the single in-flight request of a [`Session`].
///
/// Returned by the `begin_*` methods and consumed by `complete_*` or
/// [`Session::abandon`]. While it exists the session reports itself as loading
/// and refuses to start another request.
#[derive(Debug)]
#[must_use = "a pending request must be completed or abandoned"]
pub struct PendingRequest {
    id: RequestId,
    kind: RequestKind,
    messages: Vec<Message>,
    user_message: Option<Message>,
}

impl PendingRequest {
    #[must_use]
    pub fn id(&self) -> RequestId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    /// Full transcript to send, persona first.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}

/// State of one five-word practice session.
///
/// The session owns the word list, the position within it, the transcript
/// exchanged with the tutor, the student's input buffer, and the loading and
/// finished flags. All transitions happen through methods on this type; IO is
/// performed by the caller between `begin_*` and `complete_*`.
#[derive(Debug, Clone, Default)]
pub struct Session {
    words: Option<WordSet>,
    current: usize,
    transcript: Vec<Message>,
    input: String,
    finished: bool,
    in_flight: Option<RequestId>,
    next_request: u64,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    //
    // ─── QUERIES ───────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.in_flight.is_some() {
            SessionPhase::Submitting
        } else if self.words.is_none() {
            SessionPhase::Idle
        } else if self.finished {
            SessionPhase::Finished
        } else {
            SessionPhase::AwaitingInput
        }
    }

    /// Loaded words, empty before the first successful start.
    #[must_use]
    pub fn words(&self) -> &[Word] {
        self.words.as_ref().map_or(&[], WordSet::as_slice)
    }

    #[must_use]
    pub fn has_words(&self) -> bool {
        self.words.is_some()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_word(&self) -> Option<&Word> {
        self.words.as_ref().and_then(|words| words.get(self.current))
    }

    #[must_use]
    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// Most recent tutor reply, if any.
    #[must_use]
    pub fn latest_feedback(&self) -> Option<&Message> {
        self.transcript.last()
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn is_last_word(&self) -> bool {
        self.has_words() && self.current >= WordSet::last_index()
    }

    //
    // ─── LOCAL TRANSITIONS ─────────────────────────────────────────────────────
    //

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Move to the next word.
    ///
    /// Returns `false` without changing anything when there are no words, the
    /// last word is already shown, or a request is in flight.
    pub fn advance(&mut self) -> bool {
        if self.in_flight.is_some() || self.words.is_none() || self.is_last_word() {
            return false;
        }
        self.current += 1;
        true
    }

    //
    // ─── REQUESTS ──────────────────────────────────────────────────────────────
    //

    /// Reserve the request slot for fetching a new word list.
    ///
    /// Used both for the first start and for restarting a finished round.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Busy` if another request is in flight.
    pub fn begin_word_set(&mut self) -> Result<PendingRequest, SessionError> {
        let id = self.reserve()?;
        Ok(PendingRequest {
            id,
            kind: RequestKind::WordSet,
            messages: prompt::word_set_request(),
            user_message: None,
        })
    }

    /// Reserve the request slot for feedback on `sentence`.
    ///
    /// Returns `Ok(None)` and leaves the session untouched when the sentence is
    /// empty or whitespace.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Busy` if another request is in flight,
    /// `SessionError::NoWords` before a word list is loaded, and
    /// `SessionError::Finished` once the round is over.
    pub fn begin_submission(
        &mut self,
        sentence: &str,
    ) -> Result<Option<PendingRequest>, SessionError> {
        if sentence.trim().is_empty() {
            return Ok(None);
        }
        if self.in_flight.is_some() {
            return Err(SessionError::Busy);
        }
        if self.finished {
            return Err(SessionError::Finished);
        }
        let word = self.current_word().ok_or(SessionError::NoWords)?;

        let user_message = Message::user(prompt::sentence_prompt(word, sentence));
        let mut messages = Vec::with_capacity(self.transcript.len() + 2);
        messages.push(prompt::persona_message());
        messages.extend(self.transcript.iter().cloned());
        messages.push(user_message.clone());

        let index = self.current;
        let id = self.reserve()?;
        Ok(Some(PendingRequest {
            id,
            kind: RequestKind::Feedback { index },
            messages,
            user_message: Some(user_message),
        }))
    }

    /// Apply the tutor's reply to a word list request.
    ///
    /// On success the round restarts at the first word with an empty
    /// transcript. On a parse failure only the loading flag changes.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Parse` if the reply holds no usable word list,
    /// `SessionError::StaleRequest` if `pending` is not the in-flight request,
    /// and `SessionError::RequestMismatch` if it was not a word list request.
    pub fn complete_word_set(
        &mut self,
        pending: PendingRequest,
        reply: &str,
    ) -> Result<&WordSet, SessionError> {
        self.release(&pending)?;
        if pending.kind != RequestKind::WordSet {
            return Err(SessionError::RequestMismatch(pending.id));
        }

        let words = extract_word_set(reply)?;
        self.current = 0;
        self.transcript.clear();
        self.input.clear();
        self.finished = false;
        Ok(&*self.words.insert(words))
    }

    /// Apply the tutor's feedback to a sentence request.
    ///
    /// Appends the student's message and the reply to the transcript and clears
    /// the input. The round finishes when the request was issued on the last
    /// word.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::StaleRequest` if `pending` is not the in-flight
    /// request and `SessionError::RequestMismatch` if it was not a feedback
    /// request.
    pub fn complete_feedback(
        &mut self,
        pending: PendingRequest,
        reply: impl Into<String>,
    ) -> Result<(), SessionError> {
        self.release(&pending)?;
        let (RequestKind::Feedback { index }, Some(user_message)) =
            (pending.kind, pending.user_message)
        else {
            return Err(SessionError::RequestMismatch(pending.id));
        };

        self.transcript.push(user_message);
        self.transcript.push(Message::assistant(reply));
        self.input.clear();
        if index >= WordSet::last_index() {
            self.finished = true;
        }
        Ok(())
    }

    /// Give up on a request after a transport failure.
    ///
    /// Clears the loading flag and leaves everything else as it was.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::StaleRequest` if `pending` is not the in-flight request.
    pub fn abandon(&mut self, pending: PendingRequest) -> Result<(), SessionError> {
        self.release(&pending)
    }

    fn reserve(&mut self) -> Result<RequestId, SessionError> {
        if self.in_flight.is_some() {
            return Err(SessionError::Busy);
        }
        let id = RequestId::new(self.next_request);
        self.next_request = id.next().value();
        self.in_flight = Some(id);
        Ok(id)
    }

    fn release(&mut self, pending: &PendingRequest) -> Result<(), SessionError> {
        if self.in_flight != Some(pending.id) {
            return Err(SessionError::StaleRequest(pending.id));
        }
        self.in_flight = None;
        Ok(())
    }
}
