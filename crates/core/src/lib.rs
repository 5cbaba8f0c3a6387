#![forbid(unsafe_code)]

pub mod extract;
pub mod model;
pub mod prompt;

pub use extract::{ExtractError, extract_word_set};
pub use model::{
    Message, PendingRequest, RequestId, RequestKind, Role, Session, SessionError, SessionPhase,
    WORDS_PER_ROUND, Word, WordSet, WordSetError,
};
