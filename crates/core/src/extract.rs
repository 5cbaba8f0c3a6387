//! Lenient extraction of the word list from free-form tutor replies.
//!
//! The tutor is asked for a JSON array but usually wraps it in prose, so the
//! reply is scanned for the first `[` and the last `]` and only that slice is
//! parsed.

use thiserror::Error;

use crate::model::{Word, WordSet, WordSetError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExtractError {
    #[error("reply does not contain a JSON array")]
    MissingArray,

    #[error("word list is not valid JSON: {0}")]
    InvalidJson(String),

    #[error(transparent)]
    WrongCount(#[from] WordSetError),
}

/// Pull a [`WordSet`] out of a tutor reply.
///
/// # Errors
///
/// Returns `ExtractError::MissingArray` if no `[ ... ]` span exists,
/// `ExtractError::InvalidJson` if the span is not an array of `{word, phonetic}`
/// objects, and `ExtractError::WrongCount` if the array does not hold exactly
/// five words.
pub fn extract_word_set(reply: &str) -> Result<WordSet, ExtractError> {
    let start = reply.find('[').ok_or(ExtractError::MissingArray)?;
    let end = reply.rfind(']').ok_or(ExtractError::MissingArray)?;
    if end < start {
        return Err(ExtractError::MissingArray);
    }

    let words: Vec<Word> = serde_json::from_str(&reply[start..=end])
        .map_err(|err| ExtractError::InvalidJson(err.to_string()))?;
    Ok(WordSet::new(words)?)
}
