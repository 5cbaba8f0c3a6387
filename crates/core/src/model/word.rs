use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of words practiced in one round.
pub const WORDS_PER_ROUND: usize = 5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WordSetError {
    #[error("expected {expected} words, got {actual}")]
    WrongCount { expected: usize, actual: usize },
}

/// A vocabulary word together with a simple phonetic spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    word: String,
    phonetic: String,
}

impl Word {
    #[must_use]
    pub fn new(word: impl Into<String>, phonetic: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            phonetic: phonetic.into(),
        }
    }

    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    #[must_use]
    pub fn phonetic(&self) -> &str {
        &self.phonetic
    }
}

/// The words of one practice round, always exactly [`WORDS_PER_ROUND`] long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSet {
    words: Vec<Word>,
}

impl WordSet {
    /// Validate a fetched word list.
    ///
    /// # Errors
    ///
    /// Returns `WordSetError::WrongCount` unless exactly [`WORDS_PER_ROUND`] words are given.
    pub fn new(words: Vec<Word>) -> Result<Self, WordSetError> {
        if words.len() != WORDS_PER_ROUND {
            return Err(WordSetError::WrongCount {
                expected: WORDS_PER_ROUND,
                actual: words.len(),
            });
        }
        Ok(Self { words })
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Word> {
        self.words.get(index)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Word] {
        &self.words
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false; kept for parity with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Index of the final word in the round.
    #[must_use]
    pub const fn last_index() -> usize {
        WORDS_PER_ROUND - 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &Word> {
        self.words.iter()
    }
}
