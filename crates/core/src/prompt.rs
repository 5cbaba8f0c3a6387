//! Fixed prompt text sent to the tutor.

use crate::model::{Message, Word};

/// Persona prepended to every tutor request.
pub const PERSONA: &str = "You are a warm and friendly English tutor called Word Buddy. \
You help students learning English as a second language practice using high-frequency words in sentences.

Your job is to:
- Pick 5 useful high-frequency English words that a beginner/intermediate student should learn.
- For each word, display it with a simple phonetic spelling.
- Ask the student to write a sentence using the word.
- When they respond, check if the sentence uses the word correctly.
- If the word is used incorrectly, gently explain the correct meaning and give an example sentence.
- If the word is spelled wrong, gently correct it.
- Focus more on using the word in context than on perfect spelling.
- Always use warm, encouraging language.";

/// Request for a fresh round of words.
pub const WORD_SET_PROMPT: &str = "Give me 5 useful English words (beginner/intermediate level) \
with phonetic spellings, formatted as a JSON array like this: \
[{\"word\": \"help\", \"phonetic\": \"(help)\"}, ...]";

#[must_use]
pub fn persona_message() -> Message {
    Message::system(PERSONA)
}

/// Messages for the one-shot word list request.
#[must_use]
pub fn word_set_request() -> Vec<Message> {
    vec![persona_message(), Message::user(WORD_SET_PROMPT)]
}

/// User message asking for feedback on `sentence` for `word`.
///
/// The sentence is embedded as typed.
#[must_use]
pub fn sentence_prompt(word: &Word, sentence: &str) -> String {
    format!(
        "The word is \"{}\". The student's sentence is: {sentence}",
        word.word()
    )
}
