mod config;
mod openai;

pub use config::TutorConfig;
pub use openai::OpenAiChatClient;

use async_trait::async_trait;
use buddy_core::Message;

use crate::error::TutorError;

/// A chat-completion backend that answers a transcript with one reply.
#[async_trait]
pub trait ChatCompletions: Send + Sync {
    /// Send the transcript and return the assistant's reply text.
    ///
    /// # Errors
    ///
    /// Returns `TutorError` when the backend is unavailable or the reply is unusable.
    async fn complete(&self, messages: &[Message]) -> Result<String, TutorError>;

    /// Whether requests can be issued at all.
    fn enabled(&self) -> bool {
        true
    }
}
