use async_trait::async_trait;
use buddy_core::Message;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{ChatCompletions, TutorConfig};
use crate::error::TutorError;

/// `ChatCompletions` over an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Clone)]
pub struct OpenAiChatClient {
    client: Client,
    config: Option<TutorConfig>,
}

impl OpenAiChatClient {
    /// Build a client from `WORD_BUDDY_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `TutorError::Http` if the HTTP client cannot be built.
    pub fn from_env() -> Result<Self, TutorError> {
        Self::new(TutorConfig::from_env())
    }

    /// A client without config is disabled and fails every request.
    ///
    /// # Errors
    ///
    /// Returns `TutorError::Http` if the HTTP client cannot be built.
    pub fn new(config: Option<TutorConfig>) -> Result<Self, TutorError> {
        let mut builder = Client::builder();
        if let Some(config) = config.as_ref() {
            builder = builder.timeout(config.timeout);
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> Option<&TutorConfig> {
        self.config.as_ref()
    }
}

#[async_trait]
impl ChatCompletions for OpenAiChatClient {
    async fn complete(&self, messages: &[Message]) -> Result<String, TutorError> {
        let config = self.config.as_ref().ok_or(TutorError::Disabled)?;

        let payload = ChatRequest {
            model: &config.model,
            messages,
        };
        tracing::debug!(model = %config.model, messages = messages.len(), "sending chat completion");

        let response = self
            .client
            .post(config.completions_url())
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TutorError::HttpStatus(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        reply_content(body)
    }

    fn enabled(&self) -> bool {
        self.config.is_some()
    }
}

fn reply_content(body: ChatResponse) -> Result<String, TutorError> {
    body.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or(TutorError::EmptyResponse)
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}
