use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Connection settings for an OpenAI-compatible chat endpoint.
#[derive(Clone, Debug)]
pub struct TutorConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

impl TutorConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Read the config from `WORD_BUDDY_*` variables.
    ///
    /// Returns `None` when no API key is set.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let api_key = lookup("WORD_BUDDY_API_KEY")?;
        if api_key.trim().is_empty() {
            return None;
        }
        let mut config = Self::new(api_key.trim());
        if let Some(base_url) = lookup("WORD_BUDDY_BASE_URL").filter(|v| !v.trim().is_empty()) {
            config.base_url = base_url;
        }
        if let Some(model) = lookup("WORD_BUDDY_MODEL").filter(|v| !v.trim().is_empty()) {
            config.model = model;
        }
        if let Some(secs) = lookup("WORD_BUDDY_TIMEOUT_SECS").and_then(|v| v.parse::<u64>().ok()) {
            config.timeout = Duration::from_secs(secs);
        }
        Some(config)
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}
