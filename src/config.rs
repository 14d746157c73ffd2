use std::env;
use std::time::Duration;

use crate::error::{AgentError, Result};

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_MODEL: &str = "openai/gpt-3.5-turbo";
const DEFAULT_INTENT_URL: &str = "http://0.0.0.0:8000/detect_intent/";
const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that handles chat-oriented queries clearly and concisely.";

/// All endpoint and model settings, resolved once at startup.
///
/// Nothing in the crate reads environment variables after this struct is
/// built; it is handed to the client/agent constructors explicitly.
#[derive(Clone, Debug)]
pub struct AgentConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub intent_url: String,
    pub system_prompt: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub request_timeout: Duration,
    pub intent_timeout: Duration,
}

impl AgentConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            intent_url: DEFAULT_INTENT_URL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            temperature: 0.7,
            max_tokens: Some(500),
            request_timeout: Duration::from_secs(120),
            intent_timeout: Duration::from_secs(5),
        }
    }

    /// Resolve configuration from the environment.
    ///
    /// `OPENROUTER_API_KEY` is required (`OPENAI_API_KEY` is accepted as a
    /// fallback); `OPENROUTER_BASE_URL` / `OPENAI_BASE_URL` and
    /// `INTENT_API_URL` override their defaults when present.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("OPENROUTER_API_KEY")
            .or_else(|_| env::var("OPENAI_API_KEY"))
            .map_err(|_| {
                AgentError::Config(
                    "OPENROUTER_API_KEY environment variable must be set before creating an agent"
                        .to_string(),
                )
            })?;

        let mut config = Self::new(api_key);
        if let Ok(base_url) =
            env::var("OPENROUTER_BASE_URL").or_else(|_| env::var("OPENAI_BASE_URL"))
        {
            config.base_url = base_url;
        }
        if let Ok(intent_url) = env::var("INTENT_API_URL") {
            config.intent_url = intent_url;
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_intent_url(mut self, intent_url: impl Into<String>) -> Self {
        self.intent_url = intent_url.into();
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_intent_timeout(mut self, timeout: Duration) -> Self {
        self.intent_timeout = timeout;
        self
    }
}
