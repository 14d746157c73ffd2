use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AgentError, Result};

const DEFAULT_INTENT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize)]
struct IntentRequest<'a> {
    query: &'a str,
}

/// Label set returned by the classification service.
///
/// Transient: consumed once by the router and discarded.
#[derive(Debug, Clone, Deserialize)]
pub struct IntentResult {
    intents: Vec<String>,
}

impl IntentResult {
    pub fn contains(&self, label: &str) -> bool {
        self.intents.iter().any(|intent| intent == label)
    }

    pub fn labels(&self) -> &[String] {
        &self.intents
    }
}

/// Client for the external intent classification endpoint.
///
/// One POST per call, single attempt, hard timeout. Callers decide what a
/// failure means; this client just reports it.
#[derive(Clone, Debug)]
pub struct IntentClient {
    url: String,
    timeout: Duration,
}

impl IntentClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_INTENT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Classify one input string into a set of intent labels
    pub async fn detect_intent(&self, query: &str) -> Result<IntentResult> {
        let client = reqwest::Client::builder().timeout(self.timeout).build()?;

        let response = client
            .post(&self.url)
            .json(&IntentRequest { query })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AgentError::Intent(format!(
                "intent endpoint returned status {}",
                status
            )));
        }

        let response_text = response.text().await?;
        let result: IntentResult = serde_json::from_str(&response_text)?;
        Ok(result)
    }
}
