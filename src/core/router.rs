use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::services::IntentClient;

const CHAT_INTENT: &str = "chat";

/// The downstream path selected for an input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Chat,
    Clarify,
}

impl Route {
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Chat => "chat",
            Route::Clarify => "clarify",
        }
    }
}

/// Picks a route for each input by calling the classification service
#[derive(Clone, Debug)]
pub struct IntentRouter {
    client: IntentClient,
}

impl IntentRouter {
    pub fn new(client: IntentClient) -> Self {
        Self { client }
    }

    /// Decide the route for one input.
    ///
    /// Infallible: every failure of the classification call (timeout,
    /// connection error, bad status, malformed payload) resolves to
    /// `Route::Clarify`.
    pub async fn route(&self, input: &str) -> Route {
        match self.client.detect_intent(input).await {
            Ok(result) => {
                info!(
                    target: "route_agent::router",
                    intents = ?result.labels(),
                    "intent detection response"
                );
                if result.contains(CHAT_INTENT) {
                    Route::Chat
                } else {
                    Route::Clarify
                }
            }
            Err(err) => {
                warn!(
                    target: "route_agent::router",
                    error = %err,
                    "intent detection failed, falling back to clarification"
                );
                Route::Clarify
            }
        }
    }
}
