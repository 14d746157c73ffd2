use serde::{Deserialize, Serialize};

use super::message::Message;
use crate::core::router::Route;

/// Mutable state for one workflow execution.
///
/// Owned exclusively by a single execution; never shared across concurrent
/// invocations. The message log is append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationState {
    messages: Vec<Message>,
    user_input: String,
    route_taken: Option<Route>,
}

impl ConversationState {
    pub fn new(user_input: impl Into<String>) -> Self {
        Self {
            messages: Vec::new(),
            user_input: user_input.into(),
            route_taken: None,
        }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn user_input(&self) -> &str {
        &self.user_input
    }

    /// Consume the pending input, leaving it empty
    pub fn take_input(&mut self) -> String {
        std::mem::take(&mut self.user_input)
    }

    /// Record which route handled this input, for diagnostics
    pub fn set_route(&mut self, route: Route) {
        self.route_taken = Some(route);
    }

    pub fn route_taken(&self) -> Option<Route> {
        self.route_taken
    }
}
