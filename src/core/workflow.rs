use tracing::info;

use crate::{
    config::AgentConfig,
    core::{
        agent::ChatAgent,
        router::{IntentRouter, Route},
    },
    error::Result,
    services::IntentClient,
    types::{ConversationState, Message},
};

/// The single-decision workflow: router, then exactly one response node.
///
/// No loops, no further branching; one execution per user input.
#[derive(Debug)]
pub struct Workflow {
    router: IntentRouter,
    agent: ChatAgent,
}

impl Workflow {
    pub fn new(router: IntentRouter, agent: ChatAgent) -> Self {
        Self { router, agent }
    }

    pub fn from_config(config: &AgentConfig) -> Self {
        let intent_client =
            IntentClient::new(config.intent_url.clone()).with_timeout(config.intent_timeout);

        Self {
            router: IntentRouter::new(intent_client),
            agent: ChatAgent::from_config(config),
        }
    }

    pub fn agent_mut(&mut self) -> &mut ChatAgent {
        &mut self.agent
    }

    /// Process one user input to completion.
    ///
    /// Classification failures never surface (the router absorbs them);
    /// chat-agent failures propagate to the caller.
    pub async fn run(&self, input: &str) -> Result<ConversationState> {
        let mut state = ConversationState::new(input);

        let route = self.router.route(state.user_input()).await;
        info!(target: "route_agent::workflow", route = route.as_str(), "routing input");

        match route {
            Route::Chat => self.chat_node(&mut state).await?,
            Route::Clarify => self.clarification_node(&mut state),
        }

        Ok(state)
    }

    async fn chat_node(&self, state: &mut ConversationState) -> Result<()> {
        let user_input = state.take_input();
        let reply = self.agent.ask(&user_input).await?;

        state.push(Message::human(user_input));
        state.push(Message::assistant(reply));
        state.set_route(Route::Chat);
        Ok(())
    }

    fn clarification_node(&self, state: &mut ConversationState) {
        let original_input = state.take_input();
        state.push(Message::human(clarification_message(&original_input)));
        state.set_route(Route::Clarify);
    }
}

pub(crate) fn clarification_message(original_input: &str) -> String {
    format!(
        "I can only help with chat requests. Your input was: '{}'.",
        original_input
    )
}
