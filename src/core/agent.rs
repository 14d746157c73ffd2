use std::time::Duration;

use serde_json::{json, Value};
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::{
    config::AgentConfig,
    error::{AgentError, Result},
    services::{
        chat_client::{ChatClient, ChatCompletionRequest},
        tool_calls::{extract_function_name, extract_tool_call_id, parse_arguments},
    },
    tools::{Tool, ToolRegistry},
    types::content::normalize,
};

/// System prompt for the tool-restricted mode
pub const TOOL_ONLY_SYSTEM_PROMPT: &str = "You are a tool-only agent. Only respond if a tool successfully completes the user's request. If no tool handles the request, respond with: 'I'm unable to help with that using the available tools.'";

const TOOL_REFUSAL: &str = "I'm unable to help with that using the available tools.";

/// Chat-completion agent: one call, one reply.
///
/// With tools registered it runs in tool-restricted mode: tool calls are
/// executed and fed back for a single follow-up completion, and a reply
/// that used no tool is replaced by a canned refusal.
#[derive(Debug)]
pub struct ChatAgent {
    chat_client: ChatClient,
    model: String,
    system_prompt: String,
    temperature: f32,
    max_tokens: Option<u32>,
    timeout: Duration,
    tools: ToolRegistry,
}

impl ChatAgent {
    pub fn from_config(config: &AgentConfig) -> Self {
        let mut chat_client = ChatClient::new(config.api_key.clone());
        chat_client.set_base_url(config.base_url.clone());

        Self {
            chat_client,
            model: config.model.clone(),
            system_prompt: config.system_prompt.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout: config.request_timeout,
            tools: ToolRegistry::new(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
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

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn register_tool<T: Tool + 'static>(&mut self, tool: T) {
        self.tools.register(tool);
    }

    pub fn has_tools(&self) -> bool {
        !self.tools.is_empty()
    }

    /// Submit one input, receive one reply.
    ///
    /// Errors are not absorbed here; a failed completion propagates to the
    /// caller.
    pub async fn ask(&self, input: &str) -> Result<String> {
        if self.tools.is_empty() {
            self.complete_plain(input).await
        } else {
            self.complete_with_tools(input).await
        }
    }

    fn base_messages(&self, input: &str) -> Vec<Value> {
        vec![
            json!({"role": "system", "content": self.system_prompt}),
            json!({"role": "user", "content": input}),
        ]
    }

    async fn request(&self, body: &Value) -> Result<Value> {
        timeout(self.timeout, self.chat_client.chat_completion(body, self.timeout))
            .await
            .map_err(|_| AgentError::Timeout("Chat completion call timed out".to_string()))?
    }

    async fn complete_plain(&self, input: &str) -> Result<String> {
        let request = ChatCompletionRequest::new(self.model.clone(), self.base_messages(input))
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens);

        let response = self.request(&request.into_value()).await?;
        let message = extract_assistant_message(&response)?;
        Ok(reply_text(&message))
    }

    async fn complete_with_tools(&self, input: &str) -> Result<String> {
        let mut messages = self.base_messages(input);

        let request = ChatCompletionRequest::new(self.model.clone(), messages.clone())
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens)
            .with_tools(self.tools.to_wire_tools())
            .with_tool_choice(json!("auto"));

        let response = self.request(&request.into_value()).await?;
        let assistant_message = extract_assistant_message(&response)?;

        let tool_calls = match assistant_message
            .get("tool_calls")
            .and_then(|value| value.as_array())
        {
            Some(calls) if !calls.is_empty() => calls.clone(),
            _ => {
                debug!(
                    target: "route_agent::agent",
                    "no tools were used, rejecting fallback response"
                );
                return Ok(TOOL_REFUSAL.to_string());
            }
        };

        messages.push(json!({
            "role": "assistant",
            "content": assistant_message.get("content").cloned().unwrap_or(Value::Null),
            "tool_calls": tool_calls
        }));

        for tool_call in &tool_calls {
            let tool_call_id = extract_tool_call_id(tool_call);

            let result = match extract_function_name(tool_call) {
                Some(name) => match parse_arguments(tool_call, &name) {
                    Ok(arguments) => match self.tools.execute(&name, arguments).await {
                        Ok(result) => result,
                        Err(err) => err.to_error_payload(),
                    },
                    Err(err) => err.to_error_payload(),
                },
                None => AgentError::InvalidToolCall("Tool call missing function name".to_string())
                    .to_error_payload(),
            };

            messages.push(json!({
                "role": "tool",
                "tool_call_id": tool_call_id,
                "content": result.to_string()
            }));
        }

        // one tool round only; the follow-up completion answers in text
        let followup = ChatCompletionRequest::new(self.model.clone(), messages)
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens);

        let response = self.request(&followup.into_value()).await?;
        let message = extract_assistant_message(&response)?;
        Ok(reply_text(&message))
    }
}

fn extract_assistant_message(response: &Value) -> Result<Value> {
    let choices = response
        .get("choices")
        .and_then(|value| value.as_array())
        .ok_or_else(|| {
            AgentError::Completion("Missing 'choices' array in completion response".to_string())
        })?;

    let first_choice = choices.first().ok_or_else(|| {
        AgentError::Completion("Completion response contained no choices".to_string())
    })?;

    first_choice.get("message").cloned().ok_or_else(|| {
        AgentError::Completion("Completion response missing assistant message".to_string())
    })
}

fn reply_text(message: &Value) -> String {
    match message.get("content") {
        Some(content) => {
            if content.is_null() {
                warn!(target: "route_agent::agent", "model response content was null");
            }
            normalize(content).trim().to_string()
        }
        None => {
            warn!(target: "route_agent::agent", "model response contained no content field");
            String::new()
        }
    }
}
