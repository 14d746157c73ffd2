//! route-agent-rs: a lightweight intent-routed chat workflow
//!
//! Each user input is classified by an external intent detection service
//! and dispatched to exactly one of two response nodes: a chat-completion
//! agent (OpenRouter-compatible) or a deterministic clarification message.
//! Classification failures degrade gracefully to the clarification path;
//! genuine model-invocation failures propagate to the caller.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use route_agent_rs::{AgentConfig, Workflow};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AgentConfig::from_env()?;
//!     let workflow = Workflow::from_config(&config);
//!
//!     let state = workflow.run("hi there").await?;
//!     for message in state.messages() {
//!         println!("{}", message.content());
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod services;
pub mod tools;
pub mod types;

pub use config::AgentConfig;
pub use core::{ChatAgent, IntentRouter, Route, Workflow, TOOL_ONLY_SYSTEM_PROMPT};
pub use error::{AgentError, Result};
pub use services::{ChatClient, ChatCompletionRequest, IntentClient, IntentResult};
pub use tools::{CalculatorTool, Tool, ToolRegistry};
pub use types::{normalize, ContentBlock, ConversationState, Message, MessageContent, Role};

#[cfg(feature = "cli")]
pub mod cli;
