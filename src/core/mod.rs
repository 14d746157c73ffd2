pub mod agent;
pub mod router;
pub mod workflow;

pub use agent::{ChatAgent, TOOL_ONLY_SYSTEM_PROMPT};
pub use router::{IntentRouter, Route};
pub use workflow::Workflow;
