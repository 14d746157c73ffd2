pub mod chat_client;
pub mod intent_client;
pub(crate) mod tool_calls;

pub use chat_client::{ChatClient, ChatCompletionRequest};
pub use intent_client::{IntentClient, IntentResult};
