use serde_json::Value;
use tracing::debug;

/// One element of a list-shaped message content field.
///
/// Completion providers disagree on the shape here: some send labeled
/// objects carrying a `text` field, some send bare strings, and a few send
/// block types this crate does not know about. Unknown shapes are kept
/// structurally but contribute nothing when flattened.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    Text(String),
    Plain(String),
    Other(Value),
}

impl ContentBlock {
    pub fn from_value(value: &Value) -> Self {
        if let Some(text) = value.get("text").and_then(|t| t.as_str()) {
            return ContentBlock::Text(text.to_string());
        }
        if let Some(text) = value.as_str() {
            return ContentBlock::Plain(text.to_string());
        }
        debug!(target: "route_agent::content", block = %value, "skipping unrecognized content block");
        ContentBlock::Other(value.clone())
    }
}

/// The content field of a chat message, as found on the wire.
///
/// Models the three shapes the completion API is known to produce: a plain
/// string, a list of blocks, or null.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
    #[default]
    Empty,
}

impl MessageContent {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => MessageContent::Empty,
            Value::String(text) => MessageContent::Text(text.clone()),
            Value::Array(items) => {
                MessageContent::Blocks(items.iter().map(ContentBlock::from_value).collect())
            }
            other => MessageContent::Text(other.to_string()),
        }
    }

    /// Flatten to a single plain string.
    ///
    /// Idempotent: flattening an already-plain string returns it unchanged.
    pub fn flatten(&self) -> String {
        match self {
            MessageContent::Text(text) => text.clone(),
            MessageContent::Blocks(blocks) => {
                let mut flat = String::new();
                for block in blocks {
                    match block {
                        ContentBlock::Text(text) | ContentBlock::Plain(text) => {
                            flat.push_str(text)
                        }
                        ContentBlock::Other(_) => {}
                    }
                }
                flat
            }
            MessageContent::Empty => String::new(),
        }
    }
}

/// Normalize a raw wire content value to a plain string
pub fn normalize(value: &Value) -> String {
    MessageContent::from_value(value).flatten()
}
