use serde_json::Value;

use crate::error::{AgentError, Result};

/// Extract tool_call_id from a tool call JSON object
pub(crate) fn extract_tool_call_id(tool_call: &Value) -> &str {
    tool_call
        .get("id")
        .and_then(|value| value.as_str())
        .unwrap_or_default()
}

/// Extract the function name from a tool call JSON object
pub(crate) fn extract_function_name(tool_call: &Value) -> Option<String> {
    tool_call
        .get("function")
        .and_then(|function| function.get("name"))
        .and_then(|value| value.as_str())
        .filter(|name| !name.is_empty())
        .map(|name| name.to_string())
}

/// Parse the JSON-string arguments of a tool call
pub(crate) fn parse_arguments(tool_call: &Value, function_name: &str) -> Result<Value> {
    let arguments_str = tool_call
        .get("function")
        .and_then(|function| function.get("arguments"))
        .and_then(|value| value.as_str())
        .unwrap_or("");

    serde_json::from_str(arguments_str).map_err(|err| {
        AgentError::InvalidToolCall(format!(
            "Failed to parse arguments for tool '{}': {}",
            function_name, err
        ))
    })
}
