use std::time::Duration;

use mockito::Matcher;
use route_agent_rs::{
    tools::CalculatorTool, AgentConfig, ChatAgent, IntentClient, IntentRouter, Role, Route,
    Tool, ToolRegistry, Workflow, TOOL_ONLY_SYSTEM_PROMPT,
};
use serde_json::json;

fn test_config(completion_url: &str, intent_url: &str) -> AgentConfig {
    AgentConfig::new("sk-test")
        .with_base_url(completion_url)
        .with_intent_url(intent_url)
        .with_request_timeout(Duration::from_secs(5))
        .with_intent_timeout(Duration::from_secs(2))
}

async fn mock_intents(server: &mut mockito::ServerGuard, body: &str, status: usize) -> mockito::Mock {
    server
        .mock("POST", "/detect_intent/")
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

#[tokio::test]
async fn test_router_detects_chat_intent() {
    let mut server = mockito::Server::new_async().await;
    let _mock = mock_intents(&mut server, r#"{"intents": ["chat"]}"#, 200).await;

    let router = IntentRouter::new(IntentClient::new(format!("{}/detect_intent/", server.url())));
    assert_eq!(router.route("hi there").await, Route::Chat);
}

#[tokio::test]
async fn test_router_without_chat_intent_clarifies() {
    let mut server = mockito::Server::new_async().await;
    let _mock = mock_intents(&mut server, r#"{"intents": ["weather", "search"]}"#, 200).await;

    let router = IntentRouter::new(IntentClient::new(format!("{}/detect_intent/", server.url())));
    assert_eq!(router.route("what's the weather").await, Route::Clarify);
}

#[tokio::test]
async fn test_router_empty_intents_clarifies() {
    let mut server = mockito::Server::new_async().await;
    let _mock = mock_intents(&mut server, r#"{"intents": []}"#, 200).await;

    let router = IntentRouter::new(IntentClient::new(format!("{}/detect_intent/", server.url())));
    assert_eq!(router.route("hmm").await, Route::Clarify);
}

#[tokio::test]
async fn test_router_bad_status_clarifies() {
    let mut server = mockito::Server::new_async().await;
    let _mock = mock_intents(&mut server, r#"{"detail": "boom"}"#, 500).await;

    let router = IntentRouter::new(IntentClient::new(format!("{}/detect_intent/", server.url())));
    assert_eq!(router.route("hi").await, Route::Clarify);
}

#[tokio::test]
async fn test_router_malformed_payload_clarifies() {
    let mut server = mockito::Server::new_async().await;
    let _mock = mock_intents(&mut server, "not json at all", 200).await;

    let router = IntentRouter::new(IntentClient::new(format!("{}/detect_intent/", server.url())));
    assert_eq!(router.route("hi").await, Route::Clarify);
}

#[tokio::test]
async fn test_workflow_chat_path() {
    let mut server = mockito::Server::new_async().await;
    let _intent = mock_intents(&mut server, r#"{"intents": ["chat"]}"#, 200).await;
    let _completion = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "choices": [{"message": {"role": "assistant", "content": "Hello!"}}]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let config = test_config(&server.url(), &format!("{}/detect_intent/", server.url()));
    let workflow = Workflow::from_config(&config);

    let state = workflow.run("hi there").await.unwrap();

    assert_eq!(state.route_taken(), Some(Route::Chat));
    assert_eq!(state.user_input(), "");
    assert_eq!(state.messages().len(), 2);
    assert_eq!(state.messages()[0].role(), Role::Human);
    assert_eq!(state.messages()[0].content(), "hi there");
    assert_eq!(state.messages()[1].role(), Role::Assistant);
    assert_eq!(state.messages()[1].content(), "Hello!");
}

#[tokio::test]
async fn test_workflow_unreachable_intent_service_clarifies() {
    // nothing listens on port 9
    let config = test_config(
        "https://openrouter.ai/api/v1",
        "http://127.0.0.1:9/detect_intent/",
    );
    let workflow = Workflow::from_config(&config);

    let state = workflow.run("what's the weather").await.unwrap();

    assert_eq!(state.route_taken(), Some(Route::Clarify));
    assert_eq!(state.messages().len(), 1);
    assert_eq!(state.messages()[0].role(), Role::Human);
    assert!(state.messages()[0].content().contains("what's the weather"));
    assert!(state.messages()[0]
        .content()
        .starts_with("I can only help with chat requests."));
}

#[tokio::test]
async fn test_workflow_completion_failure_propagates() {
    let mut server = mockito::Server::new_async().await;
    let _intent = mock_intents(&mut server, r#"{"intents": ["chat"]}"#, 200).await;
    let _completion = server
        .mock("POST", "/chat/completions")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": {"message": "upstream exploded"}}"#)
        .create_async()
        .await;

    let config = test_config(&server.url(), &format!("{}/detect_intent/", server.url()));
    let workflow = Workflow::from_config(&config);

    let result = workflow.run("hi there").await;
    let error = result.unwrap_err();
    assert!(error.to_string().contains("upstream exploded"));
}

#[tokio::test]
async fn test_workflow_block_content_normalized() {
    let mut server = mockito::Server::new_async().await;
    let _intent = mock_intents(&mut server, r#"{"intents": ["chat"]}"#, 200).await;
    let _completion = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "choices": [{"message": {
                    "role": "assistant",
                    "content": [{"type": "text", "text": "Hel"}, {"type": "text", "text": "lo!"}]
                }}]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let config = test_config(&server.url(), &format!("{}/detect_intent/", server.url()));
    let workflow = Workflow::from_config(&config);

    let state = workflow.run("hi").await.unwrap();
    assert_eq!(state.messages()[1].content(), "Hello!");
}

#[tokio::test]
async fn test_agent_null_content_is_empty_reply() {
    let mut server = mockito::Server::new_async().await;
    let _completion = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "choices": [{"message": {"role": "assistant", "content": null}, "finish_reason": "length"}]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let config = test_config(&server.url(), "http://127.0.0.1:9/detect_intent/");
    let agent = ChatAgent::from_config(&config);

    assert_eq!(agent.ask("hi").await.unwrap(), "");
}

#[tokio::test]
async fn test_tool_restricted_agent_refuses_without_tool_use() {
    let mut server = mockito::Server::new_async().await;
    let _completion = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "choices": [{"message": {"role": "assistant", "content": "The answer is 12."}}]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let config = test_config(&server.url(), "http://127.0.0.1:9/detect_intent/")
        .with_system_prompt(TOOL_ONLY_SYSTEM_PROMPT);
    let mut agent = ChatAgent::from_config(&config);
    agent.register_tool(CalculatorTool::new());

    let reply = agent.ask("what is 5 plus 7").await.unwrap();
    assert_eq!(
        reply,
        "I'm unable to help with that using the available tools."
    );
}

#[tokio::test]
async fn test_tool_restricted_agent_executes_tool_round() {
    let mut server = mockito::Server::new_async().await;

    // first request offers tools
    let _first = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex("tool_choice".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "choices": [{"message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {
                            "name": "calculator",
                            "arguments": "{\"operation\": \"add\", \"a\": 5, \"b\": 7}"
                        }
                    }]
                }}]
            })
            .to_string(),
        )
        .create_async()
        .await;

    // follow-up request carries the tool result back
    let _followup = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex("tool_call_id".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "choices": [{"message": {"role": "assistant", "content": "5 plus 7 is 12."}}]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let config = test_config(&server.url(), "http://127.0.0.1:9/detect_intent/")
        .with_system_prompt(TOOL_ONLY_SYSTEM_PROMPT);
    let mut agent = ChatAgent::from_config(&config);
    agent.register_tool(CalculatorTool::new());

    let reply = agent.ask("what is 5 plus 7").await.unwrap();
    assert_eq!(reply, "5 plus 7 is 12.");
}

#[tokio::test]
async fn test_calculator_tool() {
    let calculator = CalculatorTool::new();

    let params = json!({
        "operation": "add",
        "a": 5.0,
        "b": 7.0
    });
    let result = calculator.execute(params).await.unwrap();
    assert_eq!(result["result"], 12.0);

    let params = json!({
        "operation": "divide",
        "a": 5.0,
        "b": 0.0
    });
    let result = calculator.execute(params).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_tool_registry() {
    let mut registry = ToolRegistry::new();
    registry.register(CalculatorTool::new());

    assert!(registry.has_tool("calculator"));
    assert!(!registry.has_tool("nonexistent"));

    let params = json!({
        "operation": "multiply",
        "a": 4.0,
        "b": 5.0
    });
    let result = registry.execute("calculator", params).await.unwrap();
    assert_eq!(result["result"], 20.0);

    let wire_tools = registry.to_wire_tools();
    assert_eq!(wire_tools.len(), 1);
    assert_eq!(wire_tools[0]["function"]["name"], "calculator");
    assert!(wire_tools[0]["function"]["parameters"]
        .get("properties")
        .is_some());
}

#[tokio::test]
async fn test_intent_request_shape() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/detect_intent/")
        .match_body(Matcher::Json(json!({"query": "hi there"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"intents": ["chat"]}"#)
        .create_async()
        .await;

    let client = IntentClient::new(format!("{}/detect_intent/", server.url()));
    let result = client.detect_intent("hi there").await.unwrap();
    assert!(result.contains("chat"));
    mock.assert_async().await;
}
