use std::env;
use std::io::{self, BufRead, Write};
use std::time::Duration;

use clap::{Arg, ArgAction, Command};
use tracing::{error, info};

use crate::{
    AgentConfig, CalculatorTool, ConversationState, Workflow, TOOL_ONLY_SYSTEM_PROMPT,
};

/// CLI entry point for the route-agent tool
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let matches = Command::new("route-agent")
        .version("0.1.0")
        .about("Routes chat requests through an intent detection service to an OpenRouter-backed agent")
        .arg(
            Arg::new("prompt")
                .help("Run a single prompt and exit instead of starting the interactive loop")
                .index(1),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL")
                .help("The OpenRouter model to use")
                .default_value("openai/gpt-3.5-turbo"),
        )
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .value_name("KEY")
                .help("OpenRouter API key (or set OPENROUTER_API_KEY env var)"),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .help(
                    "OpenRouter base URL (or set OPENROUTER_BASE_URL / OPENAI_BASE_URL env vars)",
                ),
        )
        .arg(
            Arg::new("intent-url")
                .long("intent-url")
                .value_name("URL")
                .help("Intent detection endpoint (or set INTENT_API_URL env var)"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .help("Chat request timeout in seconds")
                .default_value("120"),
        )
        .arg(
            Arg::new("tools")
                .long("tools")
                .action(ArgAction::SetTrue)
                .help("Run the chat agent in tool-restricted mode with the calculator tool"),
        )
        .get_matches();

    // Get API key from argument or environment
    let api_key = matches
        .get_one::<String>("api-key")
        .cloned()
        .or_else(|| env::var("OPENROUTER_API_KEY").ok())
        .or_else(|| env::var("OPENAI_API_KEY").ok())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "OpenRouter API key is required. Set OPENROUTER_API_KEY environment variable or use --api-key"
            )
        })?;

    let base_url = matches
        .get_one::<String>("base-url")
        .cloned()
        .or_else(|| env::var("OPENROUTER_BASE_URL").ok())
        .or_else(|| env::var("OPENAI_BASE_URL").ok());

    let intent_url = matches
        .get_one::<String>("intent-url")
        .cloned()
        .or_else(|| env::var("INTENT_API_URL").ok());

    let timeout_seconds: u64 = matches.get_one::<String>("timeout").unwrap().parse()?;
    let use_tools = matches.get_flag("tools");

    let mut config = AgentConfig::new(api_key)
        .with_model(matches.get_one::<String>("model").unwrap().as_str())
        .with_request_timeout(Duration::from_secs(timeout_seconds));

    if let Some(base_url) = base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(intent_url) = intent_url {
        config = config.with_intent_url(intent_url);
    }
    if use_tools {
        config = config.with_system_prompt(TOOL_ONLY_SYSTEM_PROMPT);
    }

    let mut workflow = Workflow::from_config(&config);
    if use_tools {
        workflow.agent_mut().register_tool(CalculatorTool::new());
    }

    info!("Using model: {}", config.model);
    info!("Intent endpoint: {}", config.intent_url);

    if let Some(prompt) = matches.get_one::<String>("prompt") {
        let state = workflow.run(prompt).await.map_err(|e| {
            error!("Workflow execution failed: {}", e);
            anyhow::anyhow!("{} - {}", e.error_code(), e)
        })?;
        print_reply(&state);
        return Ok(());
    }

    run_interactive(&workflow).await
}

async fn run_interactive(workflow: &Workflow) -> anyhow::Result<()> {
    println!("Intent-routed chat agent");
    println!("Ensure the intent detection API is reachable.");
    println!("Type 'exit' to quit.");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("You: ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("exit") {
            break;
        }

        // Workflow errors are reported but never end the loop
        match workflow.run(input).await {
            Ok(state) => print_reply(&state),
            Err(e) => {
                error!("Workflow execution failed: {}", e);
                eprintln!("{} - {}", e.error_code(), e);
            }
        }
    }

    Ok(())
}

fn print_reply(state: &ConversationState) {
    if let Some(message) = state.last_message() {
        println!("Agent: {}", message.content());
    }
}
