//! Research assistant CLI entry point.
//!
//! This binary is the composition root for the entire system. Responsibilities:
//!
//! 1. **Load configuration**: defaults, `.research/config.toml`, then
//!    `RESEARCH_*` environment variables (see [`config`]).
//! 2. **Wire observability**: JSON logs on stderr plus optional OTLP span
//!    export (see [`telemetry`]).
//! 3. **Read the topic**: one prompted line from the terminal.
//! 4. **Construct collaborators**: the chat-completion client, the SearxNG
//!    backend and the console input, injected into [`PipelineExecutor`].
//! 5. **Run and print**: the final report goes to stdout.

mod config;
mod console;
mod output;
mod telemetry;

use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use llm::OpenAiCompatClient;
use nodes::PipelineExecutor;
use pipeline::{HumanInput, SearchClient, Topic};
use search::SearxngBackend;
use tracing::info;

use crate::config::AppConfig;
use crate::console::ConsoleInput;

const TOPIC_PROMPT: &str = "Enter a research topic: ";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let workspace = std::env::current_dir().context("cannot determine working directory")?;
    let config = config::load_config(&workspace)
        .map_err(|e| anyhow!("failed to load configuration: {e}"))?;

    let telemetry = telemetry::init(&config.telemetry)?;
    let result = run(&config).await;
    telemetry.shutdown();
    result
}

async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let console = Arc::new(ConsoleInput);
    let line = console
        .request_supplement(TOPIC_PROMPT)
        .await
        .context("failed to read the research topic")?;
    let Some(topic) = Topic::new(line.trim()) else {
        bail!("research topic must not be empty");
    };

    let generator = Arc::new(OpenAiCompatClient::new(&config.llm)?);
    let backend = Arc::new(SearxngBackend::new(&config.search)?);
    info!(
        model = %generator.model(),
        search_url = backend.url(),
        "Collaborators ready"
    );

    let executor = PipelineExecutor::with_report_language(
        generator,
        SearchClient::new(backend),
        console,
        config.report.language.clone(),
    );

    println!("Researching \"{topic}\"...\n");
    let run = executor.run(topic).await?;
    println!("\n{}", output::render(&run));
    Ok(())
}
