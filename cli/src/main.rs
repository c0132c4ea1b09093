//! CLI entrypoint for interview-analyzer
//!
//! Wires the layers together: loads configuration, constructs the
//! Gemini gateway, and runs the combined analysis.

use analyzer_application::AnalyzeResponseUseCase;
use analyzer_domain::AnalysisContext;
use analyzer_infrastructure::{ConfigLoader, GeminiConfig, GeminiGateway};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "interview-analyzer",
    version,
    about = "Analyze a candidate's interview response: feedback, score, and the next question"
)]
struct Cli {
    /// The question the candidate was asked
    #[arg(long)]
    question: String,

    /// The candidate's response to that question
    #[arg(long)]
    response: String,

    /// Job description the interview is for
    #[arg(long, default_value = "")]
    job_description: String,

    /// Highlights from the candidate's resume
    #[arg(long, default_value = "")]
    resume_highlights: String,

    /// Deadline in seconds for the combined analysis (overrides config)
    #[arg(long)]
    timeout: Option<u64>,

    /// Path to a config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting interview-analyzer");

    let config = ConfigLoader::load(cli.config.as_ref())
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to load configuration")?;
    config.validate()?;

    // Credential is read once here; absence is fatal before any call
    let api_key = ConfigLoader::api_key().context(
        "set GOOGLE_API_KEY in the environment to use the Gemini gateway",
    )?;

    // === Dependency Injection ===
    let gateway_config = GeminiConfig::new(api_key)
        .with_model(config.gateway.model.clone())
        .with_max_concurrency(config.gateway.max_concurrency)
        .with_request_timeout(Duration::from_secs(config.gateway.request_timeout_seconds));
    let gateway = Arc::new(GeminiGateway::new(gateway_config)?);

    let use_case = AnalyzeResponseUseCase::new(gateway);

    let ctx = AnalysisContext::new(
        cli.question,
        cli.response,
        cli.job_description,
        cli.resume_highlights,
    );
    let timeout = Duration::from_secs(cli.timeout.unwrap_or(config.behavior.timeout_seconds));

    let outcome = use_case.analyze(ctx, timeout).await?;

    match cli.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        OutputFormat::Text => {
            println!("Feedback: {}", outcome.feedback.feedback);
            println!("Score:    {}", outcome.feedback.score);
            println!();
            println!("Next question: {}", outcome.next_question);
        }
    }

    Ok(())
}
