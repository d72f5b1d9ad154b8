use crate::infra::build_summarizer;
use crate::server;
use clap::{Args, Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use story_eval::config::AppConfig;
use story_eval::enrichment::enrich;
use story_eval::error::AppError;
use story_eval::evaluation::{evaluate, StoryPayload};
use story_eval::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "Story Evaluator",
    about = "Score multi-stage story drafts and suggest revisions",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate a story payload from a JSON file or stdin
    Evaluate(EvaluateArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the directory static assets are served from
    #[arg(long)]
    pub(crate) static_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct EvaluateArgs {
    /// Story payload file (`{ "stages": [...], "theme": "..." }`); reads stdin when omitted
    pub(crate) input: Option<PathBuf>,
    /// Request a summary from the configured model when USE_GRANITE=1
    #[arg(long)]
    pub(crate) enrich: bool,
    /// Print compact JSON instead of pretty-printed output
    #[arg(long)]
    pub(crate) compact: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Evaluate(args) => run_evaluate(args).await,
    }
}

async fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        input,
        enrich: with_summary,
        compact,
    } = args;

    let raw = match input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let payload = StoryPayload::from_json(&raw)?;
    let mut result = evaluate(&payload);

    if with_summary {
        let config = AppConfig::load()?;
        telemetry::init(&config.telemetry)?;
        let summarizer = build_summarizer(&config.enrichment);
        result = enrich(result, &payload, summarizer).await;
    }

    let rendered = if compact {
        serde_json::to_string(&result)?
    } else {
        serde_json::to_string_pretty(&result)?
    };
    println!("{rendered}");
    Ok(())
}
