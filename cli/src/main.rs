//! CLI entrypoint for twentyq
//!
//! Wires the layers together: loads configuration and the candidate
//! list, builds the OpenAI adapters, runs one session and archives the
//! resulting metrics.

mod progress;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use twentyq_application::{RunSessionInput, RunSessionUseCase};
use twentyq_domain::{CandidatePool, Model, ReasoningEffort};
use twentyq_infrastructure::{
    load_candidates, ConfigLoader, ExperimentArchive, ExperimentParams, OpenAiClient, OpenAiOracle,
    OpenAiQuestioner,
};

use progress::ConsoleProgress;

#[derive(Parser)]
#[command(name = "twentyq", version, about = "Guess a hidden candidate with yes/no questions and measure split quality")]
struct Cli {
    /// Path to the input list file (one candidate name per line)
    input_file: PathBuf,

    /// Unique name for this experiment
    #[arg(short = 'x', long)]
    experiment_name: String,

    /// Model used for question generation
    #[arg(short, long)]
    model: Option<String>,

    /// Model used for oracle responses
    #[arg(short, long)]
    oracle_model: Option<String>,

    /// Name to guess (random selection when omitted)
    #[arg(short, long)]
    target_name: Option<String>,

    /// Maximum number of questions
    #[arg(short = 'n', long)]
    max_rounds: Option<usize>,

    /// Reasoning effort level: low, medium, or high
    #[arg(short = 'e', long)]
    reasoning_effort: Option<String>,

    /// Explicit config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Suppress per-round console output
    #[arg(short, long)]
    quiet: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

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

    // Merge file config with CLI overrides
    let file_config = ConfigLoader::load(cli.config.as_ref())
        .map_err(|e| anyhow::anyhow!("failed to load configuration: {}", e))?;
    let mut config = file_config.session_config();

    if let Some(model) = &cli.model {
        config.questioner_model = model.parse::<Model>().expect("model parsing is infallible");
    }
    if let Some(model) = &cli.oracle_model {
        config.oracle_model = model.parse::<Model>().expect("model parsing is infallible");
    }
    if let Some(effort) = &cli.reasoning_effort {
        config.reasoning_effort = effort.parse::<ReasoningEffort>()?;
    }
    if let Some(max_rounds) = cli.max_rounds {
        config.max_rounds = max_rounds;
    }
    config.target_name = cli.target_name.clone();

    let names = load_candidates(&cli.input_file)?;
    info!(
        "Using model: {} (oracle: {})",
        config.questioner_model, config.oracle_model
    );

    // The questioner's system prompt enumerates the starting roster
    let roster = CandidatePool::new(names.clone())?.survivors();

    // === Dependency Injection ===
    let client = Arc::new(OpenAiClient::from_env()?);
    let questioner = Arc::new(OpenAiQuestioner::new(
        Arc::clone(&client),
        config.questioner_model.clone(),
        config.reasoning_effort,
        &roster,
    ));
    let oracle = Arc::new(OpenAiOracle::new(
        Arc::clone(&client),
        config.oracle_model.clone(),
    ));

    let archive = ExperimentArchive::create(&file_config.archive.root, &cli.experiment_name)?;
    archive.write_params(&ExperimentParams::new(
        cli.input_file.display().to_string(),
        config.questioner_model.clone(),
        config.oracle_model.clone(),
        config.reasoning_effort,
        config.max_rounds,
        cli.target_name.clone(),
    ))?;

    let use_case = RunSessionUseCase::new(questioner, oracle);
    let input = RunSessionInput::new(names, config);

    let result = if cli.quiet {
        use_case.execute(input).await
    } else {
        let progress = ConsoleProgress;
        use_case.execute_with_progress(input, &progress).await
    };

    match result {
        Ok(report) => {
            archive.write_results(&report.rounds)?;
            archive.write_outcome(&report.outcome)?;
            println!(
                "Archived {} round(s) to {}",
                report.rounds.len(),
                archive.dir().display()
            );
            Ok(())
        }
        Err(e) => {
            // Preserve whatever metrics the session produced before failing
            archive.write_results(&e.partial_rounds)?;
            Err(e).context("session aborted")
        }
    }
}
