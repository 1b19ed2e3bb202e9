//! mcqbench CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "mcqbench",
    version,
    about = "Multiple-choice question benchmark runner for LLMs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a model against a question dataset
    Run {
        /// Path to the CSV dataset (falls back to `dataset` in the config)
        #[arg(long)]
        dataset: Option<PathBuf>,

        /// Only keep questions in these topics (comma-separated)
        #[arg(long)]
        topics: Option<String>,

        /// Stop after this many questions
        #[arg(long)]
        samples: Option<usize>,

        /// Model to evaluate (e.g. "openai/gpt-4o", "ollama/llama3.1:8b")
        #[arg(long)]
        model: Option<String>,

        /// Generation temperature
        #[arg(long)]
        temperature: Option<f64>,

        /// Completion token limit per question
        #[arg(long)]
        max_tokens: Option<u32>,

        /// Write the JSON report to this file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Load a dataset and show question counts without calling a model
    Validate {
        /// Path to the CSV dataset
        #[arg(long)]
        dataset: PathBuf,

        /// Only keep questions in these topics (comma-separated)
        #[arg(long)]
        topics: Option<String>,

        /// Stop after this many questions
        #[arg(long)]
        samples: Option<usize>,
    },

    /// Compare two JSON reports topic by topic
    Compare {
        /// Baseline report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current report JSON
        #[arg(long)]
        current: PathBuf,

        /// Regression threshold
        #[arg(long, default_value = "0.05")]
        threshold: f64,

        /// Exit code 1 if regressions found
        #[arg(long)]
        fail_on_regression: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List available models
    ListModels {
        /// Filter to specific provider
        #[arg(long)]
        provider: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and sample dataset
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("mcqbench=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            dataset,
            topics,
            samples,
            model,
            temperature,
            max_tokens,
            output,
            config,
        } => {
            commands::run::execute(commands::run::RunArgs {
                dataset,
                topics,
                samples,
                model,
                temperature,
                max_tokens,
                output,
                config,
            })
            .await
        }
        Commands::Validate {
            dataset,
            topics,
            samples,
        } => commands::validate::execute(dataset, topics, samples),
        Commands::Compare {
            baseline,
            current,
            threshold,
            fail_on_regression,
            format,
        } => commands::compare::execute(baseline, current, threshold, fail_on_regression, format),
        Commands::ListModels { provider, config } => {
            commands::list_models::execute(provider, config).await
        }
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
