//! The `mcqbench run` command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use mcqbench_core::dataset::load_questions;
use mcqbench_core::engine::{EvalEngine, EvalEngineConfig, ProgressReporter};
use mcqbench_core::report::{EvaluationReport, QuestionOutcome};
use mcqbench_providers::config::load_config_from;
use mcqbench_providers::create_provider;

use super::dataset_options;

/// Flags accepted by `mcqbench run`.
pub struct RunArgs {
    pub dataset: Option<PathBuf>,
    pub topics: Option<String>,
    pub samples: Option<usize>,
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

/// Console progress reporter.
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_run_start(&self, total: usize, model: &str) {
        eprintln!("Evaluating {total} questions with {model}");
    }

    fn on_question_complete(&self, outcome: &QuestionOutcome) {
        tracing::debug!(
            index = outcome.index,
            topic = %outcome.topic,
            verdict = %outcome.verdict,
            correct = outcome.correct,
            "question scored"
        );
    }

    fn on_progress(&self, processed: usize, _total: usize) {
        println!("Processed {processed} questions...");
    }

    fn on_run_complete(&self, report: &EvaluationReport, elapsed: Duration) {
        println!("\n{}", report.summary());
        eprintln!(
            "{} questions, {} unrecognized responses ({:.1}s)",
            report.total(),
            report.unrecognized,
            elapsed.as_secs_f64()
        );
    }
}

/// Split `provider/model`; a bare model name uses the default provider.
fn parse_model_spec(spec: &str, default_provider: &str) -> (String, String) {
    match spec.trim().split_once('/') {
        Some((provider, model)) => (provider.to_string(), model.to_string()),
        None => (default_provider.to_string(), spec.trim().to_string()),
    }
}

pub async fn execute(args: RunArgs) -> Result<()> {
    let config = load_config_from(args.config.as_deref())?;

    let temperature = args.temperature.unwrap_or(config.default_temperature);
    anyhow::ensure!(
        (0.0..=2.0).contains(&temperature),
        "temperature must be between 0.0 and 2.0"
    );
    let options = dataset_options(args.topics.as_deref(), args.samples)?;

    let dataset = args
        .dataset
        .or_else(|| config.dataset.clone())
        .context("no dataset given; pass --dataset or set `dataset` in mcqbench.toml")?;

    let questions = load_questions(&dataset, &options)?;
    println!("Loaded {} questions.", questions.len());

    let (provider_name, model) = match &args.model {
        Some(spec) => parse_model_spec(spec, &config.default_provider),
        None => (
            config.default_provider.clone(),
            config.default_model.clone(),
        ),
    };
    anyhow::ensure!(!model.is_empty(), "model name must not be empty");

    let provider_config = config.provider(&provider_name)?;
    let provider = create_provider(&provider_name, &provider_config)?;

    let engine = EvalEngine::new(EvalEngineConfig {
        model,
        temperature,
        max_tokens: args.max_tokens.unwrap_or(config.max_tokens),
        system_prompt: config.system_prompt.clone(),
        progress_interval: config.progress_interval,
    });

    let report = engine
        .evaluate(&questions, provider.as_ref(), &ConsoleReporter)
        .await?;

    if let Some(path) = &args.output {
        report.save_json(path)?;
        eprintln!("Results saved to: {}", path.display());
    }

    Ok(())
}
