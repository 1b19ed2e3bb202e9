//! Sequential evaluation engine.
//!
//! Runs every question through a provider one at a time, scores the parsed
//! verdicts, and finalizes the scoreboards into an [`EvaluationReport`].

use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::model::{QuestionRecord, Verdict};
use crate::parser::parse_answer;
use crate::prompt::build_prompt;
use crate::report::{EvaluationReport, QuestionOutcome};
use crate::scoreboard::Scoreboards;
use crate::traits::{GenerateRequest, LlmProvider};

/// Configuration for the eval engine.
#[derive(Debug, Clone)]
pub struct EvalEngineConfig {
    /// Model identifier passed to the provider.
    pub model: String,
    /// Temperature for generation.
    pub temperature: f64,
    /// Max tokens for generation.
    pub max_tokens: u32,
    /// Optional system prompt sent with every question.
    pub system_prompt: Option<String>,
    /// Emit a progress notification every this many questions.
    pub progress_interval: usize,
}

impl Default for EvalEngineConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            temperature: 0.0,
            max_tokens: 1024,
            system_prompt: None,
            progress_interval: 200,
        }
    }
}

/// Progress reporting trait.
pub trait ProgressReporter: Send + Sync {
    fn on_run_start(&self, total: usize, model: &str);
    fn on_question_complete(&self, outcome: &QuestionOutcome);
    fn on_progress(&self, processed: usize, total: usize);
    fn on_run_complete(&self, report: &EvaluationReport, elapsed: Duration);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_run_start(&self, _: usize, _: &str) {}
    fn on_question_complete(&self, _: &QuestionOutcome) {}
    fn on_progress(&self, _: usize, _: usize) {}
    fn on_run_complete(&self, _: &EvaluationReport, _: Duration) {}
}

/// The evaluation engine. Holds configuration only; all scoring state lives
/// inside a single [`EvalEngine::evaluate`] call.
pub struct EvalEngine {
    config: EvalEngineConfig,
}

impl EvalEngine {
    pub fn new(config: EvalEngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvalEngineConfig {
        &self.config
    }

    /// Evaluate every question against `provider`, in order.
    ///
    /// The first failed provider call aborts the run; no partial report is
    /// produced.
    pub async fn evaluate(
        &self,
        questions: &[QuestionRecord],
        provider: &dyn LlmProvider,
        progress: &dyn ProgressReporter,
    ) -> Result<EvaluationReport> {
        let start = Instant::now();
        let total = questions.len();
        let interval = self.config.progress_interval.max(1);

        tracing::info!(
            "evaluating {total} questions with {}/{}",
            provider.name(),
            self.config.model
        );
        progress.on_run_start(total, &self.config.model);

        let mut scores = Scoreboards::default();
        let mut outcomes = Vec::with_capacity(total);

        for (i, question) in questions.iter().enumerate() {
            let index = i + 1;
            let request = GenerateRequest {
                model: self.config.model.clone(),
                prompt: build_prompt(question),
                system_prompt: self.config.system_prompt.clone(),
                max_tokens: self.config.max_tokens,
                temperature: self.config.temperature,
            };

            let response = provider
                .generate(&request)
                .await
                .with_context(|| {
                    format!(
                        "model invocation failed on question {index}/{total} ({}/{})",
                        provider.name(),
                        self.config.model
                    )
                })?
                .into_text();

            let verdict = parse_answer(&response);
            let correct = verdict.matches(question.correct_answer);
            scores.record(question, correct);

            if verdict == Verdict::Unrecognized {
                tracing::debug!("question {index}: unrecognized response {response:?}");
            }

            let outcome = QuestionOutcome {
                index,
                topic: question.topic.clone(),
                subtopic: question.subtopic.clone(),
                expected: question.correct_answer,
                verdict,
                correct,
                response,
            };
            progress.on_question_complete(&outcome);
            outcomes.push(outcome);

            if index % interval == 0 {
                tracing::info!("processed {index}/{total} questions");
                progress.on_progress(index, total);
            }
        }

        let elapsed = start.elapsed();
        let report = EvaluationReport::new(
            self.config.model.clone(),
            scores,
            outcomes,
            elapsed.as_millis() as u64,
        );
        progress.on_run_complete(&report, elapsed);

        Ok(report)
    }
}
