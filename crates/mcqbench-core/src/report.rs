//! Evaluation report types with JSON persistence and regression detection.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{AnswerLetter, Verdict};
use crate::scoreboard::Scoreboards;

/// The result of a single question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOutcome {
    /// 1-based position in the evaluated sequence.
    pub index: usize,
    pub topic: String,
    pub subtopic: String,
    pub expected: AnswerLetter,
    pub verdict: Verdict,
    pub correct: bool,
    /// Raw response text from the model.
    pub response: String,
}

/// A complete evaluation report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Model that was evaluated.
    pub model: String,
    /// `correct / total` over every question, 0.0 for an empty run.
    pub overall_accuracy: f64,
    /// Accuracy per topic, sorted by topic name.
    pub topic_accuracy: BTreeMap<String, f64>,
    /// Accuracy per subtopic, sorted by subtopic name.
    pub subtopic_accuracy: BTreeMap<String, f64>,
    /// The raw counters the ratios were computed from.
    pub scores: Scoreboards,
    /// Responses that did not start with A/B/C/D.
    pub unrecognized: u64,
    /// Per-question outcomes in evaluation order.
    #[serde(default)]
    pub outcomes: Vec<QuestionOutcome>,
    /// Total wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

impl EvaluationReport {
    /// Finalize counters into a report.
    pub fn new(
        model: impl Into<String>,
        scores: Scoreboards,
        outcomes: Vec<QuestionOutcome>,
        duration_ms: u64,
    ) -> Self {
        let unrecognized = outcomes
            .iter()
            .filter(|o| !o.verdict.is_recognized())
            .count() as u64;

        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            model: model.into(),
            overall_accuracy: scores.overall.accuracy(),
            topic_accuracy: scores.by_topic.accuracies(),
            subtopic_accuracy: scores.by_subtopic.accuracies(),
            scores,
            unrecognized,
            outcomes,
            duration_ms,
        }
    }

    /// Number of questions scored.
    pub fn total(&self) -> u64 {
        self.scores.overall.total
    }

    /// Render the console summary block.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "========== FINAL RESULTS ==========");
        let _ = writeln!(
            out,
            "Overall Accuracy: {:.2}%\n",
            self.overall_accuracy * 100.0
        );

        let _ = writeln!(out, "Accuracy by Topic:");
        for (topic, acc) in &self.topic_accuracy {
            let _ = writeln!(out, "  • {topic}: {:.2}%", acc * 100.0);
        }

        let _ = writeln!(out, "\nAccuracy by Subtopic:");
        for (subtopic, acc) in &self.subtopic_accuracy {
            let _ = writeln!(out, "  • {subtopic}: {:.2}%", acc * 100.0);
        }

        out
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: EvaluationReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Compare per-topic accuracy against a baseline report.
    ///
    /// A topic regresses when its accuracy drops by more than `threshold`.
    pub fn compare(&self, baseline: &EvaluationReport, threshold: f64) -> ComparisonReport {
        let mut regressions = Vec::new();
        let mut improvements = Vec::new();
        let mut unchanged = 0usize;
        let mut new_topics = Vec::new();

        for (topic, &current) in &self.topic_accuracy {
            let Some(&baseline_acc) = baseline.topic_accuracy.get(topic) else {
                new_topics.push(topic.clone());
                continue;
            };

            let delta = current - baseline_acc;
            let change = TopicDelta {
                topic: topic.clone(),
                baseline_accuracy: baseline_acc,
                current_accuracy: current,
                delta,
            };
            if delta < -threshold {
                regressions.push(change);
            } else if delta > threshold {
                improvements.push(change);
            } else {
                unchanged += 1;
            }
        }

        let removed_topics = baseline
            .topic_accuracy
            .keys()
            .filter(|t| !self.topic_accuracy.contains_key(*t))
            .cloned()
            .collect();

        ComparisonReport {
            baseline_model: baseline.model.clone(),
            current_model: self.model.clone(),
            overall_delta: self.overall_accuracy - baseline.overall_accuracy,
            regressions,
            improvements,
            unchanged,
            new_topics,
            removed_topics,
        }
    }
}

/// Result of comparing two reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub baseline_model: String,
    pub current_model: String,
    /// Current overall accuracy minus baseline overall accuracy.
    pub overall_delta: f64,
    /// Topics where accuracy went down.
    pub regressions: Vec<TopicDelta>,
    /// Topics where accuracy went up.
    pub improvements: Vec<TopicDelta>,
    /// Topics with no significant change.
    pub unchanged: usize,
    /// Topics in current but not baseline.
    pub new_topics: Vec<String>,
    /// Topics in baseline but not current.
    pub removed_topics: Vec<String>,
}

/// An accuracy change for one topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicDelta {
    pub topic: String,
    pub baseline_accuracy: f64,
    pub current_accuracy: f64,
    pub delta: f64,
}

impl ComparisonReport {
    /// Format the comparison as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** {} regressions, {} improvements, {} unchanged (overall {:+.2}%)\n\n",
            self.regressions.len(),
            self.improvements.len(),
            self.unchanged,
            self.overall_delta * 100.0
        ));

        for (title, rows) in [
            ("Regressions", &self.regressions),
            ("Improvements", &self.improvements),
        ] {
            if rows.is_empty() {
                continue;
            }
            md.push_str(&format!("### {title}\n\n"));
            md.push_str("| Topic | Baseline | Current | Delta |\n");
            md.push_str("|-------|----------|---------|-------|\n");
            for r in rows {
                md.push_str(&format!(
                    "| {} | {:.2}% | {:.2}% | {:+.2}% |\n",
                    r.topic,
                    r.baseline_accuracy * 100.0,
                    r.current_accuracy * 100.0,
                    r.delta * 100.0
                ));
            }
            md.push('\n');
        }

        md
    }

    /// Returns true if any topic regressed.
    pub fn has_regressions(&self) -> bool {
        !self.regressions.is_empty()
    }
}
