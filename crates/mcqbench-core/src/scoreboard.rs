//! Running correct/total counters.
//!
//! Counters are created on first use and never removed. Keys are kept in a
//! `BTreeMap` so reports come out sorted by name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::QuestionRecord;

/// Correct and total counts for a single key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCounter {
    pub correct: u64,
    pub total: u64,
}

impl ScoreCounter {
    /// Count one question, and one correct answer when `correct` is set.
    pub fn record(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        }
    }

    /// `correct / total`, or 0.0 for an empty counter.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

/// A grow-only table of counters keyed by topic or subtopic name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scoreboard {
    counters: BTreeMap<String, ScoreCounter>,
}

impl Scoreboard {
    pub fn record(&mut self, key: &str, correct: bool) {
        match self.counters.get_mut(key) {
            Some(counter) => counter.record(correct),
            None => {
                let mut counter = ScoreCounter::default();
                counter.record(correct);
                self.counters.insert(key.to_string(), counter);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&ScoreCounter> {
        self.counters.get(key)
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Iterate counters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScoreCounter)> {
        self.counters.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Accuracy per key, in key order.
    pub fn accuracies(&self) -> BTreeMap<String, f64> {
        self.counters
            .iter()
            .map(|(k, v)| (k.clone(), v.accuracy()))
            .collect()
    }

    /// Sum of all per-key totals.
    pub fn total(&self) -> u64 {
        self.counters.values().map(|c| c.total).sum()
    }
}

/// The overall, per-topic and per-subtopic counters for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboards {
    pub overall: ScoreCounter,
    pub by_topic: Scoreboard,
    pub by_subtopic: Scoreboard,
}

impl Scoreboards {
    pub fn record(&mut self, record: &QuestionRecord, correct: bool) {
        self.overall.record(correct);
        self.by_topic.record(&record.topic, correct);
        self.by_subtopic.record(&record.subtopic, correct);
    }
}
