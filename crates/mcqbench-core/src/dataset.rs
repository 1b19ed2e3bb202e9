//! CSV question dataset loader.
//!
//! Reads a tabular file with the fixed column order
//! `question, topic, subtopic, answer`, detecting its text encoding first so
//! that Latin-1 and other legacy exports load without errors.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use serde::Serialize;

use crate::error::DatasetError;
use crate::model::{AnswerLetter, QuestionRecord};

/// Number of leading bytes fed to the charset detector.
pub const ENCODING_SAMPLE_BYTES: usize = 50_000;

/// Minimum number of columns a data row must have.
const REQUIRED_FIELDS: usize = 4;

/// Filtering and truncation applied while loading.
#[derive(Debug, Clone, Default)]
pub struct DatasetOptions {
    /// Topics to keep. Empty keeps every topic.
    pub topics: HashSet<String>,
    /// Keep at most this many records (after filtering).
    pub max_samples: Option<usize>,
}

impl DatasetOptions {
    pub fn with_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topics = topics.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_samples(mut self, max_samples: usize) -> Self {
        self.max_samples = Some(max_samples);
        self
    }

    fn keeps_topic(&self, topic: &str) -> bool {
        self.topics.is_empty() || self.topics.contains(topic)
    }
}

/// Load questions from a CSV file on disk.
pub fn load_questions(
    path: &Path,
    options: &DatasetOptions,
) -> Result<Vec<QuestionRecord>, DatasetError> {
    let bytes = std::fs::read(path).map_err(|source| DatasetError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let (text, encoding) = decode_dataset_bytes(&bytes);
    tracing::debug!(
        "decoding {} as {}",
        path.display(),
        encoding.name()
    );

    let questions = parse_questions_str(&text, options);
    tracing::info!("loaded {} questions from {}", questions.len(), path.display());
    Ok(questions)
}

/// Detect the encoding of raw dataset bytes and decode them.
///
/// A byte-order mark takes precedence over detection. Byte sequences that are
/// invalid in the chosen encoding are replaced with U+FFFD.
pub fn decode_dataset_bytes(bytes: &[u8]) -> (String, &'static Encoding) {
    let encoding = detect_encoding(bytes);
    let (text, actual, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::debug!("replaced undecodable bytes while decoding as {}", actual.name());
    }
    (text.into_owned(), actual)
}

fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }
    if bytes.is_empty() {
        return UTF_8;
    }

    let sample = &bytes[..bytes.len().min(ENCODING_SAMPLE_BYTES)];
    let mut detector = EncodingDetector::new();
    detector.feed(sample, sample.len() == bytes.len());
    detector.guess(None, true)
}

/// Parse already-decoded CSV text into question records.
///
/// The first row is a header and is skipped. Rows with fewer than four fields,
/// rows whose answer is not one of A/B/C/D, and rows the CSV reader cannot
/// parse are dropped.
pub fn parse_questions_str(text: &str, options: &DatasetOptions) -> Vec<QuestionRecord> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let limit = options.max_samples.unwrap_or(usize::MAX);
    let mut questions = Vec::new();
    let mut skipped = 0usize;

    for row in reader.records() {
        if questions.len() >= limit {
            break;
        }

        let Ok(row) = row else {
            skipped += 1;
            continue;
        };
        let Some(record) = record_from_row(&row) else {
            skipped += 1;
            continue;
        };

        if options.keeps_topic(&record.topic) {
            questions.push(record);
        }
    }

    if skipped > 0 {
        tracing::debug!("skipped {skipped} malformed rows");
    }

    questions
}

fn record_from_row(row: &csv::StringRecord) -> Option<QuestionRecord> {
    if row.len() < REQUIRED_FIELDS {
        return None;
    }

    let correct_answer: AnswerLetter = row[3].trim().parse().ok()?;

    Some(QuestionRecord {
        question: row[0].trim().to_string(),
        topic: row[1].trim().to_string(),
        subtopic: row[2].trim().to_string(),
        correct_answer,
    })
}

/// Question counts per topic and subtopic.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DatasetSummary {
    pub total: usize,
    pub per_topic: BTreeMap<String, usize>,
    pub per_subtopic: BTreeMap<String, usize>,
}

impl DatasetSummary {
    pub fn from_questions(questions: &[QuestionRecord]) -> Self {
        let mut summary = Self {
            total: questions.len(),
            ..Default::default()
        };
        for q in questions {
            *summary.per_topic.entry(q.topic.clone()).or_default() += 1;
            *summary.per_subtopic.entry(q.subtopic.clone()).or_default() += 1;
        }
        summary
    }
}
