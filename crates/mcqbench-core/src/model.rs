//! Core data model types for mcqbench.
//!
//! These are the types the whole pipeline passes around: loaded questions,
//! canonical answer letters, and the verdicts parsed from model responses.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four canonical multiple-choice letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnswerLetter {
    A,
    B,
    C,
    D,
}

impl AnswerLetter {
    /// All letters in canonical scan order.
    pub const ALL: [AnswerLetter; 4] = [
        AnswerLetter::A,
        AnswerLetter::B,
        AnswerLetter::C,
        AnswerLetter::D,
    ];

    pub fn as_char(self) -> char {
        match self {
            AnswerLetter::A => 'A',
            AnswerLetter::B => 'B',
            AnswerLetter::C => 'C',
            AnswerLetter::D => 'D',
        }
    }
}

impl fmt::Display for AnswerLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for AnswerLetter {
    type Err = String;

    /// Parses exactly one letter, case-insensitively, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(AnswerLetter::A),
            "B" => Ok(AnswerLetter::B),
            "C" => Ok(AnswerLetter::C),
            "D" => Ok(AnswerLetter::D),
            other => Err(format!("not an answer letter: {other:?}")),
        }
    }
}

/// A single labeled question loaded from a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Question text, including its answer options.
    pub question: String,
    /// Coarse subject category (e.g. "Math").
    pub topic: String,
    /// Fine-grained category within the topic.
    pub subtopic: String,
    /// Ground-truth answer.
    pub correct_answer: AnswerLetter,
}

/// The normalized answer extracted from a model response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Verdict {
    Letter(AnswerLetter),
    /// The response did not start with any canonical letter.
    Unrecognized,
}

impl Verdict {
    /// Marker used when no letter could be extracted.
    pub const UNRECOGNIZED_MARKER: &'static str = "?";

    /// Whether this verdict matches the expected answer.
    ///
    /// `Unrecognized` never matches.
    pub fn matches(&self, expected: AnswerLetter) -> bool {
        matches!(self, Verdict::Letter(letter) if *letter == expected)
    }

    pub fn is_recognized(&self) -> bool {
        matches!(self, Verdict::Letter(_))
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Letter(letter) => write!(f, "{letter}"),
            Verdict::Unrecognized => f.write_str(Self::UNRECOGNIZED_MARKER),
        }
    }
}

impl From<Verdict> for String {
    fn from(verdict: Verdict) -> Self {
        verdict.to_string()
    }
}

impl TryFrom<String> for Verdict {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == Self::UNRECOGNIZED_MARKER {
            Ok(Verdict::Unrecognized)
        } else {
            value.parse().map(Verdict::Letter)
        }
    }
}
