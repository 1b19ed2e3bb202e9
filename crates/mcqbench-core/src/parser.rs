//! Model response parsing.
//!
//! Responses are expected to open with the chosen letter. Only the start of
//! the response is inspected, so "The answer is B" yields
//! [`Verdict::Unrecognized`] while "Based on analysis..." reads as `B`.

use crate::model::{AnswerLetter, Verdict};

/// Normalize a raw model response into a verdict.
pub fn parse_answer(response: &str) -> Verdict {
    let normalized = response.trim().to_uppercase();
    AnswerLetter::ALL
        .into_iter()
        .find(|letter| normalized.starts_with(letter.as_char()))
        .map_or(Verdict::Unrecognized, Verdict::Letter)
}
