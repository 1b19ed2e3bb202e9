//! Prompt construction.

use crate::model::QuestionRecord;

/// Topics whose prompts ask the model to reason step by step.
///
/// Matched exactly and case-sensitively against the record topic.
pub const REASONING_TOPICS: [&str; 3] = ["Math", "Chemistry", "Physics"];

/// Instruction appended to every question.
pub const ANSWER_INSTRUCTION: &str = "Return ONLY the correct letter (A, B, C, or D).";

/// Instruction appended after [`ANSWER_INSTRUCTION`] for reasoning topics.
pub const REASONING_INSTRUCTION: &str = "Think through the problem step by step and explain your reasoning before selecting your final answer.";

pub fn requires_reasoning(topic: &str) -> bool {
    REASONING_TOPICS.contains(&topic)
}

/// Build the prompt sent to the model for a question.
pub fn build_prompt(record: &QuestionRecord) -> String {
    let mut prompt = format!("{}\n{ANSWER_INSTRUCTION}", record.question);
    if requires_reasoning(&record.topic) {
        prompt.push_str("\n\n");
        prompt.push_str(REASONING_INSTRUCTION);
    }
    prompt
}
