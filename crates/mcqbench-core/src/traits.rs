//! The model capability trait.
//!
//! Implemented by the `mcqbench-providers` crate for hosted and local
//! backends, and by test doubles.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// LLM Provider trait
// ---------------------------------------------------------------------------

/// Trait for LLM backends that answer prompts.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g. "openai").
    fn name(&self) -> &str;

    /// Send a prompt and return the model's answer.
    async fn generate(&self, request: &GenerateRequest) -> anyhow::Result<ModelOutput>;

    /// List available models for this provider.
    fn available_models(&self) -> Vec<ModelInfo>;
}

/// Request to generate an answer from an LLM.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Model identifier (e.g. "gpt-4o").
    pub model: String,
    /// The user prompt.
    pub prompt: String,
    /// Optional system prompt. Providers send none when unset.
    #[serde(default)]
    pub system_prompt: Option<String>,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
}

/// What a provider hands back: bare text, or text with call metadata.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutput {
    Text(String),
    Composite {
        text: String,
        metadata: ResponseMetadata,
    },
}

impl ModelOutput {
    /// The textual answer, whichever shape the provider returned.
    pub fn text(&self) -> &str {
        match self {
            ModelOutput::Text(text) => text,
            ModelOutput::Composite { text, .. } => text,
        }
    }

    pub fn metadata(&self) -> Option<&ResponseMetadata> {
        match self {
            ModelOutput::Text(_) => None,
            ModelOutput::Composite { metadata, .. } => Some(metadata),
        }
    }

    pub fn into_text(self) -> String {
        match self {
            ModelOutput::Text(text) => text,
            ModelOutput::Composite { text, .. } => text,
        }
    }
}

impl From<String> for ModelOutput {
    fn from(text: String) -> Self {
        ModelOutput::Text(text)
    }
}

/// Details reported by a provider alongside the answer text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseMetadata {
    /// Model that actually generated the response.
    pub model: String,
    /// Token usage.
    pub token_usage: TokenUsage,
    /// Latency in milliseconds.
    pub latency_ms: u64,
}

/// Token accounting for a single call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
    pub estimated_cost_usd: f64,
}

/// Information about an available model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Model identifier.
    pub id: String,
    /// Human-readable model name.
    pub name: String,
    /// Provider name.
    pub provider: String,
    /// Maximum context window size in tokens.
    pub max_context: u32,
    /// Cost per 1K input tokens in USD.
    pub cost_per_1k_input: f64,
    /// Cost per 1K output tokens in USD.
    pub cost_per_1k_output: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_extracted_from_either_shape() {
        let plain = ModelOutput::Text("B".into());
        let composite = ModelOutput::Composite {
            text: "C".into(),
            metadata: ResponseMetadata {
                model: "gpt-4o".into(),
                token_usage: TokenUsage::default(),
                latency_ms: 12,
            },
        };

        assert_eq!(plain.text(), "B");
        assert!(plain.metadata().is_none());
        assert_eq!(composite.text(), "C");
        assert_eq!(composite.metadata().unwrap().latency_ms, 12);
        assert_eq!(composite.into_text(), "C");
    }
}
