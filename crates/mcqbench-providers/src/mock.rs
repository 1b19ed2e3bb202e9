//! Mock provider for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use mcqbench_core::traits::{
    GenerateRequest, LlmProvider, ModelInfo, ModelOutput, ResponseMetadata, TokenUsage,
};

use crate::error::ProviderError;

/// A mock LLM provider for testing the eval engine without real API calls.
///
/// Returns configurable answers based on prompt content matching.
pub struct MockProvider {
    /// Map of prompt substring → answer.
    responses: HashMap<String, String>,
    /// Default answer if no prompt matches.
    default_response: String,
    /// Prompts containing this substring fail with an API error.
    fail_on: Option<String>,
    /// Wrap answers in `ModelOutput::Composite`.
    composite: bool,
    /// Number of calls made.
    call_count: AtomicU32,
    /// Every request received, in order.
    requests: Mutex<Vec<GenerateRequest>>,
}

impl MockProvider {
    /// Create a new mock provider with the given prompt→answer mappings.
    pub fn new(responses: HashMap<String, String>) -> Self {
        Self {
            responses,
            default_response: "A".to_string(),
            fail_on: None,
            composite: false,
            call_count: AtomicU32::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that always returns the same answer.
    pub fn with_fixed_response(response: &str) -> Self {
        Self {
            default_response: response.to_string(),
            ..Self::new(HashMap::new())
        }
    }

    /// Fail any request whose prompt contains `needle`.
    pub fn failing_on(mut self, needle: &str) -> Self {
        self.fail_on = Some(needle.to_string());
        self
    }

    /// Return answers together with call metadata.
    pub fn with_metadata(mut self) -> Self {
        self.composite = true;
        self
    }

    /// Get the number of calls made to this provider.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last request made to this provider.
    pub fn last_request(&self) -> Option<GenerateRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    /// Prompts received so far, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.prompt.clone())
            .collect()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, request: &GenerateRequest) -> anyhow::Result<ModelOutput> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        self.requests.lock().unwrap().push(request.clone());

        if let Some(needle) = &self.fail_on {
            if request.prompt.contains(needle.as_str()) {
                return Err(ProviderError::ApiError {
                    status: 500,
                    message: format!("mock failure for prompt containing {needle:?}"),
                }
                .into());
            }
        }

        // Find a matching answer based on prompt content
        let text = self
            .responses
            .iter()
            .find(|(key, _)| request.prompt.contains(key.as_str()))
            .map(|(_, v)| v.clone())
            .unwrap_or_else(|| self.default_response.clone());

        if !self.composite {
            return Ok(ModelOutput::Text(text));
        }

        let prompt_tokens = (request.prompt.len() / 4) as u32; // Rough estimate
        let completion_tokens = (text.len() / 4) as u32;
        Ok(ModelOutput::Composite {
            text,
            metadata: ResponseMetadata {
                model: request.model.clone(),
                token_usage: TokenUsage {
                    prompt_tokens,
                    completion_tokens,
                    total_tokens: prompt_tokens + completion_tokens,
                    estimated_cost_usd: 0.0,
                },
                latency_ms: 1,
            },
        })
    }

    fn available_models(&self) -> Vec<ModelInfo> {
        vec![ModelInfo {
            id: "mock-model".into(),
            name: "Mock Model".into(),
            provider: "mock".into(),
            max_context: 100_000,
            cost_per_1k_input: 0.0,
            cost_per_1k_output: 0.0,
        }]
    }
}
