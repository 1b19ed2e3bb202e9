//! mcqbench-providers — LLM provider integrations.
//!
//! Implements the `LlmProvider` trait for OpenAI-compatible APIs and Ollama,
//! plus a scriptable mock, and loads the TOML configuration that selects them.

pub mod config;
pub mod error;
pub mod mock;
pub mod ollama;
pub mod openai;

pub use config::{create_provider, load_config, BenchConfig, ProviderConfig};
pub use error::ProviderError;
