//! The `mcqbench list-models` command.

use std::path::PathBuf;

use anyhow::Result;

use mcqbench_core::traits::{LlmProvider, ModelInfo};
use mcqbench_providers::config::load_config_from;
use mcqbench_providers::ollama::OllamaProvider;
use mcqbench_providers::openai::OpenAiProvider;
use mcqbench_providers::ProviderConfig;

pub async fn execute(provider_filter: Option<String>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let mut names: Vec<&String> = config.providers.keys().collect();
    names.sort();

    let mut found_any = false;

    for name in names {
        if provider_filter.as_ref().is_some_and(|filter| filter != name) {
            continue;
        }

        let models: Vec<ModelInfo> = match &config.providers[name] {
            ProviderConfig::Ollama { base_url } => {
                match OllamaProvider::new(base_url)?.list_models_async().await {
                    Ok(models) => models,
                    Err(e) => {
                        println!("Provider: {name} (unavailable: {e})\n");
                        continue;
                    }
                }
            }
            ProviderConfig::OpenAI {
                api_key,
                base_url,
                org_id,
            } => OpenAiProvider::new(api_key, base_url.clone(), org_id.clone())?
                .available_models(),
        };

        found_any = true;
        println!("Provider: {name}");
        if models.is_empty() {
            println!("  (no models)");
        }
        for model in &models {
            if model.max_context > 0 {
                println!(
                    "  {} — {} ({}K context, ${:.5}/{:.5} per 1K tokens)",
                    model.id,
                    model.name,
                    model.max_context / 1000,
                    model.cost_per_1k_input,
                    model.cost_per_1k_output,
                );
            } else {
                println!("  {}", model.id);
            }
        }
        println!();
    }

    if !found_any {
        println!("No providers configured. Run `mcqbench init` to create a config file.");
    }

    Ok(())
}
