//! The `mcqbench init` command.

use std::path::Path;

use anyhow::{Context, Result};

use mcqbench_providers::config::LOCAL_CONFIG_FILE;

const SAMPLE_DATASET: &str = "data/sample.csv";

pub fn execute() -> Result<()> {
    write_if_missing(Path::new(LOCAL_CONFIG_FILE), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("data").context("failed to create data directory")?;
    write_if_missing(Path::new(SAMPLE_DATASET), SAMPLE_CSV)?;

    println!("\nNext steps:");
    println!("  1. Export OPENAI_API_KEY or edit {LOCAL_CONFIG_FILE}");
    println!("  2. Run: mcqbench validate --dataset {SAMPLE_DATASET}");
    println!("  3. Run: mcqbench run --dataset {SAMPLE_DATASET}");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
        return Ok(());
    }
    std::fs::write(path, content)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# mcqbench configuration

default_provider = "openai"
default_model = "gpt-4o"
default_temperature = 0.0
max_tokens = 1024
progress_interval = 200
dataset = "data/sample.csv"

[providers.openai]
type = "openai"
api_key = "${OPENAI_API_KEY}"

[providers.ollama]
type = "ollama"
base_url = "http://localhost:11434"
"#;

const SAMPLE_CSV: &str = "\
question,topic,subtopic,answer
\"What is 12 * 12? A) 124 B) 144 C) 132 D) 154\",Math,Arithmetic,B
\"Solve for x: 2x + 6 = 10. A) 1 B) 3 C) 2 D) 4\",Math,Algebra,C
\"Which element has the chemical symbol Na? A) Sodium B) Nitrogen C) Neon D) Nickel\",Chemistry,Elements,A
\"What is the SI unit of force? A) Joule B) Watt C) Pascal D) Newton\",Physics,Mechanics,D
\"In which year did World War II end? A) 1943 B) 1944 C) 1945 D) 1946\",History,WWII,C
\"Who painted the Mona Lisa? A) Michelangelo B) Leonardo da Vinci C) Raphael D) Donatello\",Art,Renaissance,B
";
