//! The `mcqbench compare` command.

use std::path::PathBuf;

use anyhow::Result;

use mcqbench_core::report::EvaluationReport;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    threshold: f64,
    fail_on_regression: bool,
    format: String,
) -> Result<()> {
    anyhow::ensure!(threshold >= 0.0, "threshold must not be negative");

    let baseline = EvaluationReport::load_json(&baseline_path)?;
    let current = EvaluationReport::load_json(&current_path)?;

    let report = current.compare(&baseline, threshold);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            println!(
                "Comparison ({} -> {}): {} regressions, {} improvements, {} unchanged",
                report.baseline_model,
                report.current_model,
                report.regressions.len(),
                report.improvements.len(),
                report.unchanged
            );
            println!("Overall accuracy {:+.2}%", report.overall_delta * 100.0);

            if !report.regressions.is_empty() {
                println!("\nRegressions:");
                for r in &report.regressions {
                    println!(
                        "  {} {:.2}% -> {:.2}% ({:+.2}%)",
                        r.topic,
                        r.baseline_accuracy * 100.0,
                        r.current_accuracy * 100.0,
                        r.delta * 100.0
                    );
                }
            }

            if !report.improvements.is_empty() {
                println!("\nImprovements:");
                for i in &report.improvements {
                    println!(
                        "  {} {:.2}% -> {:.2}% ({:+.2}%)",
                        i.topic,
                        i.baseline_accuracy * 100.0,
                        i.current_accuracy * 100.0,
                        i.delta * 100.0
                    );
                }
            }

            if !report.new_topics.is_empty() {
                println!("\nNew topics: {}", report.new_topics.join(", "));
            }
            if !report.removed_topics.is_empty() {
                println!("Removed topics: {}", report.removed_topics.join(", "));
            }
        }
    }

    if fail_on_regression && report.has_regressions() {
        std::process::exit(1);
    }

    Ok(())
}
