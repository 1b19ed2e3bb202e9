//! The `mcqbench validate` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use mcqbench_core::dataset::{load_questions, DatasetSummary};

use super::dataset_options;

pub fn execute(dataset: PathBuf, topics: Option<String>, samples: Option<usize>) -> Result<()> {
    let options = dataset_options(topics.as_deref(), samples)?;
    let questions = load_questions(&dataset, &options)?;
    let summary = DatasetSummary::from_questions(&questions);

    println!("Dataset: {} ({} questions)", dataset.display(), summary.total);

    if summary.total == 0 {
        println!("No usable questions found.");
        return Ok(());
    }

    let mut topics_table = Table::new();
    topics_table.set_header(vec!["Topic", "Questions"]);
    for (topic, count) in &summary.per_topic {
        topics_table.add_row(vec![Cell::new(topic), Cell::new(count)]);
    }
    println!("\n{topics_table}");

    let mut subtopics_table = Table::new();
    subtopics_table.set_header(vec!["Subtopic", "Questions"]);
    for (subtopic, count) in &summary.per_subtopic {
        subtopics_table.add_row(vec![Cell::new(subtopic), Cell::new(count)]);
    }
    println!("\n{subtopics_table}");

    Ok(())
}
