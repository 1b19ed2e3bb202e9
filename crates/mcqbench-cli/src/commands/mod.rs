pub mod compare;
pub mod init;
pub mod list_models;
pub mod run;
pub mod validate;

use anyhow::Result;

use mcqbench_core::dataset::DatasetOptions;

/// Build loader options from the shared `--topics` / `--samples` flags.
pub(crate) fn dataset_options(
    topics: Option<&str>,
    samples: Option<usize>,
) -> Result<DatasetOptions> {
    let mut options = DatasetOptions::default();

    if let Some(list) = topics {
        let topics: Vec<&str> = list
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();
        anyhow::ensure!(!topics.is_empty(), "--topics must name at least one topic");
        options = options.with_topics(topics);
    }

    if let Some(n) = samples {
        anyhow::ensure!(n >= 1, "samples must be at least 1");
        options = options.with_max_samples(n);
    }

    Ok(options)
}
