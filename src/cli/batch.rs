// src/cli/batch.rs — `sheetchat batch`: CSV in, CSV with replies out

use std::path::{Path, PathBuf};

use crate::core::batch::{BatchRunner, BatchSummary};
use crate::infra::config::Config;
use crate::provider::GenerationClient;
use crate::sheet::export;
use crate::sheet::ingest::{self, IngestOptions};

/// Ingest `input`, run every row through the model, write the result file.
///
/// Missing columns or an undecodable file stop the run before any request
/// is sent. Per-row generation failures do not.
pub async fn run_batch(
    client: &dyn GenerationClient,
    config: &Config,
    input: &Path,
    output: Option<&Path>,
    quiet: bool,
) -> anyhow::Result<BatchSummary> {
    let instruction = config.prompt.resolve()?;
    let options = IngestOptions::from(&config.sheet);

    let mut sheet = ingest::read_file(input, &options)?;
    if !quiet {
        eprintln!(
            "sheetchat v{} | {} | {} ({}, result column: {})",
            env!("CARGO_PKG_VERSION"),
            client.model(),
            input.display(),
            sheet.encoding,
            sheet.result_label(),
        );
    }

    let runner = BatchRunner::new(client, instruction, config.model.params())
        .with_progress(super::progress::terminal_progress(quiet));
    let summary = runner.run(&mut sheet).await;

    let output_path: PathBuf = match output {
        Some(p) => p.to_path_buf(),
        None => export::default_output_path(input),
    };
    export::write_file(&sheet, &output_path)?;

    if !quiet {
        eprintln!("Wrote {}", output_path.display());
    }
    tracing::info!(
        output = %output_path.display(),
        processed = summary.processed,
        failed = summary.failed,
        "Batch finished"
    );

    Ok(summary)
}
