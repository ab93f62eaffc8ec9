// src/core/batch.rs — Run every sheet row through the model, one at a time
//
// Rows are processed strictly in order. A failed row records an error string
// in its result cell and the run continues with the next row.

use super::formatter;
use super::types::{GenerationParams, RowRecord};
use crate::infra::errors::SheetChatError;
use crate::provider::GenerationClient;
use crate::sheet::Sheet;

/// Progress events emitted while a batch runs.
#[derive(Debug, Clone)]
pub enum BatchEvent {
    Started {
        total: usize,
    },
    RowCompleted {
        /// 1-based position among processed rows.
        position: usize,
        total: usize,
        record: RowRecord,
        failed: bool,
    },
    Finished {
        summary: BatchSummary,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Text stored in a result cell when generation failed.
pub fn error_cell(error: &SheetChatError) -> String {
    format!("[error] {error}")
}

pub struct BatchRunner<'a> {
    client: &'a dyn GenerationClient,
    instruction: String,
    params: GenerationParams,
    progress: Option<Box<dyn Fn(BatchEvent) + Send + Sync + 'a>>,
}

impl<'a> BatchRunner<'a> {
    pub fn new(
        client: &'a dyn GenerationClient,
        instruction: impl Into<String>,
        params: GenerationParams,
    ) -> Self {
        Self {
            client,
            instruction: instruction.into(),
            params,
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: impl Fn(BatchEvent) + Send + Sync + 'a) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }

    fn emit(&self, event: BatchEvent) {
        if let Some(ref cb) = self.progress {
            cb(event);
        }
    }

    /// Generate a result for every row with source text and write it into
    /// the sheet's result column.
    pub async fn run(&self, sheet: &mut Sheet) -> BatchSummary {
        let records = sheet.records();
        let total = records.len();
        let mut summary = BatchSummary::default();

        self.emit(BatchEvent::Started { total });

        for (i, mut record) in records.into_iter().enumerate() {
            let request =
                formatter::single_text_request(&record.source_text, &self.instruction, self.params);

            let (text, failed) = match self.client.generate(&request).await {
                Ok(reply) => {
                    summary.succeeded += 1;
                    (reply, false)
                }
                Err(e) => {
                    tracing::warn!(row = record.row_index, "Row failed: {}", e);
                    summary.failed += 1;
                    (error_cell(&e), true)
                }
            };
            summary.processed += 1;
            tracing::info!(row = record.row_index, failed, "Row {}/{} done", i + 1, total);

            sheet.set_result(record.row_index, text.clone());
            record.result_text = Some(text);

            self.emit(BatchEvent::RowCompleted {
                position: i + 1,
                total,
                record,
                failed,
            });
        }

        self.emit(BatchEvent::Finished { summary });
        summary
    }
}
