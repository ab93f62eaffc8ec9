// src/cli/progress.rs — Terminal renderer for batch progress
//
// Each finished row is printed to stdout as a block: source text, reply,
// separator. Status lines go to stderr.

use crate::core::batch::BatchEvent;
use crate::util::preview;

pub const SEPARATOR: &str = "----------------------------------------";

/// Render one event. Returns the stdout block, if the event has one.
pub fn render_block(event: &BatchEvent) -> Option<String> {
    match event {
        BatchEvent::RowCompleted { record, .. } => Some(format!(
            "{}\n\n{}\n{}",
            record.source_text,
            record.result_text.as_deref().unwrap_or_default(),
            SEPARATOR,
        )),
        _ => None,
    }
}

/// Render the stderr status line for an event.
pub fn render_status(event: &BatchEvent) -> String {
    match event {
        BatchEvent::Started { total } => format!("[batch] {} row(s) to process", total),
        BatchEvent::RowCompleted {
            position,
            total,
            record,
            failed,
        } => {
            let marker = if *failed { "FAILED" } else { "ok" };
            format!(
                "[{}/{}] row {} {} ({})",
                position,
                total,
                record.row_index + 1,
                marker,
                preview(&record.source_text, 40),
            )
        }
        BatchEvent::Finished { summary } => format!(
            "[done] {} processed, {} ok, {} failed",
            summary.processed, summary.succeeded, summary.failed,
        ),
    }
}

/// Progress callback that writes blocks to stdout and status to stderr.
pub fn terminal_progress(quiet: bool) -> impl Fn(BatchEvent) + Send + Sync + 'static {
    move |event| {
        if let Some(block) = render_block(&event) {
            println!("{}", block);
        }
        if !quiet {
            eprintln!("{}", render_status(&event));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::batch::BatchSummary;
    use crate::core::types::RowRecord;

    fn completed(failed: bool) -> BatchEvent {
        BatchEvent::RowCompleted {
            position: 2,
            total: 5,
            record: RowRecord {
                row_index: 3,
                source_text: "この実験はすごく成功した".into(),
                result_text: Some("「すごく」は曖昧です。".into()),
            },
            failed,
        }
    }

    #[test]
    fn test_block_has_source_reply_separator() {
        let block = render_block(&completed(false)).unwrap();
        assert_eq!(
            block,
            format!("この実験はすごく成功した\n\n「すごく」は曖昧です。\n{SEPARATOR}")
        );
    }

    #[test]
    fn test_no_block_for_start_and_finish() {
        assert!(render_block(&BatchEvent::Started { total: 1 }).is_none());
        assert!(render_block(&BatchEvent::Finished {
            summary: BatchSummary::default()
        })
        .is_none());
    }

    #[test]
    fn test_status_lines() {
        assert_eq!(
            render_status(&BatchEvent::Started { total: 3 }),
            "[batch] 3 row(s) to process"
        );
        let s = render_status(&completed(true));
        assert!(s.starts_with("[2/5] row 4 FAILED"));
        assert_eq!(
            render_status(&BatchEvent::Finished {
                summary: BatchSummary {
                    processed: 3,
                    succeeded: 2,
                    failed: 1
                }
            }),
            "[done] 3 processed, 2 ok, 1 failed"
        );
    }
}
