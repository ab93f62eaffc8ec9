// src/sheet/mod.rs — Tabular input/output for batch runs

pub mod export;
pub mod ingest;

use crate::core::types::RowRecord;

/// Column holding the text each row sends to the model.
pub const SOURCE_COLUMN: usize = 1;
/// Column the replies are written into.
pub const RESULT_COLUMN: usize = 2;

/// A decoded table. Every row has exactly `headers.len()` cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Name of the encoding the input was decoded with.
    pub encoding: &'static str,
}

impl Sheet {
    pub fn result_label(&self) -> &str {
        &self.headers[RESULT_COLUMN]
    }

    /// Rows with non-blank source text, in row order.
    pub fn records(&self) -> Vec<RowRecord> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| !row[SOURCE_COLUMN].trim().is_empty())
            .map(|(row_index, row)| RowRecord {
                row_index,
                source_text: row[SOURCE_COLUMN].clone(),
                result_text: None,
            })
            .collect()
    }

    pub fn set_result(&mut self, row_index: usize, text: impl Into<String>) {
        if let Some(row) = self.rows.get_mut(row_index) {
            row[RESULT_COLUMN] = text.into();
        }
    }

    pub fn result(&self, row_index: usize) -> Option<&str> {
        self.rows
            .get(row_index)
            .map(|row| row[RESULT_COLUMN].as_str())
            .filter(|s| !s.is_empty())
    }
}
