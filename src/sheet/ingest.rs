// src/sheet/ingest.rs — Decode and parse an uploaded CSV into a Sheet

use encoding_rs::Encoding;
use std::path::Path;

use super::{Sheet, RESULT_COLUMN, SOURCE_COLUMN};
use crate::infra::errors::SheetChatError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// How to read an input file.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Encoding labels tried in order, e.g. `["shift_jis", "utf-8"]`.
    pub encodings: Vec<String>,
    /// Label used when the input has no result column yet.
    pub result_column: String,
}

impl Default for IngestOptions {
    fn default() -> Self {
        let sheet = crate::infra::config::SheetConfig::default();
        Self {
            encodings: sheet.encodings,
            result_column: sheet.result_column,
        }
    }
}

impl From<&crate::infra::config::SheetConfig> for IngestOptions {
    fn from(config: &crate::infra::config::SheetConfig) -> Self {
        Self {
            encodings: config.encodings.clone(),
            result_column: config.result_column.clone(),
        }
    }
}

/// Decode raw bytes with the first candidate that accepts them.
///
/// A UTF-8 byte-order mark wins over the candidate list.
pub fn decode(bytes: &[u8], candidates: &[String]) -> Result<(String, &'static str), SheetChatError> {
    if let Some(rest) = bytes.strip_prefix(UTF8_BOM) {
        return match std::str::from_utf8(rest) {
            Ok(s) => Ok((s.to_string(), encoding_rs::UTF_8.name())),
            Err(_) => Err(SheetChatError::DecodeFailure {
                tried: vec![format!("{} (BOM)", encoding_rs::UTF_8.name())],
            }),
        };
    }

    let mut tried = Vec::with_capacity(candidates.len());
    for label in candidates {
        let encoding = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| SheetChatError::Config(format!("unknown encoding '{label}'")))?;

        match encoding.decode_without_bom_handling_and_without_replacement(bytes) {
            Some(text) => {
                tracing::debug!("Decoded input as {}", encoding.name());
                return Ok((text.into_owned(), encoding.name()));
            }
            None => {
                tracing::debug!("Input is not valid {}", encoding.name());
                tried.push(encoding.name().to_string());
            }
        }
    }

    Err(SheetChatError::DecodeFailure { tried })
}

/// Parse decoded CSV text. The first record is the header.
pub fn parse(text: &str, encoding: &'static str, result_label: &str) -> Result<Sheet, SheetChatError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let mut headers: Vec<String> = match records.next() {
        Some(header) => header?.iter().map(|s| s.to_string()).collect(),
        None => Vec::new(),
    };

    if headers.len() <= SOURCE_COLUMN {
        return Err(SheetChatError::MissingColumn {
            required: SOURCE_COLUMN + 1,
            found: headers.len(),
        });
    }

    let mut rows = Vec::new();
    for record in records {
        let row: Vec<String> = record?.iter().map(|s| s.to_string()).collect();
        rows.push(row);
    }

    let width = rows
        .iter()
        .map(|r| r.len())
        .max()
        .unwrap_or(0)
        .max(headers.len())
        .max(RESULT_COLUMN + 1);

    let had_result_column = headers.len() > RESULT_COLUMN;
    headers.resize(width, String::new());
    if !had_result_column || headers[RESULT_COLUMN].trim().is_empty() {
        headers[RESULT_COLUMN] = result_label.to_string();
    }
    for row in &mut rows {
        row.resize(width, String::new());
    }

    Ok(Sheet {
        headers,
        rows,
        encoding,
    })
}

/// Decode and parse in one step.
pub fn ingest(bytes: &[u8], options: &IngestOptions) -> Result<Sheet, SheetChatError> {
    let (text, encoding) = decode(bytes, &options.encodings)?;
    let sheet = parse(&text, encoding, &options.result_column)?;
    tracing::info!(
        encoding,
        rows = sheet.rows.len(),
        columns = sheet.headers.len(),
        "Ingested sheet"
    );
    Ok(sheet)
}

pub fn read_file(path: &Path, options: &IngestOptions) -> Result<Sheet, SheetChatError> {
    let bytes = std::fs::read(path)?;
    ingest(&bytes, options)
}
