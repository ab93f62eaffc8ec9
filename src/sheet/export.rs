// src/sheet/export.rs — Re-serialize a Sheet for download
//
// Output is UTF-8 with a byte-order mark so spreadsheet viewers pick the
// right encoding for non-ASCII text.

use std::path::{Path, PathBuf};

use super::Sheet;
use crate::infra::errors::SheetChatError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub fn to_csv_bytes(sheet: &Sheet) -> Result<Vec<u8>, SheetChatError> {
    let mut out = UTF8_BOM.to_vec();
    {
        let mut writer = csv::WriterBuilder::new().from_writer(&mut out);
        writer.write_record(&sheet.headers)?;
        for row in &sheet.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
    }
    Ok(out)
}

pub fn write_file(sheet: &Sheet, path: &Path) -> Result<(), SheetChatError> {
    let bytes = to_csv_bytes(sheet)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// `reports.csv` -> `reports_result.csv`, next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{stem}_result.csv"))
}
