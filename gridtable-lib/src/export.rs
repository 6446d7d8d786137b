//! CSV export payloads.

use crate::error::ExportError;
use crate::model::Column;

/// MIME type for CSV payloads.
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// A delimited-text payload ready for a "save as file" collaborator.
///
/// The grid only marshals rows into bytes; actually writing a file (or
/// triggering a browser download) is the caller's side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvPayload {
    /// Suggested file name, e.g. `export.csv`.
    pub filename: String,
    /// MIME type, always [`CSV_CONTENT_TYPE`].
    pub content_type: &'static str,
    /// Encoded CSV bytes, header row first.
    pub bytes: Vec<u8>,
}

impl CsvPayload {
    /// The payload as UTF-8 text.
    pub fn as_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

/// Encodes the given rows under the visible columns.
///
/// Hidden columns are skipped, columns without a field accessor emit an
/// empty cell, and cells are stringified exactly as the global search sees
/// them. Quoting and escaping follow standard CSV rules.
pub fn write_csv<T>(
    columns: &[Column<T>],
    rows: &[T],
    filename: impl Into<String>,
) -> Result<CsvPayload, ExportError> {
    let visible: Vec<&Column<T>> = columns.iter().filter(|c| !c.is_hidden()).collect();

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(visible.iter().map(|c| c.title()))?;
    for row in rows {
        writer.write_record(visible.iter().map(|c| c.value_of(row).to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|source| source.into_error())?;

    Ok(CsvPayload {
        filename: filename.into(),
        content_type: CSV_CONTENT_TYPE,
        bytes,
    })
}
