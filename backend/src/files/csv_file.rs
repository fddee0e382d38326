//! CSV export and import.
//!
//! # Format
//!
//! ```text
//! nombre,altura,peso,fuerza
//! Howard the Duck,79.35,18.45,2
//! Rocket Raccoon,122.77,25.73,5
//! ```
//!
//! Values are written as-is: no quoting and no escaping. A value containing a
//! comma corrupts its line; reading it back fails with
//! [`ImportError::RowLength`].

use csv::{QuoteStyle, ReaderBuilder, StringRecord, WriterBuilder};
use serde_json::Value;
use std::path::Path;
use tracing::info;

use super::encoding::decode_auto;
use super::read_bytes;
use crate::error::{ExportError, ExportResult, ImportError, ImportResult};
use crate::models::{display_value, Collection, Record};

/// Column headers: the first record's keys in insertion order.
pub fn headers(records: &[Record]) -> Vec<String> {
    records
        .first()
        .map(|r| r.keys().cloned().collect())
        .unwrap_or_default()
}

/// Render the collection as CSV text.
pub fn to_csv_string(records: &[Record]) -> ExportResult<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .from_writer(Vec::new());
    write_records(&mut writer, records)?;

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn write_records<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    records: &[Record],
) -> ExportResult<()> {
    if records.is_empty() {
        return Err(ExportError::EmptyCollection);
    }

    let headers = headers(records);
    writer.write_record(&headers)?;
    for record in records {
        let row = headers.iter().map(|h| match record.get(h) {
            Some(value) => display_value(value),
            None => String::new(),
        });
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the collection to a CSV file.
///
/// An empty collection is refused and no file is created.
pub fn write_csv<P: AsRef<Path>>(path: P, records: &[Record]) -> ExportResult<()> {
    let path = path.as_ref();
    if records.is_empty() {
        return Err(ExportError::EmptyCollection);
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .from_path(path)?;
    write_records(&mut writer, records)?;

    info!(path = %path.display(), records = records.len(), "generated CSV file");
    Ok(())
}

/// Parse CSV text into records, all values as text.
pub fn parse_csv_str(content: &str) -> ImportResult<Collection> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .quoting(false)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(ImportError::EmptyFile);
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(row_error)?;
        records.push(zip_row(&headers, &row));
    }
    Ok(records)
}

fn zip_row(headers: &StringRecord, row: &StringRecord) -> Record {
    headers
        .iter()
        .zip(row.iter())
        .map(|(h, v)| (h.to_string(), Value::String(v.to_string())))
        .collect()
}

fn row_error(err: csv::Error) -> ImportError {
    match err.kind() {
        csv::ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } => ImportError::RowLength {
            line: pos.as_ref().map(|p| p.line()).unwrap_or_default(),
            expected: *expected_len,
            found: *len,
        },
        _ => ImportError::Csv(err),
    }
}

/// Read a CSV file into a collection.
pub fn read_csv<P: AsRef<Path>>(path: P) -> ImportResult<Collection> {
    let path = path.as_ref();
    let bytes = read_bytes(path)?;
    let content = decode_auto(&bytes)?;
    let records = parse_csv_str(&content)?;

    info!(path = %path.display(), records = records.len(), "read CSV file");
    Ok(records)
}
