//! JSON export and import.
//!
//! The collection is stored under a caller-chosen key:
//!
//! ```text
//! {
//!     "heroes": [
//!         { "nombre": "Howard the Duck", "altura": 79.35, ... },
//!         ...
//!     ]
//! }
//! ```

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Serializer, Value};
use std::fs;
use std::path::Path;
use tracing::info;

use super::read_bytes;
use crate::error::{ExportError, ExportResult, ImportError, ImportResult};
use crate::models::{Collection, Record};

const INDENT: &[u8] = b"    ";

/// Serialize any value pretty-printed with 4-space indentation.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Wrap the collection under `list_key`.
pub fn to_document(records: &[Record], list_key: &str) -> Value {
    let list = records.iter().cloned().map(Value::Object).collect();
    let mut root = Map::new();
    root.insert(list_key.to_string(), Value::Array(list));
    Value::Object(root)
}

/// Write the collection to a JSON file under `list_key`.
///
/// An empty collection is refused and no file is created.
pub fn write_json<P: AsRef<Path>>(path: P, records: &[Record], list_key: &str) -> ExportResult<()> {
    let path = path.as_ref();
    if records.is_empty() {
        return Err(ExportError::EmptyCollection);
    }

    let content = to_pretty_json(&to_document(records, list_key))?;
    fs::write(path, content)?;

    info!(path = %path.display(), records = records.len(), "generated JSON file");
    Ok(())
}

/// Extract the list stored under `list_key` from a parsed document.
pub fn extract_list(document: Value, list_key: &str) -> ImportResult<Collection> {
    let Value::Object(mut root) = document else {
        return Err(ImportError::KeyNotFound(list_key.to_string()));
    };
    let list = root
        .remove(list_key)
        .ok_or_else(|| ImportError::KeyNotFound(list_key.to_string()))?;

    let Value::Array(items) = list else {
        return Err(ImportError::NotAList(list_key.to_string()));
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::Object(record) => Ok(record),
            _ => Err(ImportError::NotAList(list_key.to_string())),
        })
        .collect()
}

/// Read the collection stored under `list_key` in a JSON file.
pub fn read_json<P: AsRef<Path>>(path: P, list_key: &str) -> ImportResult<Collection> {
    let path = path.as_ref();
    let bytes = read_bytes(path)?;
    let document: Value = serde_json::from_slice(&bytes)?;
    let records = extract_list(document, list_key)?;

    info!(path = %path.display(), records = records.len(), "read JSON file");
    Ok(records)
}
