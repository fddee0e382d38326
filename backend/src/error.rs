//! Error types for the roster tool.
//!
//! - [`NormalizeError`] - Unknown field key or sanitizer kind
//! - [`ImportError`] - Reading CSV/JSON files
//! - [`ExportError`] - Writing CSV/JSON files
//! - [`SessionError`] - Top-level menu session errors
//!
//! Validation failures of single values are not errors of this module: they
//! are returned as [`crate::models::SanitizeError`] values.
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Normalization Errors
// =============================================================================

/// Programmer errors when sanitizing a single field. Nothing is mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// The record has no such field.
    #[error("Key '{0}' does not exist in the record")]
    MissingKey(String),

    /// The sanitizer kind is not one of integer, float or string.
    #[error("Unrecognized data type: {0}")]
    UnknownKind(String),
}

// =============================================================================
// Import Errors
// =============================================================================

/// Errors while reading a roster file.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The file does not exist.
    #[error("File '{}' was not found", .0.display())]
    FileNotFound(PathBuf),

    /// Any other IO failure.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// The bytes could not be decoded.
    #[error("Failed to decode file as {0}")]
    Encoding(String),

    /// The CSV file has no header line.
    #[error("CSV file is empty")]
    EmptyFile,

    /// A CSV row does not have as many fields as the header.
    #[error("Line {line}: expected {expected} fields, found {found}")]
    RowLength {
        line: u64,
        expected: u64,
        found: u64,
    },

    /// Invalid CSV content.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid JSON content.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON document has no list under the requested key.
    #[error("List '{0}' was not found in the JSON file")]
    KeyNotFound(String),

    /// The requested key does not hold an array of objects.
    #[error("Key '{0}' does not hold a list of records")]
    NotAList(String),
}

impl ImportError {
    /// True for the "file missing" class, as opposed to "content missing".
    pub fn is_missing_file(&self) -> bool {
        matches!(self, Self::FileNotFound(_))
    }
}

// =============================================================================
// Export Errors
// =============================================================================

/// Errors while writing a roster file.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Nothing to write; the file is not created.
    #[error("The list is empty, no file was generated")]
    EmptyCollection,

    /// IO failure while creating or writing the file.
    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writer failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Session Errors (top-level)
// =============================================================================

/// Top-level errors of a menu session or CLI command.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Import error.
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Export error.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Terminal IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // ImportError -> SessionError
        let import_err = ImportError::KeyNotFound("heroes".into());
        let session_err: SessionError = import_err.into();
        assert!(session_err.to_string().contains("heroes"));

        // ExportError -> SessionError
        let export_err = ExportError::EmptyCollection;
        let session_err: SessionError = export_err.into();
        assert!(session_err.to_string().contains("empty"));
    }

    #[test]
    fn test_missing_file_is_distinct() {
        let missing = ImportError::FileNotFound(PathBuf::from("heroes.csv"));
        assert!(missing.is_missing_file());
        assert!(missing.to_string().contains("heroes.csv"));
        assert!(!ImportError::KeyNotFound("heroes".into()).is_missing_file());
    }

    #[test]
    fn test_row_length_format() {
        let err = ImportError::RowLength {
            line: 3,
            expected: 4,
            found: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("Line 3"));
        assert!(msg.contains("expected 4"));
    }
}
