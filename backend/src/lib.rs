//! # Stark - character roster normalization, export and sorting
//!
//! Stark keeps a roster of character records, cleans their raw field values,
//! writes them to CSV or JSON and lists them sorted by a chosen field.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Raw roster  │────▶│  Normalize  │────▶│    Files    │────▶│  CSV / JSON │
//! │ (all text)  │     │ (sanitizers)│     │ (export)    │     │             │
//! └─────────────┘     └──────┬──────┘     └─────────────┘     └─────────────┘
//!                            │
//!                            ▼
//!                     ┌─────────────┐
//!                     │  Ordering   │
//!                     │ (asc/desc)  │
//!                     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use stark::{normalize_collection, sort_ascending, Record};
//!
//! let mut roster: Vec<Record> = vec![
//!     json!({"nombre": "A", "altura": "1.8"}).as_object().cloned().unwrap(),
//!     json!({"nombre": "B", "altura": "1.6"}).as_object().cloned().unwrap(),
//! ];
//!
//! normalize_collection(&mut roster);
//! sort_ascending(&mut roster, "altura");
//!
//! assert_eq!(roster[0]["nombre"], "B");
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`models`] - Records, typed field values, sanitizer errors
//! - [`sanitize`] - Integer, float and text sanitizers
//! - [`normalize`] - Applying sanitizers to the known fields
//! - [`files`] - CSV and JSON export/import
//! - [`ordering`] - In-place stable sorting by field
//! - [`menu`] - Interactive menu session
//! - [`config`] - File names and list key
//! - [`dataset`] - Embedded seed roster
//! - [`logging`] - Tracing subscriber setup

// Core modules
pub mod error;
pub mod models;

// Pipeline
pub mod normalize;
pub mod sanitize;

// Files
pub mod files;

// Ordering
pub mod ordering;

// Session
pub mod config;
pub mod dataset;
pub mod logging;
pub mod menu;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ExportError, ExportResult, ImportError, ImportResult, NormalizeError, SessionError,
    SessionResult,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{Collection, FieldKind, FieldValue, Record, SanitizeError, NOT_APPLICABLE};

// =============================================================================
// Re-exports - Sanitizers and normalizer
// =============================================================================

pub use normalize::{
    normalize_collection, restore_collection, restore_field, sanitize_field, sanitize_field_named,
    FieldOutcome, NormalizeSummary, KNOWN_FIELDS,
};
pub use sanitize::{sanitize_float, sanitize_integer, sanitize_text, DEFAULT_TEXT};

// =============================================================================
// Re-exports - Files
// =============================================================================

pub use files::{read_csv, read_json, write_csv, write_json};

// =============================================================================
// Re-exports - Ordering
// =============================================================================

pub use ordering::{compare_values, sort_ascending, sort_by_field, sort_descending, SortOrder};

// =============================================================================
// Re-exports - Session
// =============================================================================

pub use config::SessionConfig;
pub use menu::{MenuOption, Session};
