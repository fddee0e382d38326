//! Seed roster.
//!
//! The built-in roster is embedded at compile time from `data/stark.json`.
//! All of its values are raw text, as they would arrive from a form.

use serde_json::Value;
use std::path::Path;

use crate::config::DEFAULT_LIST_KEY;
use crate::error::ImportResult;
use crate::files::json_file::extract_list;
use crate::files::read_json;
use crate::models::Collection;

const BUILTIN_ROSTER: &str = include_str!("../data/stark.json");

/// The embedded roster.
pub fn builtin() -> ImportResult<Collection> {
    let document: Value = serde_json::from_str(BUILTIN_ROSTER)?;
    extract_list(document, DEFAULT_LIST_KEY)
}

/// Load the roster from `path` when given, otherwise the embedded one.
pub fn load(path: Option<&Path>, list_key: &str) -> ImportResult<Collection> {
    match path {
        Some(p) => read_json(p, list_key),
        None => builtin(),
    }
}
