//! Record normalization.
//!
//! Applies the right sanitizer to each known field of every record, writing
//! the sanitized value (or its stored error marker) back in place.
//!
//! [`normalize_collection`] reads every text value as raw input.
//! [`restore_collection`] is for data read back from a CSV export, where the
//! markers of the first pass (`-1`, `-2`, `-3`, `-`, `N/A`) come back as text
//! and must keep their meaning.
//!
//! # Known fields
//!
//! ```text
//! altura        float
//! peso          float
//! color_ojos    string
//! color_pelo    string
//! fuerza        integer
//! inteligencia  string   (sanitized as text although it reads like a score)
//! ```

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::NormalizeError;
use crate::models::{FieldKind, FieldValue, Record, SanitizeError, NOT_APPLICABLE};
use crate::sanitize::{sanitize_float, sanitize_integer, sanitize_text, DEFAULT_TEXT};

/// Fields touched by [`normalize_collection`], in application order.
pub const KNOWN_FIELDS: [(&str, FieldKind); 6] = [
    ("altura", FieldKind::Float),
    ("peso", FieldKind::Float),
    ("color_ojos", FieldKind::Text),
    ("color_pelo", FieldKind::Text),
    ("fuerza", FieldKind::Integer),
    ("inteligencia", FieldKind::Text),
];

/// What happened to a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOutcome {
    /// The raw text was valid and replaced by its typed value.
    Sanitized,
    /// The raw text was rejected; the slot now holds the error marker.
    Rejected(SanitizeError),
    /// The slot held a non-text value already; nothing was changed.
    AlreadyTyped,
}

/// Counters returned by [`normalize_collection`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizeSummary {
    pub records: usize,
    pub sanitized: usize,
    pub rejected: usize,
    pub missing: usize,
    pub already_typed: usize,
}

impl NormalizeSummary {
    fn record(&mut self, outcome: &Result<FieldOutcome, NormalizeError>) {
        match outcome {
            Ok(FieldOutcome::Sanitized) => self.sanitized += 1,
            Ok(FieldOutcome::Rejected(_)) => self.rejected += 1,
            Ok(FieldOutcome::AlreadyTyped) => self.already_typed += 1,
            Err(_) => self.missing += 1,
        }
    }
}

/// Apply the sanitizer selected by `kind` to a raw value.
fn sanitize_raw(raw: &str, kind: FieldKind) -> FieldValue {
    match kind {
        FieldKind::Integer => sanitize_integer(raw).into(),
        FieldKind::Float => sanitize_float(raw).into(),
        FieldKind::Text => sanitize_text(raw, DEFAULT_TEXT).into(),
    }
}

/// How text found in a slot is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    /// Raw input: every text value goes through the sanitizer.
    Raw,
    /// Values written by an earlier pass and read back as text (CSV import).
    Stored,
}

/// Error marker or default previously written for `kind`, if `raw` is one.
fn stored_marker(raw: &str, kind: FieldKind) -> Option<Value> {
    match kind {
        FieldKind::Integer | FieldKind::Float => raw
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(SanitizeError::from_code)
            .map(|e| e.to_value()),
        FieldKind::Text => matches!(raw, DEFAULT_TEXT | NOT_APPLICABLE).then(|| Value::from(raw)),
    }
}

fn apply_field(
    record: &mut Record,
    key: &str,
    kind: FieldKind,
    source: Source,
) -> Result<FieldOutcome, NormalizeError> {
    let key = key.to_lowercase();
    let slot = record
        .get_mut(&key)
        .ok_or_else(|| NormalizeError::MissingKey(key.clone()))?;

    let Value::String(raw) = &*slot else {
        return Ok(FieldOutcome::AlreadyTyped);
    };

    if source == Source::Stored {
        if let Some(marker) = stored_marker(raw, kind) {
            debug!(field = %key, kind = %kind, marker = %marker, "kept stored marker");
            *slot = marker;
            return Ok(FieldOutcome::AlreadyTyped);
        }
    }

    let sanitized = sanitize_raw(raw, kind);
    let outcome = match &sanitized {
        FieldValue::Invalid(e) => FieldOutcome::Rejected(*e),
        _ => FieldOutcome::Sanitized,
    };
    debug!(field = %key, kind = %kind, raw = %raw, result = %sanitized, "sanitized field");

    *slot = sanitized.into();
    Ok(outcome)
}

/// Sanitize one field of a record in place.
///
/// The key is looked up lowercased. A missing key leaves the record
/// untouched. Values that are not text (already normalized, or typed by a
/// JSON source) are left as they are. Any text value is raw input, so a
/// literal `"-"` becomes `N/A` like every other non-alphabetic text.
///
/// # Example
/// ```
/// use serde_json::json;
/// use stark::normalize::{sanitize_field, FieldOutcome};
/// use stark::FieldKind;
///
/// let mut hero = json!({"nombre": "Howard", "altura": " 180.5 "})
///     .as_object().unwrap().clone();
///
/// let outcome = sanitize_field(&mut hero, "ALTURA", FieldKind::Float).unwrap();
/// assert_eq!(outcome, FieldOutcome::Sanitized);
/// assert_eq!(hero["altura"], json!(180.5));
/// ```
pub fn sanitize_field(
    record: &mut Record,
    key: &str,
    kind: FieldKind,
) -> Result<FieldOutcome, NormalizeError> {
    apply_field(record, key, kind, Source::Raw)
}

/// Sanitize one field of a record that was normalized before and read back
/// as text.
///
/// Stored markers are recognized instead of sanitized again: `-1`, `-2` and
/// `-3` in numeric fields become their typed error codes, `-` and `N/A` in
/// text fields stay as they are. Both count as already typed.
pub fn restore_field(
    record: &mut Record,
    key: &str,
    kind: FieldKind,
) -> Result<FieldOutcome, NormalizeError> {
    apply_field(record, key, kind, Source::Stored)
}

/// Sanitize a field selecting the sanitizer by name (`integer`, `float`,
/// `string`). An unknown name is rejected before the record is touched.
pub fn sanitize_field_named(
    record: &mut Record,
    key: &str,
    kind: &str,
) -> Result<FieldOutcome, NormalizeError> {
    let kind: FieldKind = kind.parse()?;
    sanitize_field(record, key, kind)
}

fn normalize_with(records: &mut [Record], source: Source) -> NormalizeSummary {
    let mut summary = NormalizeSummary::default();
    if records.is_empty() {
        return summary;
    }

    for record in records.iter_mut() {
        for (key, kind) in KNOWN_FIELDS {
            let outcome = apply_field(record, key, kind, source);
            if let Err(e) = &outcome {
                debug!("skipping field: {}", e);
            }
            summary.record(&outcome);
        }
        summary.records += 1;
    }

    info!(
        records = summary.records,
        sanitized = summary.sanitized,
        rejected = summary.rejected,
        missing = summary.missing,
        already_typed = summary.already_typed,
        "normalized collection"
    );
    summary
}

/// Normalize every known field of every record in place.
pub fn normalize_collection(records: &mut [Record]) -> NormalizeSummary {
    normalize_with(records, Source::Raw)
}

/// Normalize a collection read back from a CSV export, keeping the markers
/// of the earlier pass. See [`restore_field`].
pub fn restore_collection(records: &mut [Record]) -> NormalizeSummary {
    normalize_with(records, Source::Stored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    fn hero() -> Record {
        record(json!({
            "nombre": "Tony Stark",
            "altura": "185.44",
            "peso": " 102.0 ",
            "color_ojos": "Blue",
            "color_pelo": "Black",
            "fuerza": "35",
            "inteligencia": "high"
        }))
    }

    #[test]
    fn test_sanitize_field_each_kind() {
        let mut h = hero();
        assert_eq!(sanitize_field(&mut h, "altura", FieldKind::Float), Ok(FieldOutcome::Sanitized));
        assert_eq!(sanitize_field(&mut h, "fuerza", FieldKind::Integer), Ok(FieldOutcome::Sanitized));
        assert_eq!(sanitize_field(&mut h, "color_ojos", FieldKind::Text), Ok(FieldOutcome::Sanitized));

        assert_eq!(h["altura"], json!(185.44));
        assert_eq!(h["fuerza"], json!(35));
        assert_eq!(h["color_ojos"], json!("blue"));
    }

    #[test]
    fn test_missing_key_leaves_record_untouched() {
        let mut h = hero();
        let before = h.clone();
        let result = sanitize_field(&mut h, "velocidad", FieldKind::Integer);
        assert_eq!(result, Err(NormalizeError::MissingKey("velocidad".into())));
        assert_eq!(h, before);
    }

    #[test]
    fn test_unknown_kind_leaves_record_untouched() {
        let mut h = hero();
        let before = h.clone();
        let result = sanitize_field_named(&mut h, "altura", "boolean");
        assert!(matches!(result, Err(NormalizeError::UnknownKind(_))));
        assert_eq!(h, before);
    }

    #[test]
    fn test_key_lookup_is_case_insensitive() {
        let mut h = hero();
        assert_eq!(sanitize_field_named(&mut h, "PESO", "Float"), Ok(FieldOutcome::Sanitized));
        assert_eq!(h["peso"], json!(102.0));
    }

    #[test]
    fn test_rejected_value_stores_marker() {
        let mut h = record(json!({"fuerza": "-10", "color_pelo": "Brown/White"}));
        assert_eq!(
            sanitize_field(&mut h, "fuerza", FieldKind::Integer),
            Ok(FieldOutcome::Rejected(SanitizeError::Negative))
        );
        assert_eq!(
            sanitize_field(&mut h, "color_pelo", FieldKind::Text),
            Ok(FieldOutcome::Rejected(SanitizeError::NotApplicable))
        );
        assert_eq!(h["fuerza"], json!(-2));
        assert_eq!(h["color_pelo"], json!("N/A"));
    }

    #[test]
    fn test_intelligence_is_sanitized_as_text() {
        let mut records = vec![record(json!({"inteligencia": "good"})), record(json!({"inteligencia": "100"}))];
        normalize_collection(&mut records);
        assert_eq!(records[0]["inteligencia"], json!("good"));
        assert_eq!(records[1]["inteligencia"], json!("N/A"));
    }

    #[test]
    fn test_normalize_collection_summary() {
        let mut records = vec![hero(), record(json!({"nombre": "Ghost", "altura": "abc"}))];
        let summary = normalize_collection(&mut records);

        assert_eq!(summary.records, 2);
        assert_eq!(summary.sanitized, 6);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.missing, 5);
        assert_eq!(records[1]["altura"], json!(-1));
        assert_eq!(records[1]["nombre"], json!("Ghost"));
    }

    #[test]
    fn test_normalize_twice_is_noop() {
        let mut records = vec![hero()];
        normalize_collection(&mut records);
        let once = records.clone();

        let summary = normalize_collection(&mut records);
        assert_eq!(records, once);
        // text fields are still strings and get re-sanitized to themselves
        assert_eq!(summary.already_typed, 3);
    }

    #[test]
    fn test_raw_dash_is_not_applicable() {
        let mut records = vec![record(json!({"color_ojos": "-", "color_pelo": "N/A"}))];
        let summary = normalize_collection(&mut records);
        assert_eq!(records[0]["color_ojos"], json!("N/A"));
        assert_eq!(records[0]["color_pelo"], json!("N/A"));
        assert_eq!(summary.rejected, 2);
        assert_eq!(summary.already_typed, 0);
    }

    #[test]
    fn test_raw_error_code_text_is_sanitized() {
        let mut h = record(json!({"fuerza": "-1"}));
        assert_eq!(
            sanitize_field(&mut h, "fuerza", FieldKind::Integer),
            Ok(FieldOutcome::Rejected(SanitizeError::Negative))
        );
    }

    #[test]
    fn test_restore_keeps_text_markers() {
        let mut records = vec![record(json!({"color_ojos": "", "color_pelo": "Red/Orange"}))];
        normalize_collection(&mut records);
        assert_eq!(records[0]["color_ojos"], json!("-"));
        assert_eq!(records[0]["color_pelo"], json!("N/A"));

        let summary = restore_collection(&mut records);
        assert_eq!(records[0]["color_ojos"], json!("-"));
        assert_eq!(records[0]["color_pelo"], json!("N/A"));
        assert_eq!(summary.already_typed, 2);
    }

    #[test]
    fn test_restore_keeps_numeric_error_kinds() {
        let mut h = record(json!({"altura": "-1", "peso": " -3 ", "fuerza": "-2"}));
        assert_eq!(restore_field(&mut h, "altura", FieldKind::Float), Ok(FieldOutcome::AlreadyTyped));
        assert_eq!(restore_field(&mut h, "peso", FieldKind::Float), Ok(FieldOutcome::AlreadyTyped));
        assert_eq!(restore_field(&mut h, "fuerza", FieldKind::Integer), Ok(FieldOutcome::AlreadyTyped));

        assert_eq!(FieldValue::from(&h["altura"]), FieldValue::Invalid(SanitizeError::NonNumeric));
        assert_eq!(FieldValue::from(&h["peso"]), FieldValue::Invalid(SanitizeError::ConversionFailure));
        assert_eq!(FieldValue::from(&h["fuerza"]), FieldValue::Invalid(SanitizeError::Negative));
    }

    #[test]
    fn test_restore_sanitizes_plain_values() {
        let mut h = record(json!({"altura": "79.35", "fuerza": "-7", "color_ojos": "yellow"}));
        assert_eq!(restore_field(&mut h, "altura", FieldKind::Float), Ok(FieldOutcome::Sanitized));
        assert_eq!(
            restore_field(&mut h, "fuerza", FieldKind::Integer),
            Ok(FieldOutcome::Rejected(SanitizeError::Negative))
        );
        assert_eq!(restore_field(&mut h, "color_ojos", FieldKind::Text), Ok(FieldOutcome::Sanitized));
        assert_eq!(h["altura"], json!(79.35));
        assert_eq!(h["color_ojos"], json!("yellow"));
    }

    #[test]
    fn test_normalize_empty_collection() {
        let mut records: Vec<Record> = Vec::new();
        assert_eq!(normalize_collection(&mut records), NormalizeSummary::default());
    }
}
