//! Field sanitizers.
//!
//! Pure functions turning one raw text value into a typed value or a
//! [`SanitizeError`]. They never panic and never touch a record; see
//! [`crate::normalize`] for applying them to a collection.
//!
//! | Sanitizer            | Accepts                                   | Errors                                        |
//! |----------------------|-------------------------------------------|-----------------------------------------------|
//! | [`sanitize_integer`] | optional leading `-`, then ASCII digits   | `NonNumeric`, `Negative`, `ConversionFailure` |
//! | [`sanitize_float`]   | optional leading `-`, digits, one `.`     | `NonNumeric`, `Negative`, `ConversionFailure` |
//! | [`sanitize_text`]    | ASCII letters (`/` becomes ` `)           | `NotApplicable`                               |
//!
//! A leading `-` is read as a sign, so `"-5"` is `Negative` rather than
//! `NonNumeric`.

use crate::models::SanitizeError;

/// Default used by [`sanitize_text`] for empty values.
pub const DEFAULT_TEXT: &str = "-";

/// Split an optional leading minus sign from the digits.
fn split_sign(value: &str) -> (bool, &str) {
    match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value),
    }
}

fn all_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Sanitize a non-negative integer.
///
/// # Example
/// ```
/// use stark::sanitize::sanitize_integer;
/// use stark::SanitizeError;
///
/// assert_eq!(sanitize_integer(" 42 "), Ok(42));
/// assert_eq!(sanitize_integer("-5"), Err(SanitizeError::Negative));
/// assert_eq!(sanitize_integer("4x"), Err(SanitizeError::NonNumeric));
/// ```
pub fn sanitize_integer(raw: &str) -> Result<i64, SanitizeError> {
    let value = raw.trim();
    let (negative, digits) = split_sign(value);
    if !all_digits(digits) {
        return Err(SanitizeError::NonNumeric);
    }

    // Digits only, so the only parse failure left is overflow.
    let number: i64 = value.parse().map_err(|_| SanitizeError::ConversionFailure)?;
    if negative && number < 0 {
        return Err(SanitizeError::Negative);
    }
    Ok(number)
}

/// Sanitize a non-negative floating point number.
///
/// At most one `.` separator is allowed.
pub fn sanitize_float(raw: &str) -> Result<f64, SanitizeError> {
    let value = raw.trim();
    let (_, unsigned) = split_sign(value);
    if !all_digits(&unsigned.replacen('.', "", 1)) {
        return Err(SanitizeError::NonNumeric);
    }

    let number: f64 = value.parse().map_err(|_| SanitizeError::ConversionFailure)?;
    if !number.is_finite() {
        return Err(SanitizeError::ConversionFailure);
    }
    if number < 0.0 {
        return Err(SanitizeError::Negative);
    }
    Ok(number)
}

/// Sanitize free text.
///
/// Slashes are read as word separators, but the alphabetic check does not
/// accept spaces, so `"Brown/Black"` and `"light blue"` are both
/// [`SanitizeError::NotApplicable`].
///
/// # Example
/// ```
/// use stark::sanitize::{sanitize_text, DEFAULT_TEXT};
/// use stark::SanitizeError;
///
/// assert_eq!(sanitize_text(" Blue ", DEFAULT_TEXT), Ok("blue".to_string()));
/// assert_eq!(sanitize_text("", DEFAULT_TEXT), Ok("-".to_string()));
/// assert_eq!(sanitize_text("abc123", DEFAULT_TEXT), Err(SanitizeError::NotApplicable));
/// ```
pub fn sanitize_text(raw: &str, default: &str) -> Result<String, SanitizeError> {
    let value = raw.trim().replace('/', " ");
    let default = default.trim();

    if value.is_empty() {
        Ok(default.to_lowercase())
    } else if value.bytes().all(|b| b.is_ascii_alphabetic()) {
        Ok(value.to_lowercase())
    } else {
        Err(SanitizeError::NotApplicable)
    }
}
