//! Charset detection for CSV input.
//!
//! Files exported by this tool are UTF-8, but rosters edited in a
//! spreadsheet often come back as Latin-1 or Windows-1252.

use crate::error::{ImportError, ImportResult};

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let charset = chardet::detect(bytes).0;

    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes to a string using the given encoding.
///
/// Unknown labels fall back to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> ImportResult<String> {
    let label = match encoding {
        "iso-8859-1" => "iso-8859-15",
        other => other,
    };
    let Some(codec) = encoding_rs::Encoding::for_label(label.as_bytes()) else {
        return Ok(String::from_utf8_lossy(bytes).into_owned());
    };

    let (text, _, had_errors) = codec.decode(bytes);
    if had_errors && codec == encoding_rs::UTF_8 {
        return Err(ImportError::Encoding(encoding.to_string()));
    }
    Ok(text.into_owned())
}

/// Detect and decode in one step.
pub fn decode_auto(bytes: &[u8]) -> ImportResult<String> {
    let encoding = detect_encoding(bytes);
    tracing::debug!(encoding = %encoding, "detected encoding");
    decode_content(bytes, &encoding)
}
