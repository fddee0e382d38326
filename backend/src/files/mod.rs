//! Flat-file serializers for the roster.
//!
//! - [`csv_file`] - Comma-separated export/import, header from the first record
//! - [`json_file`] - `{ "<list key>": [records] }` export/import
//! - [`encoding`] - Charset detection for files written by other tools
//!
//! Every function opens, fully reads or writes, and closes its file before
//! returning. A missing file is always [`ImportError::FileNotFound`], kept
//! apart from content errors such as [`ImportError::KeyNotFound`].
//!
//! [`ImportError::FileNotFound`]: crate::error::ImportError::FileNotFound
//! [`ImportError::KeyNotFound`]: crate::error::ImportError::KeyNotFound

pub mod csv_file;
pub mod encoding;
pub mod json_file;

pub use csv_file::{read_csv, write_csv};
pub use json_file::{read_json, write_json};

use std::io;
use std::path::Path;

use crate::error::{ImportError, ImportResult};

/// Read a whole file, mapping "not found" to its own error class.
pub(crate) fn read_bytes(path: &Path) -> ImportResult<Vec<u8>> {
    std::fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ImportError::FileNotFound(path.to_path_buf()),
        _ => ImportError::Io(e),
    })
}
