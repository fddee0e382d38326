//! Session configuration.
//!
//! The menu works with two fixed files and one list key. The defaults match
//! the names the roster has always used; the CLI can override each of them.

use std::path::PathBuf;

/// Default CSV export file.
pub const DEFAULT_CSV_PATH: &str = "heroes.csv";

/// Default JSON export file.
pub const DEFAULT_JSON_PATH: &str = "heroes.json";

/// Default top-level key of the JSON document.
pub const DEFAULT_LIST_KEY: &str = "heroes";

/// Field used to list the CSV roster (ascending).
pub const CSV_LIST_FIELD: &str = "altura";

/// Field used to list the JSON roster (descending).
pub const JSON_LIST_FIELD: &str = "peso";

/// Field the session roster is sorted by on demand.
pub const SORT_FIELD: &str = "fuerza";

/// Files and keys used by a menu session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Where option 2 writes and option 3 reads.
    pub csv_path: PathBuf,
    /// Where option 4 writes and option 5 reads.
    pub json_path: PathBuf,
    /// Key holding the list inside the JSON document.
    pub list_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            json_path: PathBuf::from(DEFAULT_JSON_PATH),
            list_key: DEFAULT_LIST_KEY.to_string(),
        }
    }
}

impl SessionConfig {
    /// Put both export files inside `dir`, keeping their file names.
    #[must_use]
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        self.csv_path = dir.join(DEFAULT_CSV_PATH);
        self.json_path = dir.join(DEFAULT_JSON_PATH);
        self
    }

    #[must_use]
    pub fn with_csv_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.csv_path = path.into();
        self
    }

    #[must_use]
    pub fn with_json_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.json_path = path.into();
        self
    }

    #[must_use]
    pub fn with_list_key(mut self, key: impl Into<String>) -> Self {
        self.list_key = key.into();
        self
    }
}
