//! Ordering engine.
//!
//! In-place, stable exchange sort of a collection keyed by one field.
//! Records are swapped whole, and only when two neighbours are strictly
//! out of order, so records with equal keys keep their relative order.
//!
//! Values are compared with [`compare_values`]: a record without the field
//! sorts first, numbers sort before text, numbers compare numerically and
//! text compares byte-wise. The collection does not have to be normalized.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::models::{FieldValue, Record};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(Self::Ascending),
            "desc" => Ok(Self::Descending),
            other => Err(format!("unknown sort order '{}' (expected asc or desc)", other)),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => f.write_str("asc"),
            Self::Descending => f.write_str("desc"),
        }
    }
}

/// Compare two optional stored values.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => FieldValue::from(a).compare(&FieldValue::from(b)),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Bubble pass: swap neighbours while `out_of_order` holds, stop early once a
/// pass makes no swap.
fn exchange_sort(records: &mut [Record], key: &str, out_of_order: Ordering) {
    let len = records.len();
    let mut swaps = 0usize;
    for pass in 0..len.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..len - 1 - pass {
            if compare_values(records[j].get(key), records[j + 1].get(key)) == out_of_order {
                records.swap(j, j + 1);
                swapped = true;
                swaps += 1;
            }
        }
        if !swapped {
            break;
        }
    }
    debug!(key, records = len, swaps, "sorted collection");
}

/// Sort by `key`, smallest first.
pub fn sort_ascending(records: &mut [Record], key: &str) {
    exchange_sort(records, key, Ordering::Greater);
}

/// Sort by `key`, largest first.
pub fn sort_descending(records: &mut [Record], key: &str) {
    exchange_sort(records, key, Ordering::Less);
}

/// Sort by `key` in the given direction.
pub fn sort_by_field(records: &mut [Record], key: &str, order: SortOrder) {
    match order {
        SortOrder::Ascending => sort_ascending(records, key),
        SortOrder::Descending => sort_descending(records, key),
    }
}
