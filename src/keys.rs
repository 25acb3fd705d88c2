//! Positional surrogate keys
//!
//! Keys are recomputed on every build from the sort order alone; nothing is
//! persisted between runs.

use itertools::Itertools;
use std::cmp::Ordering;

/// First key handed out by every dimension (`ROW_NUMBER()` semantics)
pub const FIRST_SURROGATE_KEY: i64 = 1;

/// Stable-sort `rows` with `compare` and number them from [`FIRST_SURROGATE_KEY`]
pub fn assign_surrogate_keys<T, F>(rows: Vec<T>, compare: F) -> Vec<(i64, T)>
where
    F: FnMut(&T, &T) -> Ordering,
{
    rows.into_iter()
        .sorted_by(compare)
        .enumerate()
        .map(|(position, row)| (FIRST_SURROGATE_KEY + position as i64, row))
        .collect()
}

/// True when `keys`, taken in order, are exactly FIRST_SURROGATE_KEY, +1, +2, ...
pub fn is_contiguous<I>(keys: I) -> bool
where
    I: IntoIterator<Item = i64>,
{
    keys.into_iter()
        .zip(FIRST_SURROGATE_KEY..)
        .all(|(key, expected)| key == expected)
}
