//! Left-preserving join combinator shared by every builder
//!
//! The secondary input is indexed once by key; when a key occurs more than
//! once the first row seen wins and the extra matches are recorded so callers
//! can report or reject them.

use crate::error::{GoldError, Result};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::hash::Hash;
use tracing::{debug, warn};

/// First-seen lookup over the secondary side of a join
pub struct LookupIndex<'a, K, R> {
    name: &'static str,
    rows: HashMap<K, &'a R>,
    match_counts: HashMap<K, usize>,
    ambiguous: Vec<K>,
}

impl<'a, K, R> LookupIndex<'a, K, R>
where
    K: Eq + Hash + Clone,
{
    pub fn build<I, F>(name: &'static str, rows: I, key: F) -> Self
    where
        I: IntoIterator<Item = &'a R>,
        F: Fn(&'a R) -> K,
    {
        let mut index = HashMap::new();
        let mut match_counts: HashMap<K, usize> = HashMap::new();
        let mut ambiguous = Vec::new();

        for row in rows {
            let k = key(row);
            match index.entry(k) {
                Entry::Vacant(slot) => {
                    slot.insert(row);
                }
                Entry::Occupied(slot) => {
                    let count = match_counts.entry(slot.key().clone()).or_insert(1);
                    if *count == 1 {
                        ambiguous.push(slot.key().clone());
                    }
                    *count += 1;
                }
            }
        }

        if !ambiguous.is_empty() {
            warn!(
                join = name,
                ambiguous_keys = ambiguous.len(),
                "duplicate keys on lookup side, keeping first-seen row"
            );
        }

        Self {
            name,
            rows: index,
            match_counts,
            ambiguous,
        }
    }

    pub fn get(&self, key: &K) -> Option<&'a R> {
        self.rows.get(key).copied()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Keys that matched more than one row, in first-occurrence order, with their row counts
    pub fn ambiguous_keys(&self) -> impl Iterator<Item = (&K, usize)> + '_ {
        self.ambiguous
            .iter()
            .map(move |k| (k, self.match_counts.get(k).copied().unwrap_or(1)))
    }

    pub fn ambiguous_count(&self) -> usize {
        self.ambiguous.len()
    }

    pub fn ensure_unambiguous(&self) -> Result<()>
    where
        K: Display,
    {
        match self.ambiguous_keys().next() {
            Some((key, matches)) => Err(GoldError::ReferenceAmbiguity {
                join: self.name.to_string(),
                key: key.to_string(),
                matches,
            }),
            None => Ok(()),
        }
    }
}

/// Every left row paired with its optional match, in left input order
pub struct LeftJoin<'a, L, R> {
    pub pairs: Vec<(&'a L, Option<&'a R>)>,
    pub unmatched: usize,
}

/// Left-preserving join: never drops or multiplies a left row.
///
/// A `None` key on the left side is treated as "no match".
pub fn left_join<'a, L, R, K, I, F>(
    left: I,
    index: &LookupIndex<'a, K, R>,
    key: F,
) -> LeftJoin<'a, L, R>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = &'a L>,
    F: Fn(&'a L) -> Option<K>,
{
    let pairs: Vec<(&'a L, Option<&'a R>)> = left
        .into_iter()
        .map(|row| (row, key(row).and_then(|k| index.get(&k))))
        .collect();
    let unmatched = pairs.iter().filter(|(_, m)| m.is_none()).count();

    debug!(
        join = index.name(),
        rows = pairs.len(),
        unmatched,
        "left join"
    );

    LeftJoin { pairs, unmatched }
}

/// Row counts of one projection, keyed by join name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionStats {
    pub rows_in: usize,
    pub rows_out: usize,
    /// Left rows that found no match
    pub unmatched: BTreeMap<String, usize>,
    /// Lookup keys carried by more than one row
    pub ambiguous_keys: BTreeMap<String, usize>,
}

impl ProjectionStats {
    pub fn new(rows_in: usize, rows_out: usize) -> Self {
        Self {
            rows_in,
            rows_out,
            ..Default::default()
        }
    }

    pub fn record<K, L, R>(&mut self, index: &LookupIndex<'_, K, R>, join: &LeftJoin<'_, L, R>)
    where
        K: Eq + Hash + Clone,
    {
        self.unmatched.insert(index.name().to_string(), join.unmatched);
        self.ambiguous_keys.insert(index.name().to_string(), index.ambiguous_count());
    }

    pub fn unmatched_in(&self, join: &str) -> usize {
        self.unmatched.get(join).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Row {
        key: &'static str,
        value: i32,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { key: "a", value: 1 },
            Row { key: "b", value: 2 },
            Row { key: "a", value: 3 },
        ]
    }

    #[test]
    fn test_first_seen_wins_on_duplicate_keys() {
        let right = rows();
        let index = LookupIndex::build("test", &right, |r| r.key);

        assert_eq!(index.len(), 2);
        assert_eq!(index.get(&"a").map(|r| r.value), Some(1));
        let ambiguous: Vec<_> = index.ambiguous_keys().collect();
        assert_eq!(ambiguous, vec![(&"a", 2)]);
    }

    #[test]
    fn test_ensure_unambiguous_reports_key() {
        let right = rows();
        let index = LookupIndex::build("test", &right, |r| r.key);

        match index.ensure_unambiguous() {
            Err(GoldError::ReferenceAmbiguity { join, key, matches }) => {
                assert_eq!(join, "test");
                assert_eq!(key, "a");
                assert_eq!(matches, 2);
            }
            other => panic!("expected ambiguity, got {:?}", other),
        }
    }

    #[test]
    fn test_left_join_keeps_every_left_row() {
        let right = rows();
        let index = LookupIndex::build("test", &right, |r| r.key);
        let left = vec![Some("b"), Some("z"), None, Some("a")];

        let joined = left_join(&left, &index, |k| *k);

        assert_eq!(joined.pairs.len(), left.len());
        assert_eq!(joined.unmatched, 2);
        let values: Vec<Option<i32>> =
            joined.pairs.iter().map(|(_, m)| m.map(|r| r.value)).collect();
        assert_eq!(values, vec![Some(2), None, None, Some(1)]);
    }

    #[test]
    fn test_stats_record_unmatched_and_ambiguous() {
        let right = rows();
        let index = LookupIndex::build("test", &right, |r| r.key);
        let left = vec![Some("a"), Some("z")];
        let joined = left_join(&left, &index, |k| *k);

        let mut stats = ProjectionStats::new(left.len(), left.len());
        stats.record(&index, &joined);

        assert_eq!(stats.unmatched_in("test"), 1);
        assert_eq!(stats.ambiguous_keys.get("test"), Some(&1));
        assert_eq!(stats.unmatched_in("other"), 0);
    }
}
