//! Word-count table and its overlay onto lexical units.

use arcstr::ArcStr;
use lexnet_common::CountCategory;
use lexnet_common::collections::{LexMap, lex_map};
use serde::Serialize;

/// Corpus frequencies keyed by word form and category bucket.
///
/// Frequencies of the same form and bucket accumulate, so a table listing
/// `dat` once as a pronoun and once as a numeral adds both to the noun bucket.
#[derive(Debug, Clone, Default)]
pub struct CountTable {
    counts: LexMap<(ArcStr, CountCategory), u64>,
    totals: LexMap<CountCategory, u64>,
}

impl CountTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            counts: lex_map(),
            totals: lex_map(),
        }
    }

    /// Adds `count` occurrences of `form` in `bucket`.
    pub fn add(&mut self, form: &str, bucket: CountCategory, count: u64) {
        let entry = self.counts.entry((ArcStr::from(form), bucket)).or_insert(0);
        *entry = entry.saturating_add(count);
        let total = self.totals.entry(bucket).or_insert(0);
        *total = total.saturating_add(count);
    }

    /// Count for a form in a bucket, `None` when the table has no entry.
    #[must_use]
    pub fn get(&self, form: &str, bucket: CountCategory) -> Option<u64> {
        self.counts.get(&(ArcStr::from(form), bucket)).copied()
    }

    /// Sum of all counts in a bucket.
    #[must_use]
    pub fn total(&self, bucket: CountCategory) -> u64 {
        self.totals.get(&bucket).copied().unwrap_or(0)
    }

    /// Per-bucket totals of the whole table.
    #[must_use]
    pub fn totals(&self) -> CountTotals {
        CountTotals {
            noun: self.total(CountCategory::Noun),
            verb: self.total(CountCategory::Verb),
            adj: self.total(CountCategory::Adj),
            other: self.total(CountCategory::Other),
        }
    }

    /// Number of distinct (form, bucket) entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Corpus size per count bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CountTotals {
    pub noun: u64,
    pub verb: u64,
    pub adj: u64,
    pub other: u64,
}

impl CountTotals {
    /// Total of one bucket.
    #[must_use]
    pub fn get(&self, bucket: CountCategory) -> u64 {
        match bucket {
            CountCategory::Noun => self.noun,
            CountCategory::Verb => self.verb,
            CountCategory::Adj => self.adj,
            CountCategory::Other => self.other,
        }
    }

    /// Adds `count` to a bucket.
    pub fn add(&mut self, bucket: CountCategory, count: u64) {
        let slot = match bucket {
            CountCategory::Noun => &mut self.noun,
            CountCategory::Verb => &mut self.verb,
            CountCategory::Adj => &mut self.adj,
            CountCategory::Other => &mut self.other,
        };
        *slot = slot.saturating_add(count);
    }

    /// Sum over every bucket.
    #[must_use]
    pub fn all(&self) -> u64 {
        [self.noun, self.verb, self.adj, self.other]
            .into_iter()
            .fold(0u64, u64::saturating_add)
    }
}

/// Outcome of applying a [`CountTable`] to a graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CountOverlay {
    /// Units whose form was found in the table.
    pub matched: usize,
    /// Units set to zero because the table had no entry.
    pub unmatched: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_accumulate_per_bucket() {
        let mut table = CountTable::new();
        table.add("dat", CountCategory::from_tag("VNW"), 10);
        table.add("dat", CountCategory::from_tag("TW"), 5);
        table.add("dat", CountCategory::from_tag("VG"), 7);

        assert_eq!(table.get("dat", CountCategory::Noun), Some(15));
        assert_eq!(table.get("dat", CountCategory::Other), Some(7));
        assert_eq!(table.get("dat", CountCategory::Verb), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_totals() {
        let mut table = CountTable::new();
        table.add("taal", CountCategory::Noun, 40);
        table.add("spreken", CountCategory::Verb, 2);
        table.add("spraak", CountCategory::Noun, 8);

        assert_eq!(table.total(CountCategory::Noun), 48);
        assert_eq!(table.total(CountCategory::Adj), 0);
        let totals = table.totals();
        assert_eq!(totals.get(CountCategory::Verb), 2);
        assert_eq!(totals.all(), 50);
        assert!(!table.is_empty());
    }
}
