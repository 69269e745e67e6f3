use std::collections::HashMap;

use crate::error::{CodecError, Result};

/// Occurrence count of every symbol seen in a piece of text.
///
/// The running total is kept alongside the counts and always fits in a
/// `u64`, so every subtree weight built from the table fits as well.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<char, u64>,
    total: u64,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Self {
        let mut table = Self::new();
        // One per char: bounded by the text length, cannot overflow.
        for symbol in text.chars() {
            *table.counts.entry(symbol).or_insert(0) += 1;
            table.total += 1;
        }
        table
    }

    /// Rebuilds a table from stored pairs. Duplicates are summed and zero
    /// counts are dropped so every entry stays >= 1. Fails if the counts
    /// add up past `u64::MAX`.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (char, u64)>,
    {
        let mut table = Self::new();
        for (symbol, count) in pairs {
            table.add(symbol, count)?;
        }
        Ok(table)
    }

    fn add(&mut self, symbol: char, count: u64) -> Result<()> {
        if count == 0 {
            return Ok(());
        }
        let total = self.total.checked_add(count).ok_or(CodecError::InvalidInput("frequency overflow"))?;
        let entry = self.counts.entry(symbol).or_insert(0);
        // entry <= old total, so this cannot overflow once the total fits.
        *entry += count;
        self.total = total;
        Ok(())
    }

    /// Folds another partial table into this one. The sum is associative
    /// and commutative, so chunks may be counted in any order. On overflow
    /// the table is left unchanged.
    pub fn merge(&mut self, other: &FrequencyTable) -> Result<()> {
        self.total
            .checked_add(other.total)
            .ok_or(CodecError::InvalidInput("frequency overflow"))?;
        for (&symbol, &count) in &other.counts {
            self.add(symbol, count)?;
        }
        Ok(())
    }

    pub fn get(&self, symbol: char) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, equal to the length of the counted text in chars.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Entries in ascending symbol order.
    pub fn iter_sorted(&self) -> Vec<(char, u64)> {
        let mut entries: Vec<(char, u64)> = self.counts.iter().map(|(&s, &c)| (s, c)).collect();
        entries.sort_unstable_by_key(|&(symbol, _)| symbol);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_match_input() {
        let table = FrequencyTable::from_text("aabbbcc");
        assert_eq!(table.get('a'), Some(2));
        assert_eq!(table.get('b'), Some(3));
        assert_eq!(table.get('c'), Some(2));
        assert_eq!(table.get('d'), None);
        assert_eq!(table.len(), 3);
        assert_eq!(table.total(), 7);
    }

    #[test]
    fn counts_chars_not_bytes() {
        let table = FrequencyTable::from_text("héé");
        assert_eq!(table.get('é'), Some(2));
        assert_eq!(table.total(), 3);
    }

    #[test]
    fn merge_is_order_independent() {
        let left = FrequencyTable::from_text("abracad");
        let right = FrequencyTable::from_text("abra");

        let mut a = left.clone();
        a.merge(&right).unwrap();
        let mut b = right.clone();
        b.merge(&left).unwrap();

        assert_eq!(a, b);
        assert_eq!(a, FrequencyTable::from_text("abracadabra"));
    }

    #[test]
    fn from_pairs_sums_and_skips_zero() {
        let table = FrequencyTable::from_pairs([('x', 2), ('y', 0), ('x', 3)]).unwrap();
        assert_eq!(table.get('x'), Some(5));
        assert_eq!(table.get('y'), None);
        assert_eq!(table.total(), 5);
        assert_eq!(table.iter_sorted(), vec![('x', 5)]);
    }

    #[test]
    fn from_pairs_rejects_overflowing_counts() {
        let err = FrequencyTable::from_pairs([('a', u64::MAX), ('b', 1)]).unwrap_err();
        assert!(matches!(err, CodecError::InvalidInput("frequency overflow")));

        let err = FrequencyTable::from_pairs([('a', u64::MAX - 1), ('a', 2)]).unwrap_err();
        assert!(matches!(err, CodecError::InvalidInput("frequency overflow")));

        let table = FrequencyTable::from_pairs([('a', u64::MAX - 1), ('b', 1)]).unwrap();
        assert_eq!(table.total(), u64::MAX);
    }

    #[test]
    fn merge_overflow_leaves_table_unchanged() {
        let mut big = FrequencyTable::from_pairs([('a', u64::MAX)]).unwrap();
        let before = big.clone();
        assert!(big.merge(&FrequencyTable::from_text("zz")).is_err());
        assert_eq!(big, before);
    }

    #[test]
    fn sorted_iteration() {
        let table = FrequencyTable::from_text("cabca");
        assert_eq!(table.iter_sorted(), vec![('a', 2), ('b', 1), ('c', 2)]);
    }
}
