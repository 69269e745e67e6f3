use std::collections::BTreeMap;
use std::fmt;

use crate::frequency::FrequencyTable;
use crate::tree::{HuffNode, HuffmanTree};

/// Root-to-leaf path of a symbol: `false` for left, `true` for right.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Code(Vec<bool>);

impl Code {
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl From<Vec<bool>> for Code {
    fn from(bits: Vec<bool>) -> Self {
        Code(bits)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol to code mapping derived from a finished tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<char, Code>,
}

impl CodeTable {
    /// Walks the tree depth-first, 0 to the left and 1 to the right.
    ///
    /// A tree that is a single leaf has no edges to walk, so its symbol
    /// gets the one-bit code `0`.
    pub fn generate(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();
        match tree.root() {
            HuffNode::Leaf { symbol, .. } => {
                codes.insert(*symbol, Code(vec![false]));
            }
            root => assign_codes(root, Vec::new(), &mut codes),
        }
        CodeTable { codes }
    }

    pub fn get(&self, symbol: char) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    /// Entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &Code)> {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Code> = self.codes.values().collect();
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                if a.is_prefix_of(b) || b.is_prefix_of(a) {
                    return false;
                }
            }
        }
        true
    }

    /// Bits needed to encode text with these frequencies. Symbols missing
    /// from the table contribute nothing.
    pub fn encoded_bits(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies
            .iter_sorted()
            .into_iter()
            .filter_map(|(symbol, count)| self.get(symbol).map(|code| code.len() as u64 * count))
            .sum()
    }

    /// Expected code length in bits per symbol.
    pub fn average_length(&self, frequencies: &FrequencyTable) -> f64 {
        let total = frequencies.total();
        if total == 0 {
            return 0.0;
        }
        self.encoded_bits(frequencies) as f64 / total as f64
    }
}

fn assign_codes(node: &HuffNode, path: Vec<bool>, codes: &mut BTreeMap<char, Code>) {
    match node {
        HuffNode::Leaf { symbol, .. } => {
            codes.insert(*symbol, Code(path));
        }
        HuffNode::Internal { left, right, .. } => {
            let mut left_path = path.clone();
            left_path.push(false);
            assign_codes(left, left_path, codes);

            let mut right_path = path;
            right_path.push(true);
            assign_codes(right, right_path, codes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_for(text: &str) -> (FrequencyTable, CodeTable) {
        let freqs = FrequencyTable::from_text(text);
        let tree = HuffmanTree::build(&freqs).unwrap();
        (freqs, CodeTable::generate(&tree))
    }

    #[test]
    fn most_frequent_symbol_gets_shortest_code() {
        let (_, table) = table_for("aabbbcc");
        assert_eq!(table.get('b').unwrap().to_string(), "0");
        assert_eq!(table.get('a').unwrap().to_string(), "10");
        assert_eq!(table.get('c').unwrap().to_string(), "11");
        assert!(table.is_prefix_free());
    }

    #[test]
    fn single_symbol_gets_one_bit() {
        let (freqs, table) = table_for("aaaa");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get('a').unwrap().to_string(), "0");
        assert_eq!(table.encoded_bits(&freqs), 4);
    }

    #[test]
    fn every_symbol_has_a_code() {
        let text = "It was the best of times, it was the worst of times.";
        let (freqs, table) = table_for(text);
        assert_eq!(table.len(), freqs.len());
        assert!(table.iter().all(|(_, code)| !code.is_empty()));
        assert!(table.is_prefix_free());
    }

    #[test]
    fn prefix_detection() {
        let short = Code::from(vec![true, false]);
        let long = Code::from(vec![true, false, true]);
        assert!(short.is_prefix_of(&long));
        assert!(!long.is_prefix_of(&short));

        let mut codes = BTreeMap::new();
        codes.insert('x', short);
        codes.insert('y', long);
        assert!(!CodeTable { codes }.is_prefix_free());
    }

    #[test]
    fn average_length_is_weighted() {
        let (freqs, table) = table_for("aabbbcc");
        // 2*2 + 3*1 + 2*2 = 11 bits over 7 symbols
        assert_eq!(table.encoded_bits(&freqs), 11);
        assert!((table.average_length(&freqs) - 11.0 / 7.0).abs() < 1e-9);
        assert_eq!(table.average_length(&FrequencyTable::new()), 0.0);
    }
}
