use std::fmt::Write as _;

use crate::error::{CodecError, Result};
use crate::frequency::FrequencyTable;
use crate::min_heap::{MinHeap, Weighted};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        symbol: char,
        freq: u64,
    },
    Internal {
        freq: u64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn leaf(symbol: char, freq: u64) -> Self {
        HuffNode::Leaf { symbol, freq }
    }

    /// Joins two subtrees; `left` takes the 0 branch. Fails if the
    /// combined weight does not fit in a `u64`.
    pub fn merge(left: HuffNode, right: HuffNode) -> Result<Self> {
        let freq = left
            .freq()
            .checked_add(right.freq())
            .ok_or(CodecError::InvalidInput("frequency overflow"))?;
        Ok(HuffNode::Internal {
            freq,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn freq(&self) -> u64 {
        match self {
            HuffNode::Leaf { freq, .. } => *freq,
            HuffNode::Internal { freq, .. } => *freq,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }
}

impl Weighted for HuffNode {
    fn weight(&self) -> u64 {
        self.freq()
    }
}

/// A finished Huffman tree. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffNode,
}

impl HuffmanTree {
    /// Builds the tree by repeatedly merging the two lightest nodes.
    ///
    /// Leaves are queued in ascending symbol order and the queue breaks
    /// ties by insertion order, so the same table always gives the same
    /// tree. A one-symbol table gives a tree that is a single leaf.
    pub fn build(frequencies: &FrequencyTable) -> Result<Self> {
        if frequencies.is_empty() {
            return Err(CodecError::InvalidInput("cannot build a tree from an empty frequency table"));
        }

        let entries = frequencies.iter_sorted();
        let mut heap = MinHeap::with_capacity(entries.len());
        for (symbol, count) in entries {
            heap.insert(HuffNode::leaf(symbol, count));
        }

        while heap.len() > 1 {
            let left = heap.extract_min()?;
            let right = heap.extract_min()?;
            heap.insert(HuffNode::merge(left, right)?);
        }

        let root = heap.extract_min()?;
        tracing::debug!(symbols = frequencies.len(), weight = root.freq(), "huffman tree built");
        Ok(HuffmanTree { root })
    }

    pub fn root(&self) -> &HuffNode {
        &self.root
    }

    /// Root frequency, equal to the length of the input.
    pub fn total(&self) -> u64 {
        self.root.freq()
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_frequencies().len()
    }

    /// Length of the longest root-to-leaf path. A single-leaf tree has depth 0.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(&self.root, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                HuffNode::Leaf { .. } => deepest = deepest.max(depth),
                HuffNode::Internal { left, right, .. } => {
                    stack.push((left, depth + 1));
                    stack.push((right, depth + 1));
                }
            }
        }
        deepest
    }

    /// Every leaf's (symbol, frequency), left to right.
    pub fn leaf_frequencies(&self) -> Vec<(char, u64)> {
        let mut out = Vec::new();
        collect_leaves(&self.root, &mut out);
        out
    }

    /// Indented outline of the tree, one node per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        render_node(&self.root, 0, "root", &mut out);
        out
    }
}

fn collect_leaves(node: &HuffNode, out: &mut Vec<(char, u64)>) {
    match node {
        HuffNode::Leaf { symbol, freq } => out.push((*symbol, *freq)),
        HuffNode::Internal { left, right, .. } => {
            collect_leaves(left, out);
            collect_leaves(right, out);
        }
    }
}

fn render_node(node: &HuffNode, depth: usize, label: &str, out: &mut String) {
    let indent = "  ".repeat(depth);
    match node {
        HuffNode::Leaf { symbol, freq } => {
            let _ = writeln!(out, "{indent}{label} -> leaf {symbol:?} [weight: {freq}]");
        }
        HuffNode::Internal { freq, left, right } => {
            let _ = writeln!(out, "{indent}{label} -> internal [weight: {freq}]");
            render_node(left, depth + 1, "0", out);
            render_node(right, depth + 1, "1", out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_is_rejected() {
        let err = HuffmanTree::build(&FrequencyTable::new()).unwrap_err();
        assert!(matches!(err, CodecError::InvalidInput(_)));
    }

    #[test]
    fn single_symbol_is_a_lone_leaf() {
        let tree = HuffmanTree::build(&FrequencyTable::from_text("aaaa")).unwrap();
        assert_eq!(tree.root(), &HuffNode::leaf('a', 4));
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.leaf_count(), 1);
    }

    #[test]
    fn merges_lightest_first() {
        let tree = HuffmanTree::build(&FrequencyTable::from_text("aabbbcc")).unwrap();
        let expected = HuffNode::merge(
            HuffNode::leaf('b', 3),
            HuffNode::merge(HuffNode::leaf('a', 2), HuffNode::leaf('c', 2)).unwrap(),
        )
        .unwrap();
        assert_eq!(tree.root(), &expected);
        assert_eq!(tree.total(), 7);
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn merge_rejects_overflowing_weights() {
        let err = HuffNode::merge(HuffNode::leaf('a', u64::MAX), HuffNode::leaf('b', 1)).unwrap_err();
        assert!(matches!(err, CodecError::InvalidInput("frequency overflow")));
    }

    #[test]
    fn builds_at_the_weight_limit() {
        let table = FrequencyTable::from_pairs([('a', u64::MAX - 1), ('b', 1)]).unwrap();
        let tree = HuffmanTree::build(&table).unwrap();
        assert_eq!(tree.total(), u64::MAX);
    }

    #[test]
    fn frequencies_are_conserved() {
        let text = "the quick brown fox jumps over the lazy dog";
        let table = FrequencyTable::from_text(text);
        let tree = HuffmanTree::build(&table).unwrap();

        let leaves = tree.leaf_frequencies();
        assert_eq!(leaves.len(), table.len());
        assert_eq!(leaves.iter().map(|&(_, f)| f).sum::<u64>(), text.chars().count() as u64);
        assert_eq!(tree.total(), text.chars().count() as u64);
        for (symbol, freq) in leaves {
            assert_eq!(table.get(symbol), Some(freq));
        }
    }

    #[test]
    fn build_is_deterministic() {
        let table = FrequencyTable::from_text("abcdefabcdeaabbz");
        let first = HuffmanTree::build(&table).unwrap();
        for _ in 0..10 {
            assert_eq!(HuffmanTree::build(&table.clone()).unwrap(), first);
        }
    }

    #[test]
    fn render_lists_every_node() {
        let tree = HuffmanTree::build(&FrequencyTable::from_text("aab")).unwrap();
        let text = tree.render();
        assert_eq!(text.lines().count(), 3);
        assert!(text.starts_with("root -> internal [weight: 3]"));
        assert!(text.contains("0 -> leaf 'b' [weight: 1]"));
        assert!(text.contains("1 -> leaf 'a' [weight: 2]"));
    }
}
