use crate::bits::{self, EncodedBuffer};
use crate::code_table::CodeTable;
use crate::error::Result;
use crate::frequency::FrequencyTable;
use crate::tree::HuffmanTree;

/// A tree together with the codes derived from it.
///
/// The codec is immutable once built, so one instance can encode and
/// decode any number of texts over the same alphabet.
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    frequencies: FrequencyTable,
    tree: HuffmanTree,
    table: CodeTable,
}

/// Summary numbers for one encoded text.
#[derive(Debug, Clone, PartialEq)]
pub struct CodecStats {
    pub symbols: u64,
    pub distinct: usize,
    pub encoded_bits: u64,
    pub encoded_bytes: usize,
    pub padding_bits: u64,
    pub average_code_len: f64,
    pub tree_depth: usize,
    /// Encoded size relative to eight bits per symbol.
    pub ratio: f64,
}

impl HuffmanCodec {
    pub fn from_text(text: &str) -> Result<Self> {
        let frequencies = FrequencyTable::from_text(text);
        tracing::debug!(chars = frequencies.total(), distinct = frequencies.len(), "counted symbols");
        Self::from_frequencies(frequencies)
    }

    pub fn from_frequencies(frequencies: FrequencyTable) -> Result<Self> {
        let tree = HuffmanTree::build(&frequencies)?;
        let table = CodeTable::generate(&tree);
        tracing::debug!(codes = table.len(), depth = tree.depth(), "code table generated");
        Ok(HuffmanCodec {
            frequencies,
            tree,
            table,
        })
    }

    pub fn encode(&self, text: &str) -> Result<EncodedBuffer> {
        let buffer = bits::encode(text, &self.table)?;
        tracing::info!(bits = buffer.bit_len, bytes = buffer.len(), "text encoded");
        Ok(buffer)
    }

    pub fn decode(&self, buffer: &EncodedBuffer) -> Result<String> {
        let text = bits::decode(buffer, &self.tree)?;
        tracing::info!(chars = text.chars().count(), "buffer decoded");
        Ok(text)
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn code_table(&self) -> &CodeTable {
        &self.table
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    pub fn stats(&self, text: &str, buffer: &EncodedBuffer) -> CodecStats {
        let symbols = text.chars().count() as u64;
        let ratio = if symbols == 0 {
            0.0
        } else {
            buffer.bit_len as f64 / (symbols * 8) as f64
        };
        CodecStats {
            symbols,
            distinct: self.table.len(),
            encoded_bits: buffer.bit_len,
            encoded_bytes: buffer.len(),
            padding_bits: buffer.padding_bits(),
            average_code_len: self.table.average_length(&self.frequencies),
            tree_depth: self.tree.depth(),
            ratio,
        }
    }
}
