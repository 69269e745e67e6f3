use std::io::Cursor;

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};

use crate::code_table::CodeTable;
use crate::error::{CodecError, Result};
use crate::tree::{HuffNode, HuffmanTree};

/// Packed code bits, MSB first, with the exact count of meaningful bits.
///
/// The last byte is zero-padded on its low end. `bit_len` is what lets a
/// decoder tell padding apart from data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBuffer {
    pub bytes: Vec<u8>,
    pub bit_len: u64,
}

impl EncodedBuffer {
    pub fn new(bytes: Vec<u8>, bit_len: u64) -> Self {
        EncodedBuffer { bytes, bit_len }
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Zero bits appended to fill the final byte.
    pub fn padding_bits(&self) -> u64 {
        (self.bytes.len() as u64 * 8).saturating_sub(self.bit_len)
    }
}

/// Concatenates the code of every symbol and packs the bits 8 per byte.
pub fn encode(text: &str, table: &CodeTable) -> Result<EncodedBuffer> {
    let mut output = Vec::new();
    let mut bit_len = 0u64;
    {
        let mut writer = BitWriter::endian(&mut output, BigEndian);
        for symbol in text.chars() {
            let code = table.get(symbol).ok_or(CodecError::UnknownSymbol(symbol))?;
            for &bit in code.bits() {
                writer.write_bit(bit)?;
            }
            bit_len += code.len() as u64;
        }
        writer.byte_align()?;
    }
    tracing::trace!(bit_len, bytes = output.len(), "packed code bits");
    Ok(EncodedBuffer::new(output, bit_len))
}

/// Decodes exactly `buffer.bit_len` bits, ignoring the padding.
///
/// Fails with `TruncatedInput` if the last code is cut short, which means
/// the buffer does not belong to this tree.
pub fn decode(buffer: &EncodedBuffer, tree: &HuffmanTree) -> Result<String> {
    let available = buffer.bytes.len() as u64 * 8;
    if buffer.bit_len > available {
        return Err(CodecError::BitLengthOverflow {
            bit_len: buffer.bit_len,
            available,
        });
    }
    let (text, complete) = walk(&buffer.bytes, buffer.bit_len, tree)?;
    if !complete {
        return Err(CodecError::TruncatedInput {
            consumed: buffer.bit_len,
        });
    }
    Ok(text)
}

/// Decodes every bit of `bytes`, padding included.
///
/// With no bit length to stop at, padding that happens to spell a valid
/// code shows up as extra trailing symbols. A partial code at the end is
/// taken to be padding and dropped.
pub fn decode_padded(bytes: &[u8], tree: &HuffmanTree) -> Result<String> {
    let (text, _) = walk(bytes, bytes.len() as u64 * 8, tree)?;
    Ok(text)
}

/// Runs the tree automaton over the first `bits` bits. The flag reports
/// whether the walk ended back at the root.
fn walk(bytes: &[u8], bits: u64, tree: &HuffmanTree) -> Result<(String, bool)> {
    let mut reader = BitReader::endian(Cursor::new(bytes), BigEndian);
    let mut out = String::new();
    let root = tree.root();

    // A lone leaf has no edges, so each bit stands for one symbol.
    if let HuffNode::Leaf { symbol, .. } = root {
        for _ in 0..bits {
            reader.read_bit()?;
            out.push(*symbol);
        }
        return Ok((out, true));
    }

    let mut node = root;
    for _ in 0..bits {
        let bit = reader.read_bit()?;
        node = match node {
            HuffNode::Internal { left, right, .. } => {
                if bit {
                    &**right
                } else {
                    &**left
                }
            }
            HuffNode::Leaf { .. } => unreachable!("walk resets to the root after every leaf"),
        };
        if let HuffNode::Leaf { symbol, .. } = node {
            out.push(*symbol);
            node = root;
        }
    }
    Ok((out, std::ptr::eq(node, root)))
}
