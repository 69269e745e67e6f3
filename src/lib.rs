//! # huffpack
//!
//! Huffman coding for text: symbol counting, tree construction, code
//! tables, MSB-first bit packing and tree-driven decoding.
//!
//! ```rust
//! use huffpack::HuffmanCodec;
//!
//! let codec = HuffmanCodec::from_text("aabbbcc")?;
//! let buffer = codec.encode("aabbbcc")?;
//! assert_eq!(buffer.bit_len, 11);
//! assert_eq!(codec.decode(&buffer)?, "aabbbcc");
//! # Ok::<(), huffpack::CodecError>(())
//! ```
//!
//! The packed bytes carry no length of their own. [`EncodedBuffer`] keeps
//! the exact bit count next to them, and [`store::Archive`] persists it.

pub mod bits;
pub mod code_table;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod frequency;
pub mod logger;
pub mod min_heap;
pub mod report;
pub mod source;
pub mod store;
pub mod tree;

pub use bits::EncodedBuffer;
pub use code_table::{Code, CodeTable};
pub use codec::{CodecStats, HuffmanCodec};
pub use error::{CodecError, Result};
pub use frequency::FrequencyTable;
pub use tree::{HuffNode, HuffmanTree};
