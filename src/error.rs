//! Error types for the Huffman coding engine and its I/O collaborators.

use thiserror::Error;

/// Error variants for coding, decoding and persistence.
#[derive(Debug, Error)]
pub enum CodecError {
    /// `extract_min` was called on an empty priority queue.
    #[error("priority queue is empty")]
    EmptyQueue,

    /// A tree was requested for an input with no symbols.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// The symbol has no entry in the code table.
    #[error("symbol {0:?} has no code in the table")]
    UnknownSymbol(char),

    /// The bit stream ended part way through a code.
    #[error("bit stream ended inside a code after {consumed} bits")]
    TruncatedInput { consumed: u64 },

    /// The recorded bit length is larger than the buffer can hold.
    #[error("bit length {bit_len} exceeds the {available} bits in the buffer")]
    BitLengthOverflow { bit_len: u64, available: u64 },

    /// Decoded text has a different length than the archive recorded.
    #[error("decoded {actual} symbols but the archive records {expected}")]
    SymbolCountMismatch { expected: u64, actual: u64 },

    /// Decoded text does not match the checksum stored with it.
    #[error("checksum mismatch: archive is corrupt or was built from other text")]
    ChecksumMismatch,

    /// The archive was written by an incompatible format revision.
    #[error("unsupported archive version {0}")]
    UnsupportedVersion(u32),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] bincode::Error),
}

/// A specialized Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
