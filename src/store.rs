// src/store.rs

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::bits::EncodedBuffer;
use crate::codec::HuffmanCodec;
use crate::error::{CodecError, Result};
use crate::frequency::FrequencyTable;

pub const ARCHIVE_VERSION: u32 = 1;
const TEMP_EXT: &str = "tmp"; // For atomic writes

/// Writes the packed bytes as-is, with no header.
pub fn write_raw(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "raw buffer written");
    Ok(())
}

pub fn read_raw(path: &Path) -> Result<Vec<u8>> {
    Ok(fs::read(path)?)
}

/// Everything needed to decode a buffer in a later run.
///
/// The tree is not stored: it is rebuilt from `frequencies`, which gives
/// the same codes because tree building is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Archive {
    pub version: u32,
    pub created_at: String,
    pub frequencies: Vec<(char, u64)>,
    pub bit_len: u64,
    pub symbol_count: u64,
    pub checksum: Vec<u8>,
    pub payload: Vec<u8>,
}

impl Archive {
    pub fn new(codec: &HuffmanCodec, text: &str, buffer: &EncodedBuffer) -> Self {
        Archive {
            version: ARCHIVE_VERSION,
            created_at: Utc::now().to_rfc3339(),
            frequencies: codec.frequencies().iter_sorted(),
            bit_len: buffer.bit_len,
            symbol_count: text.chars().count() as u64,
            checksum: text_hash(text),
            payload: buffer.bytes.clone(),
        }
    }

    pub fn buffer(&self) -> EncodedBuffer {
        EncodedBuffer::new(self.payload.clone(), self.bit_len)
    }

    pub fn codec(&self) -> Result<HuffmanCodec> {
        HuffmanCodec::from_frequencies(FrequencyTable::from_pairs(self.frequencies.iter().copied())?)
    }

    /// Rebuilds the codec, decodes the payload and checks the result.
    pub fn decode(&self) -> Result<String> {
        let text = self.codec()?.decode(&self.buffer())?;
        self.verify(&text)?;
        Ok(text)
    }

    /// Checks the symbol count first, then the SHA-256 checksum.
    pub fn verify(&self, text: &str) -> Result<()> {
        let actual = text.chars().count() as u64;
        if actual != self.symbol_count {
            return Err(CodecError::SymbolCountMismatch {
                expected: self.symbol_count,
                actual,
            });
        }
        if text_hash(text) != self.checksum {
            return Err(CodecError::ChecksumMismatch);
        }
        Ok(())
    }
}

fn text_hash(text: &str) -> Vec<u8> {
    Sha256::digest(text.as_bytes()).to_vec()
}

/// `notes.hpk` -> `notes.hpk.tmp`, so no sibling file is clobbered.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(TEMP_EXT);
    PathBuf::from(name)
}

/// Serializes the archive and swaps it into place through a temp file.
pub fn save_archive(path: &Path, archive: &Archive) -> Result<()> {
    let temp_path = temp_path_for(path);
    let data = bincode::serialize(archive)?;

    fs::write(&temp_path, &data)?;
    fs::rename(&temp_path, path)?;

    tracing::info!(path = %path.display(), bytes = data.len(), "archive saved");
    Ok(())
}

pub fn load_archive(path: &Path) -> Result<Archive> {
    let data = fs::read(path)?;
    let archive: Archive = bincode::deserialize(&data)?;
    if archive.version != ARCHIVE_VERSION {
        return Err(CodecError::UnsupportedVersion(archive.version));
    }
    Ok(archive)
}
