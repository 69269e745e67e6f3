// src/commands.rs

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::bits::EncodedBuffer;
use crate::codec::HuffmanCodec;
use crate::{report, source, store};

fn load_text(input: &str) -> Result<String> {
    let source = source::from_arg(input);
    let text = source
        .fetch()
        .with_context(|| format!("failed to read input {}", source.describe()))?;
    tracing::info!(source = %source.describe(), chars = text.chars().count(), "input loaded");
    Ok(text)
}

/// Encode, persist the raw bytes, read them back and decode with the
/// in-memory tree and the exact bit length.
pub fn run_pipeline<W: Write>(out: &mut W, input: &str, output: &Path, stats: bool) -> Result<()> {
    let text = load_text(input)?;
    let codec = HuffmanCodec::from_text(&text).context("cannot build a code for this input")?;

    report::write_code_table(out, codec.code_table(), codec.frequencies())?;

    let buffer = codec.encode(&text)?;
    store::write_raw(output, &buffer.bytes)
        .with_context(|| format!("failed to write {}", output.display()))?;
    writeln!(out, "Text was encoded and saved in file: {}", output.display())?;

    let stored = store::read_raw(output).with_context(|| format!("failed to read {}", output.display()))?;
    let decoded = codec.decode(&EncodedBuffer::new(stored, buffer.bit_len))?;
    writeln!(out, "\nDecoded text:")?;
    writeln!(out, "{decoded}")?;

    if stats {
        writeln!(out)?;
        report::write_stats(out, &codec.stats(&text, &buffer))?;
    }
    if decoded != text {
        anyhow::bail!("decoded text differs from the input");
    }
    Ok(())
}

pub fn encode_to_archive<W: Write>(out: &mut W, input: &str, archive_path: &Path) -> Result<()> {
    let text = load_text(input)?;
    let codec = HuffmanCodec::from_text(&text).context("cannot build a code for this input")?;
    let buffer = codec.encode(&text)?;

    let archive = store::Archive::new(&codec, &text, &buffer);
    store::save_archive(archive_path, &archive)
        .with_context(|| format!("failed to save archive {}", archive_path.display()))?;

    writeln!(out, "Archive written: {}", archive_path.display())?;
    report::write_stats(out, &codec.stats(&text, &buffer))?;
    Ok(())
}

pub fn decode_archive<W: Write>(out: &mut W, archive_path: &Path, output: Option<&Path>) -> Result<()> {
    let archive = store::load_archive(archive_path)
        .with_context(|| format!("failed to load archive {}", archive_path.display()))?;
    let text = archive.decode().context("archive could not be decoded")?;

    match output {
        Some(path) => {
            fs::write(path, &text).with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "decoded text written");
        }
        None => out.write_all(text.as_bytes())?,
    }
    Ok(())
}

pub fn print_codes<W: Write>(out: &mut W, input: &str, show_tree: bool) -> Result<()> {
    let text = load_text(input)?;
    let codec = HuffmanCodec::from_text(&text).context("cannot build a code for this input")?;

    let buffer = codec.encode(&text)?;

    report::write_code_table(out, codec.code_table(), codec.frequencies())?;
    writeln!(out)?;
    report::write_stats(out, &codec.stats(&text, &buffer))?;
    if show_tree {
        writeln!(out)?;
        out.write_all(codec.tree().render().as_bytes())?;
    }
    Ok(())
}

pub fn inspect_archive<W: Write>(out: &mut W, archive_path: &Path) -> Result<()> {
    let archive = store::load_archive(archive_path)
        .with_context(|| format!("failed to load archive {}", archive_path.display()))?;
    report::write_archive_info(out, &archive)?;
    Ok(())
}
