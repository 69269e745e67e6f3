use std::io::{self, Write};

use crate::code_table::CodeTable;
use crate::codec::CodecStats;
use crate::frequency::FrequencyTable;
use crate::store::Archive;

/// One line per symbol. Whitespace and control characters are escaped.
pub fn write_code_table<W: Write>(out: &mut W, table: &CodeTable, frequencies: &FrequencyTable) -> io::Result<()> {
    for (symbol, code) in table.iter() {
        let count = frequencies.get(symbol).unwrap_or(0);
        writeln!(out, "Symbol: {:<8} Count: {:<8} Code: {}", format!("{symbol:?}"), count, code)?;
    }
    Ok(())
}

pub fn write_stats<W: Write>(out: &mut W, stats: &CodecStats) -> io::Result<()> {
    writeln!(out, "symbols:        {}", stats.symbols)?;
    writeln!(out, "distinct:       {}", stats.distinct)?;
    writeln!(out, "tree depth:     {}", stats.tree_depth)?;
    writeln!(out, "avg code len:   {:.3} bits", stats.average_code_len)?;
    writeln!(
        out,
        "encoded:        {} bits in {} ({} padding bits)",
        stats.encoded_bits,
        format_bytes(stats.encoded_bytes),
        stats.padding_bits
    )?;
    writeln!(out, "vs 8-bit chars: {:.1}%", stats.ratio * 100.0)?;
    Ok(())
}

pub fn write_archive_info<W: Write>(out: &mut W, archive: &Archive) -> io::Result<()> {
    writeln!(out, "version:        {}", archive.version)?;
    writeln!(out, "created:        {}", archive.created_at)?;
    writeln!(out, "symbols:        {}", archive.symbol_count)?;
    writeln!(out, "distinct:       {}", archive.frequencies.len())?;
    writeln!(out, "payload:        {} bits in {}", archive.bit_len, format_bytes(archive.payload.len()))?;
    writeln!(out, "sha256:         {}", hex(&archive.checksum))?;
    Ok(())
}

/// Format bytes into human-readable string (e.g. 1024 -> "1.00 KB")
pub fn format_bytes(bytes: usize) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", size, UNITS[unit])
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
