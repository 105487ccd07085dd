//! Slab statistics table

use std::io::Write;

use crate::stats::SlabRecord;

/// Table header, matching the classic memcached-tool layout
pub const TABLE_HEADER: &str =
    "  #  Item_Size  Max_age   Pages   Count   Full?  Evicted Evict_Time OOM";

/// Human-readable chunk size: bytes up to 1024, then kibibytes
pub fn format_chunk_size(chunk_size: u64) -> String {
    if chunk_size > 1024 {
        format!("{:.1}K", chunk_size as f64 / 1024.0)
    } else {
        format!("{}B", chunk_size)
    }
}

/// Format one table row (without the trailing newline)
pub fn format_row(record: &SlabRecord) -> String {
    format!(
        "{:3} {:>8} {:9}s {:7} {:7} {:>7} {:8} {:8} {:4}",
        record.id,
        format_chunk_size(record.chunk_size),
        record.age,
        record.total_pages,
        record.item_count,
        if record.is_full() { "yes" } else { "no" },
        record.evicted,
        record.evicted_time,
        record.out_of_memory,
    )
}

/// Write the table; slab classes without pages are left out
pub fn render_table<W: Write>(records: &[SlabRecord], out: &mut W) -> std::io::Result<()> {
    writeln!(out, "{}", TABLE_HEADER)?;
    for record in records.iter().filter(|r| r.total_pages > 0) {
        writeln!(out, "{}", format_row(record))?;
    }
    out.flush()
}
