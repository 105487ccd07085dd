//! Slab statistics collection
//!
//! Merges the `stats items` and `stats slabs` responses into one record per
//! slab class.

use std::collections::HashMap;
use std::io::{Read, Write};

use crate::error::Result;
use crate::network::Connection;
use crate::protocol::{
    decode_items_stat, decode_slabs_stat, parse_u64, Command, SlabField, StatEntry,
};

/// Occupancy and eviction figures for one slab class
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlabRecord {
    pub id: u32,

    // -------------------------------------------------------------------------
    // From `stats items`
    // -------------------------------------------------------------------------
    pub item_count: u64,
    pub age: u64,
    pub evicted: u64,
    pub evicted_nonzero: u64,
    pub evicted_time: u64,
    pub out_of_memory: u64,
    pub reclaimed: u64,

    // -------------------------------------------------------------------------
    // From `stats slabs`
    // -------------------------------------------------------------------------
    pub chunk_size: u64,
    pub chunks_per_page: u64,
    pub total_pages: u64,
    pub total_chunks: u64,
    pub used_chunks: u64,
    pub free_chunks: u64,
    pub free_chunks_end: u64,
}

impl SlabRecord {
    /// Create an empty record for a slab class
    pub fn new(id: u32) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Store one figure
    pub fn set(&mut self, field: SlabField, value: u64) {
        let slot = match field {
            SlabField::ItemCount => &mut self.item_count,
            SlabField::Age => &mut self.age,
            SlabField::Evicted => &mut self.evicted,
            SlabField::EvictedNonzero => &mut self.evicted_nonzero,
            SlabField::EvictedTime => &mut self.evicted_time,
            SlabField::OutOfMemory => &mut self.out_of_memory,
            SlabField::Reclaimed => &mut self.reclaimed,
            SlabField::ChunkSize => &mut self.chunk_size,
            SlabField::ChunksPerPage => &mut self.chunks_per_page,
            SlabField::TotalPages => &mut self.total_pages,
            SlabField::TotalChunks => &mut self.total_chunks,
            SlabField::UsedChunks => &mut self.used_chunks,
            SlabField::FreeChunks => &mut self.free_chunks,
            SlabField::FreeChunksEnd => &mut self.free_chunks_end,
        };
        *slot = value;
    }

    /// Whether the slab class has no free chunk left at the end of its pages
    pub fn is_full(&self) -> bool {
        self.free_chunks_end == 0
    }
}

/// Id-keyed record store shared by both phases
#[derive(Debug, Default)]
struct RecordStore {
    records: HashMap<u32, SlabRecord>,
}

impl RecordStore {
    /// Apply one entry; names outside the field table are ignored
    fn apply(
        &mut self,
        entry: StatEntry<'_>,
        lookup: fn(&str) -> Option<SlabField>,
    ) -> Result<()> {
        // Every sighting creates the record, even for ignored fields
        let record = self
            .records
            .entry(entry.slab_id)
            .or_insert_with(|| SlabRecord::new(entry.slab_id));

        if let Some(field) = lookup(entry.name) {
            record.set(field, parse_u64(field.wire_name(), entry.value)?);
        }
        Ok(())
    }

    /// Records in ascending id order
    fn into_sorted(self) -> Vec<SlabRecord> {
        let mut records: Vec<SlabRecord> = self.records.into_values().collect();
        records.sort_by_key(|r| r.id);
        records
    }
}

/// Gather per-slab-class statistics over `conn`
///
/// Sends `stats items` then `stats slabs` and merges both responses by slab
/// id. Records with no pages are kept; filtering is up to the renderer.
/// Any malformed `stats items` line aborts the whole collection.
pub fn collect<S: Read + Write>(conn: &mut Connection<S>) -> Result<Vec<SlabRecord>> {
    let mut store = RecordStore::default();

    // Phase 1: item counters, strict grammar
    conn.send(&Command::StatsItems)?;
    conn.read_until_end(|_, line| {
        let entry = decode_items_stat(line)?;
        store.apply(entry, SlabField::from_items_name)
    })?;
    tracing::debug!("stats items: {} slab classes", store.records.len());

    // Phase 2: sizing figures, global lines skipped
    conn.send(&Command::StatsSlabs)?;
    conn.read_until_end(|_, line| match decode_slabs_stat(line)? {
        Some(entry) => store.apply(entry, SlabField::from_slabs_name),
        None => Ok(()),
    })?;
    tracing::debug!("stats slabs: {} slab classes", store.records.len());

    Ok(store.into_sorted())
}
