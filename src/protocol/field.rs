//! Slab statistic field tags
//!
//! Both stats grammars share one tag vocabulary. Each grammar has its own
//! wire-name table; names absent from a table are ignored by the decoders'
//! callers so newer servers can add fields freely.

/// A per-slab-class figure this tool keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlabField {
    // `stats items`
    ItemCount,
    Age,
    Evicted,
    EvictedNonzero,
    EvictedTime,
    OutOfMemory,
    Reclaimed,

    // `stats slabs`
    ChunkSize,
    ChunksPerPage,
    TotalPages,
    TotalChunks,
    UsedChunks,
    FreeChunks,
    FreeChunksEnd,
}

/// Wire names carried by `stats items` (`STAT items:<id>:<name> <value>`)
pub const ITEMS_FIELDS: &[(&str, SlabField)] = &[
    ("number", SlabField::ItemCount),
    ("age", SlabField::Age),
    ("evicted", SlabField::Evicted),
    ("evicted_nonzero", SlabField::EvictedNonzero),
    ("evicted_time", SlabField::EvictedTime),
    ("outofmemory", SlabField::OutOfMemory),
    ("reclaimed", SlabField::Reclaimed),
];

/// Wire names carried by `stats slabs` (`STAT <id>:<name> <value>`)
pub const SLABS_FIELDS: &[(&str, SlabField)] = &[
    ("chunk_size", SlabField::ChunkSize),
    ("chunks_per_page", SlabField::ChunksPerPage),
    ("total_pages", SlabField::TotalPages),
    ("total_chunks", SlabField::TotalChunks),
    ("used_chunks", SlabField::UsedChunks),
    ("free_chunks", SlabField::FreeChunks),
    ("free_chunks_end", SlabField::FreeChunksEnd),
];

impl SlabField {
    /// Look up a `stats items` field name
    pub fn from_items_name(name: &str) -> Option<Self> {
        lookup(ITEMS_FIELDS, name)
    }

    /// Look up a `stats slabs` field name
    pub fn from_slabs_name(name: &str) -> Option<Self> {
        lookup(SLABS_FIELDS, name)
    }

    /// The wire name of this field
    pub fn wire_name(self) -> &'static str {
        ITEMS_FIELDS
            .iter()
            .chain(SLABS_FIELDS)
            .find(|(_, field)| *field == self)
            .map(|(name, _)| *name)
            .unwrap_or("unknown")
    }
}

fn lookup(table: &[(&str, SlabField)], name: &str) -> Option<SlabField> {
    table
        .iter()
        .find(|(wire, _)| *wire == name)
        .map(|(_, field)| *field)
}
