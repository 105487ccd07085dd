//! Response line definitions
//!
//! Decoded forms of the response lines this tool understands. They borrow
//! from the line they were decoded from.

use bytes::Bytes;

/// One `STAT` line addressed to a slab class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatEntry<'a> {
    /// Slab class the line belongs to
    pub slab_id: u32,

    /// Field name (`number`, `chunk_size`, ...)
    pub name: &'a str,

    /// Raw value token, parsed only when the name is recognized
    pub value: &'a str,
}

/// One `ITEM <key> [<bytes> b; <expiry> s]` line of a cache dump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheDumpItem<'a> {
    /// Key exactly as the server sent it
    pub key: &'a [u8],

    /// Token in the expiry position of the bracketed annotation
    pub expiry: &'a [u8],
}

/// Header of a `get` hit: `VALUE <key> <flags> <bytes>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueHeader {
    pub key: Bytes,

    /// Opaque client flags, echoed back verbatim
    pub flags: Bytes,

    /// Exact number of raw bytes that follow the header line
    pub length: usize,
}
