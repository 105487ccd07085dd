//! Command definitions
//!
//! Represents the requests this tool sends to the server.

use std::fmt;

use bytes::Bytes;

/// A request to send to the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Per-slab-class item counters
    StatsItems,

    /// Per-slab-class sizing figures plus server-global totals
    StatsSlabs,

    /// Enumerate up to `count` live keys of one slab class
    CacheDump { bucket: u32, count: u64 },

    /// Fetch one value; the key is sent byte for byte
    Get { key: Bytes },
}

impl Command {
    /// Name used in error messages about this command's response
    pub fn name(&self) -> &'static str {
        match self {
            Command::StatsItems => "stats items",
            Command::StatsSlabs => "stats slabs",
            Command::CacheDump { .. } => "stats cachedump",
            Command::Get { .. } => "get",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::StatsItems => f.write_str("stats items"),
            Command::StatsSlabs => f.write_str("stats slabs"),
            Command::CacheDump { bucket, count } => {
                write!(f, "stats cachedump {} {}", bucket, count)
            }
            Command::Get { key } => write!(f, "get {}", String::from_utf8_lossy(key)),
        }
    }
}
