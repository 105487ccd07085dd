//! Protocol Module
//!
//! The memcached text protocol, as far as this tool consumes it.
//!
//! ## Requests
//! Every request is one ASCII line terminated by CRLF:
//! - `stats items`
//! - `stats slabs`
//! - `stats cachedump <bucket> <count>`
//! - `get <key>`
//!
//! ## Responses
//! Newline-terminated text lines (CR optional), ending with a line that is
//! exactly `END`:
//! ```text
//! STAT items:1:number 1          <- stats items
//! STAT 1:chunk_size 96           <- stats slabs
//! STAT active_slabs 3            <- stats slabs (server-global, skipped)
//! ITEM piyo [1 b; 1483953061 s]  <- stats cachedump
//! VALUE piyo 0 6                 <- get, followed by 6 raw bytes + CRLF
//! END
//! ```

mod command;
mod field;
mod response;
mod codec;

pub use command::Command;
pub use field::{SlabField, ITEMS_FIELDS, SLABS_FIELDS};
pub use response::{CacheDumpItem, StatEntry, ValueHeader};
pub use codec::{
    encode_command, is_end, decode_items_stat, decode_slabs_stat,
    decode_cachedump_item, decode_value_header, parse_u64, TERMINATOR,
};
