//! Protocol codec
//!
//! Encoding of requests and decoding of individual response lines.
//!
//! The decoders work on one raw line at a time, with the line terminator
//! already stripped. Keys are opaque bytes and are never re-encoded; only
//! markers and numeric fields are interpreted as text. Each response grammar
//! has its own strictness:
//! - `stats items`: every data line must be `<marker> items:<id>:<name> <value>`
//! - `stats slabs`: three fields are required, but a middle field that is not
//!   `<id>:<name>` belongs to a server-global line and is skipped
//! - `stats cachedump`: anything that is not a six-field `ITEM` line is noise
//! - `get`: anything that is not a four-field `VALUE` line is noise

use bytes::Bytes;

use crate::error::{Result, ToolError};
use super::{CacheDumpItem, Command, StatEntry, ValueHeader};

/// Line that ends every multi-line response
pub const TERMINATOR: &str = "END";

// =============================================================================
// Request Encoding
// =============================================================================

/// Encode a command to bytes
///
/// Format: command text + CRLF. `get` keys are copied byte for byte.
pub fn encode_command(command: &Command) -> Vec<u8> {
    let mut message = match command {
        Command::Get { key } => {
            let mut message = Vec::with_capacity(4 + key.len() + 2);
            message.extend_from_slice(b"get ");
            message.extend_from_slice(key);
            message
        }
        other => other.to_string().into_bytes(),
    };
    message.extend_from_slice(b"\r\n");
    message
}

// =============================================================================
// Response Line Decoding
// =============================================================================

/// Whether a line terminates a multi-line response
pub fn is_end<L: AsRef<[u8]> + ?Sized>(line: &L) -> bool {
    line.as_ref() == TERMINATOR.as_bytes()
}

/// Decode a `stats items` data line
///
/// Fails on any line that is not three whitespace-separated fields whose
/// middle field has exactly three colon-separated parts.
pub fn decode_items_stat<L: AsRef<[u8]> + ?Sized>(line: &L) -> Result<StatEntry<'_>> {
    let command = Command::StatsItems.name();
    let text = stat_text(command, line.as_ref())?;

    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() != 3 {
        return Err(ToolError::strange(command, text));
    }

    let parts: Vec<&str> = fields[1].split(':').collect();
    if parts.len() != 3 {
        return Err(ToolError::strange(command, text));
    }

    Ok(StatEntry {
        slab_id: parse_slab_id(parts[1])?,
        name: parts[2],
        value: fields[2],
    })
}

/// Decode a `stats slabs` data line
///
/// Returns `Ok(None)` for lines whose middle field is not `<id>:<name>`,
/// such as `STAT active_slabs 3`. A wrong field count is still fatal.
pub fn decode_slabs_stat<L: AsRef<[u8]> + ?Sized>(line: &L) -> Result<Option<StatEntry<'_>>> {
    let command = Command::StatsSlabs.name();
    let text = stat_text(command, line.as_ref())?;

    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() != 3 {
        return Err(ToolError::strange(command, text));
    }

    let parts: Vec<&str> = fields[1].split(':').collect();
    if parts.len() != 2 {
        return Ok(None);
    }

    Ok(Some(StatEntry {
        slab_id: parse_slab_id(parts[0])?,
        name: parts[1],
        value: fields[2],
    }))
}

/// Decode a `stats cachedump` line
///
/// Expected shape: `ITEM <key> [<size> b; <expiry> s]`. Busy and error
/// markers the server may interleave decode to `None`.
pub fn decode_cachedump_item<L: AsRef<[u8]> + ?Sized>(line: &L) -> Option<CacheDumpItem<'_>> {
    let fields = split_fields(line.as_ref());
    if fields.len() != 6 || fields[0] != b"ITEM" {
        return None;
    }

    Some(CacheDumpItem {
        key: fields[1],
        expiry: fields[4],
    })
}

/// Decode a `get` response header line
///
/// Returns `Ok(None)` for anything that is not `VALUE <key> <flags> <bytes>`.
/// A header whose byte count is not an integer is fatal: the payload cannot
/// be delimited without it.
pub fn decode_value_header<L: AsRef<[u8]> + ?Sized>(line: &L) -> Result<Option<ValueHeader>> {
    let fields = split_fields(line.as_ref());
    if fields.len() != 4 || fields[0] != b"VALUE" {
        return Ok(None);
    }

    let length = std::str::from_utf8(fields[3])
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or_else(|| ToolError::Value {
            field: "value length",
            value: String::from_utf8_lossy(fields[3]).into_owned(),
        })?;

    Ok(Some(ValueHeader {
        key: Bytes::copy_from_slice(fields[1]),
        flags: Bytes::copy_from_slice(fields[2]),
        length,
    }))
}

/// Parse a non-negative integer counter
pub fn parse_u64(field: &'static str, value: &str) -> Result<u64> {
    value.parse::<u64>().map_err(|_| ToolError::Value {
        field,
        value: value.to_string(),
    })
}

/// Stats lines are plain ASCII; anything else is a malformed line
fn stat_text<'a>(command: &str, line: &'a [u8]) -> Result<&'a str> {
    std::str::from_utf8(line)
        .map_err(|_| ToolError::strange(command, &String::from_utf8_lossy(line)))
}

/// Split on ASCII whitespace, dropping empty fields
fn split_fields(line: &[u8]) -> Vec<&[u8]> {
    line.split(|b| b.is_ascii_whitespace())
        .filter(|field| !field.is_empty())
        .collect()
}

fn parse_slab_id(token: &str) -> Result<u32> {
    token.parse::<u32>().map_err(|_| ToolError::Value {
        field: "slab id",
        value: token.to_string(),
    })
}
