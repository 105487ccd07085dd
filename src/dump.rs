//! Cache content dump
//!
//! Walks every live key the server will enumerate and writes it out as a
//! replayable `add` command followed by its raw value.
//!
//! ## Walk
//! 1. `stats items` gives the item count of each bucket (slab class)
//! 2. `stats cachedump <bucket> <count>` lists the keys and expiries of a bucket
//! 3. `get <key>` fetches each value; the payload is read by its declared length
//!
//! Buckets are visited in ascending id order and keys within a bucket in
//! ascending key order. Any failure aborts the whole walk.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use bytes::Bytes;

use crate::error::Result;
use crate::network::Connection;
use crate::protocol::{
    decode_cachedump_item, decode_items_stat, decode_value_header, parse_u64, Command,
};

/// Substring identifying the per-bucket item count lines of `stats items`
const ITEM_COUNT_MARKER: &[u8] = b":number ";

/// One key as it is being dumped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpedItem {
    pub bucket_id: u32,

    /// Key exactly as the server listed it
    pub key: Bytes,

    /// Expiry as reported by the cache dump (server-relative)
    pub expiry: i64,

    /// Opaque client flags, echoed verbatim
    pub flags: Bytes,

    /// Exactly the bytes the server declared
    pub value: Bytes,
}

impl DumpedItem {
    /// Write the two-line reconstruction: `add <key> <flags> <expiry> <length>`
    /// then the raw value, each CRLF terminated
    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        out.write_all(b"add ")?;
        out.write_all(&self.key)?;
        out.write_all(b" ")?;
        out.write_all(&self.flags)?;
        write!(out, " {} {}\r\n", self.expiry, self.value.len())?;
        out.write_all(&self.value)?;
        out.write_all(b"\r\n")
    }
}

/// Outcome of a completed dump
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DumpSummary {
    /// Buckets announced by `stats items`
    pub buckets: usize,

    /// Total item count announced by `stats items`
    pub announced_items: u64,

    /// Keys actually written out
    pub dumped_items: u64,
}

/// Dump every reachable key over `conn`
///
/// Reconstructions go to `items`; progress lines go to `diag`.
pub fn dump<S, W, D>(conn: &mut Connection<S>, items: &mut W, diag: &mut D) -> Result<DumpSummary>
where
    S: Read + Write,
    W: Write,
    D: Write,
{
    let buckets = bucket_counts(conn)?;
    let announced_items: u64 = buckets.values().sum();

    writeln!(diag, "Dumping memcache contents")?;
    writeln!(diag, "  Number of buckets: {}", buckets.len())?;
    writeln!(diag, "  Number of items  : {}", announced_items)?;

    let mut summary = DumpSummary {
        buckets: buckets.len(),
        announced_items,
        dumped_items: 0,
    };

    for (&bucket, &count) in &buckets {
        writeln!(diag, "Dumping bucket {} - {} total items", bucket, count)?;

        let keys = bucket_keys(conn, bucket, count)?;
        tracing::debug!("bucket {}: {} keys listed", bucket, keys.len());

        for (key, expiry) in keys {
            summary.dumped_items += fetch_and_emit(conn, bucket, key, expiry, items)?;
        }
    }

    items.flush()?;
    tracing::info!(
        "Dumped {} of {} announced items from {} buckets",
        summary.dumped_items,
        summary.announced_items,
        summary.buckets
    );
    Ok(summary)
}

/// Step 1: bucket id -> item count
fn bucket_counts<S: Read + Write>(conn: &mut Connection<S>) -> Result<BTreeMap<u32, u64>> {
    let mut buckets = BTreeMap::new();

    conn.send(&Command::StatsItems)?;
    conn.read_until_end(|_, line| {
        if !contains(line, ITEM_COUNT_MARKER) {
            return Ok(());
        }
        let entry = decode_items_stat(line)?;
        buckets.insert(entry.slab_id, parse_u64("item count", entry.value)?);
        Ok(())
    })?;

    Ok(buckets)
}

/// Step 2: key -> expiry for one bucket (last write wins on duplicates)
fn bucket_keys<S: Read + Write>(
    conn: &mut Connection<S>,
    bucket: u32,
    count: u64,
) -> Result<BTreeMap<Bytes, i64>> {
    let mut keys = BTreeMap::new();

    conn.send(&Command::CacheDump { bucket, count })?;
    conn.read_until_end(|_, line| {
        let Some(item) = decode_cachedump_item(line) else {
            return Ok(());
        };
        let expiry = std::str::from_utf8(item.expiry)
            .ok()
            .and_then(|s| s.parse::<i64>().ok());
        match expiry {
            Some(expiry) => {
                keys.insert(Bytes::copy_from_slice(item.key), expiry);
            }
            None => tracing::warn!(
                "Skipping cache dump line with bad expiry: {}",
                String::from_utf8_lossy(line)
            ),
        }
        Ok(())
    })?;

    Ok(keys)
}

/// Step 3: fetch one key and write its reconstruction; returns keys written
fn fetch_and_emit<S, W>(
    conn: &mut Connection<S>,
    bucket_id: u32,
    key: Bytes,
    expiry: i64,
    items: &mut W,
) -> Result<u64>
where
    S: Read + Write,
    W: Write,
{
    let mut written = 0;

    conn.send(&Command::Get { key: key.clone() })?;
    conn.read_until_end(|conn, line| {
        let Some(header) = decode_value_header(line)? else {
            return Ok(());
        };

        let value = conn.read_exact_bytes(header.length)?;
        conn.skip_line_end()?;

        let item = DumpedItem {
            bucket_id,
            key: key.clone(),
            expiry,
            flags: header.flags,
            value,
        };
        item.write_to(&mut *items)?;
        written += 1;
        Ok(())
    })?;

    if written == 0 {
        tracing::debug!(
            "Key {} vanished before it could be fetched",
            String::from_utf8_lossy(&key)
        );
    }
    Ok(written)
}

fn contains(line: &[u8], needle: &[u8]) -> bool {
    line.windows(needle.len()).any(|window| window == needle)
}
