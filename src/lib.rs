//! # memdtool
//!
//! A diagnostic client for memcached that:
//! - Tabulates slab-class occupancy and eviction statistics
//! - Dumps every live key as replayable `add` commands
//! - Talks plain text protocol over TCP or a Unix domain socket
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         CLI                                  │
//! │             (address + display|dump, exit codes)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │    Stats    │          │    Dump     │
//!   │  Collector  │          │   Walker    │
//!   └──────┬──────┘          └──────┬──────┘
//!          │                        │
//!          ▼                        │
//!   ┌─────────────┐                 │
//!   │   Display   │                 │
//!   │   (table)   │                 │
//!   └─────────────┘                 │
//!          ┌────────────────────────┘
//!          ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │        Connection (lines + exact-length payloads)            │
//! └─────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod stats;
pub mod dump;
pub mod display;
pub mod cli;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ToolError, Result};
pub use config::{Config, Mode};
pub use stats::{collect, SlabRecord};
pub use dump::{dump, DumpSummary, DumpedItem};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of memdtool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
