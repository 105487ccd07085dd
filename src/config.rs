//! Configuration for memdtool
//!
//! Centralized configuration with sensible defaults.

use std::fmt;
use std::str::FromStr;

/// Address used when none is given on the command line
pub const DEFAULT_ADDR: &str = "127.0.0.1:11211";

/// Main configuration for one memdtool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Server address: `host:port` for TCP, or a filesystem path (anything
    /// containing `/`) for a Unix domain socket
    pub addr: String,

    // -------------------------------------------------------------------------
    // Mode Configuration
    // -------------------------------------------------------------------------
    /// Which operation to run against the server
    pub mode: Mode,
}

/// Operation selected for an invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Render the slab statistics table
    #[default]
    Display,

    /// Reconstruct every live key as replayable `add` commands
    Dump,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "display" => Ok(Mode::Display),
            "dump" => Ok(Mode::Dump),
            other => Err(format!("unknown mode: {}", other)),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Display => f.write_str("display"),
            Mode::Dump => f.write_str("dump"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            mode: Mode::Display,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the server address
    pub fn addr(mut self, addr: impl Into<String>) -> Self {
        self.config.addr = addr.into();
        self
    }

    /// Set the mode
    pub fn mode(mut self, mode: Mode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
