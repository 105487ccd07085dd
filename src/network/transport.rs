//! Transport selection
//!
//! An address containing a path separator names a Unix domain socket;
//! anything else is a TCP `host:port`.

use std::io::{self, Read, Write};
use std::net::TcpStream;
use std::path::PathBuf;

#[cfg(unix)]
use std::os::unix::net::UnixStream;

use crate::error::{Result, ToolError};
use super::Connection;

/// Where the server listens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// `host:port`
    Tcp(String),

    /// Filesystem path of a Unix domain socket
    Unix(PathBuf),
}

impl Endpoint {
    /// Select the transport by address syntax
    pub fn parse(addr: &str) -> Self {
        if addr.contains('/') {
            Endpoint::Unix(PathBuf::from(addr))
        } else {
            Endpoint::Tcp(addr.to_string())
        }
    }
}

/// An established byte stream of either kind
#[derive(Debug)]
pub enum Stream {
    Tcp(TcpStream),
    #[cfg(unix)]
    Unix(UnixStream),
}

impl Read for Stream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Stream::Tcp(s) => s.read(buf),
            #[cfg(unix)]
            Stream::Unix(s) => s.read(buf),
        }
    }
}

impl Write for Stream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Stream::Tcp(s) => s.write(buf),
            #[cfg(unix)]
            Stream::Unix(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Stream::Tcp(s) => s.flush(),
            #[cfg(unix)]
            Stream::Unix(s) => s.flush(),
        }
    }
}

/// Connect to the server at `addr`
pub fn connect(addr: &str) -> Result<Connection<Stream>> {
    let transport_err = |source| ToolError::Transport {
        addr: addr.to_string(),
        source,
    };

    match Endpoint::parse(addr) {
        Endpoint::Tcp(host_port) => {
            let stream = TcpStream::connect(&host_port).map_err(transport_err)?;
            // Disable Nagle's algorithm; every request is a tiny write
            stream.set_nodelay(true).map_err(transport_err)?;

            let peer_addr = stream
                .peer_addr()
                .map(|a| a.to_string())
                .unwrap_or_else(|_| host_port.clone());
            tracing::debug!("Connected to {} over TCP", peer_addr);
            Ok(Connection::with_peer(Stream::Tcp(stream), peer_addr))
        }
        #[cfg(unix)]
        Endpoint::Unix(path) => {
            let stream = UnixStream::connect(&path).map_err(transport_err)?;
            tracing::debug!("Connected to {} over Unix socket", path.display());
            Ok(Connection::with_peer(
                Stream::Unix(stream),
                path.display().to_string(),
            ))
        }
        #[cfg(not(unix))]
        Endpoint::Unix(_) => Err(transport_err(io::Error::new(
            io::ErrorKind::Unsupported,
            "Unix domain sockets are not supported on this platform",
        ))),
    }
}
