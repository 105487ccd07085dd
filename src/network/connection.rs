//! Connection Handler
//!
//! One persistent, exclusively owned connection to the server. Responses are
//! line framed except for `get` payloads, which are framed by the length the
//! server declares, so the connection exposes both primitives.

use std::io::{BufRead, BufReader, ErrorKind, Read, Write};

use bytes::Bytes;

use crate::error::Result;
use crate::protocol::{encode_command, is_end, Command};

/// A connection to a memcached server over any byte stream
pub struct Connection<S> {
    /// Stream reader (buffered; writes bypass the buffer via `get_mut`)
    reader: BufReader<S>,

    /// Peer address for logging
    peer_addr: String,
}

impl<S: Read + Write> Connection<S> {
    /// Wrap an established stream
    pub fn new(stream: S) -> Self {
        Self::with_peer(stream, "unknown")
    }

    /// Wrap an established stream, remembering the peer for logging
    pub fn with_peer(stream: S, peer_addr: impl Into<String>) -> Self {
        Self {
            reader: BufReader::new(stream),
            peer_addr: peer_addr.into(),
        }
    }

    /// Send one command and flush it
    pub fn send(&mut self, command: &Command) -> Result<()> {
        tracing::debug!("Sending `{}` to {}", command, self.peer_addr);

        let bytes = encode_command(command);
        let stream = self.reader.get_mut();
        stream.write_all(&bytes)?;
        stream.flush()?;
        Ok(())
    }

    /// Read one raw line, without its `\n` or `\r\n` terminator
    ///
    /// The bytes are returned untouched; keys in cache dumps need not be UTF-8.
    ///
    /// End of stream before any byte of the line is an `UnexpectedEof`
    /// error: every response this tool waits for ends with `END`.
    pub fn read_line(&mut self) -> Result<Bytes> {
        let mut buf = Vec::new();
        let n = self.reader.read_until(b'\n', &mut buf)?;
        if n == 0 {
            return Err(std::io::Error::new(
                ErrorKind::UnexpectedEof,
                format!("connection closed by {}", self.peer_addr),
            )
            .into());
        }

        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }

        let line = Bytes::from(buf);
        tracing::trace!("Received from {}: {:?}", self.peer_addr, line);
        Ok(line)
    }

    /// Read exactly `len` raw bytes, ignoring any line structure inside them
    ///
    /// The length comes from the server, so the buffer grows with the bytes
    /// actually received instead of being allocated up front.
    pub fn read_exact_bytes(&mut self, len: usize) -> Result<Bytes> {
        let mut payload = Vec::new();
        let n = (&mut self.reader).take(len as u64).read_to_end(&mut payload)?;
        if n != len {
            return Err(std::io::Error::new(
                ErrorKind::UnexpectedEof,
                format!(
                    "connection closed by {} after {} of {} payload bytes",
                    self.peer_addr, n, len
                ),
            )
            .into());
        }
        Ok(Bytes::from(payload))
    }

    /// Resynchronize to the next line boundary after a raw read
    ///
    /// The protocol puts exactly CRLF after a payload; anything else up to
    /// the next newline is discarded.
    pub fn skip_line_end(&mut self) -> Result<()> {
        let rest = self.read_line()?;
        if !rest.is_empty() {
            tracing::warn!(
                "Discarding {} unexpected bytes after payload from {}",
                rest.len(),
                self.peer_addr
            );
        }
        Ok(())
    }

    /// Read lines until the `END` terminator, handing each data line to `f`
    ///
    /// `f` also gets the connection so it can switch to raw reads mid-response.
    pub fn read_until_end<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(&mut Self, &[u8]) -> Result<()>,
    {
        loop {
            let line = self.read_line()?;
            if is_end(&line) {
                return Ok(());
            }
            f(self, &line)?;
        }
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }

    /// Get a reference to the underlying stream
    pub fn get_ref(&self) -> &S {
        self.reader.get_ref()
    }
}
