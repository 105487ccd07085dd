//! Network Module
//!
//! Client side of the connection to the cache server.
//!
//! ## Model
//! - One connection per invocation, owned by the running operation
//! - Strictly sequential request/response, no pipelining
//! - No timeouts: a silent server blocks the tool until it is killed

mod connection;
mod transport;

pub use connection::Connection;
pub use transport::{connect, Endpoint, Stream};
