//! Message transports between scan clients and the scan server.
//!
//! A transport sends `Tx` messages and receives `Rx` messages, so the server
//! side is a `Transport<Reply, Request>` and the client side a
//! `Transport<Request, Reply>`.

use core::fmt;

use serde::{de::DeserializeOwned, Serialize};

/// The peer went away cleanly. Transports return this (inside
/// [`anyhow::Error`]) so callers can tell a hang-up from a broken frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionClosed;

impl fmt::Display for ConnectionClosed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Connection closed by peer")
    }
}

impl std::error::Error for ConnectionClosed {}

#[async_trait::async_trait]
pub trait Transport<Tx, Rx>: Send
where
    Tx: Serialize + Send + 'static,
    Rx: DeserializeOwned + Send + 'static,
{
    async fn send(&mut self, msg: Tx) -> anyhow::Result<()>;
    async fn recv(&mut self) -> anyhow::Result<Rx>;
}

pub mod in_memory;
pub mod tcp;
