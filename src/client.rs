use anyhow::anyhow;

use crate::game::GameSummary;
use crate::protocol::{Reply, Request, PROTOCOL_VERSION};
use crate::scan::Route;
use crate::transport::Transport;

/// Client side of the scan protocol, bound to one session key.
///
/// The handshake runs before the first call. A dropped connection is not
/// re-established; build a new client on a fresh transport.
pub struct ScanClient<T: Transport<Request, Reply>> {
    transport: T,
    session: String,
    handshaken: bool,
}

impl<T: Transport<Request, Reply>> ScanClient<T> {
    pub fn new(transport: T, session: impl Into<String>) -> Self {
        Self {
            transport,
            session: session.into(),
            handshaken: false,
        }
    }

    async fn call(&mut self, request: Request) -> anyhow::Result<Reply> {
        if !self.handshaken {
            self.transport
                .send(Request::Hello {
                    version: PROTOCOL_VERSION,
                })
                .await?;
            match self.transport.recv().await? {
                Reply::Hello { version } if version == PROTOCOL_VERSION => self.handshaken = true,
                Reply::Hello { version } => {
                    return Err(anyhow!(
                        "protocol version mismatch: expected {}, got {}",
                        PROTOCOL_VERSION,
                        version
                    ))
                }
                Reply::Error(e) => return Err(anyhow!("handshake rejected: {}", e)),
                other => return Err(anyhow!("Expected Hello, got {:?}", other)),
            }
        }
        self.transport.send(request).await?;
        match self.transport.recv().await? {
            Reply::Error(e) => Err(anyhow!("server error: {}", e)),
            reply => Ok(reply),
        }
    }

    /// Start a new game; returns the number of ships placed.
    pub async fn new_game(&mut self) -> anyhow::Result<usize> {
        let session = self.session.clone();
        match self.call(Request::NewGame { session }).await? {
            Reply::Started { ships } => Ok(ships),
            other => Err(anyhow!("Unexpected reply {:?}", other)),
        }
    }

    pub async fn scan(&mut self, hid: &str) -> anyhow::Result<Route> {
        let request = Request::Scan {
            session: self.session.clone(),
            hid: hid.to_string(),
        };
        match self.call(request).await? {
            Reply::Routed(route) => Ok(route),
            other => Err(anyhow!("Unexpected reply {:?}", other)),
        }
    }

    /// Counters of the current game, `None` if the session has none.
    pub async fn status(&mut self) -> anyhow::Result<Option<GameSummary>> {
        let session = self.session.clone();
        match self.call(Request::Status { session }).await? {
            Reply::Status(summary) => Ok(Some(summary)),
            Reply::NoGame => Ok(None),
            other => Err(anyhow!("Unexpected reply {:?}", other)),
        }
    }

    pub async fn clear(&mut self) -> anyhow::Result<()> {
        let session = self.session.clone();
        match self.call(Request::Clear { session }).await? {
            Reply::Cleared => Ok(()),
            other => Err(anyhow!("Unexpected reply {:?}", other)),
        }
    }

    pub fn into_transport(self) -> T {
        self.transport
    }
}
