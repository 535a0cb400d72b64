//! Scan server: answers [`Request`]s from any number of connections against a
//! shared [`SessionHub`].

use std::sync::Arc;

use anyhow::anyhow;
use tokio::net::TcpListener;

use crate::hub::SessionHub;
use crate::protocol::{valid_session_key, Reply, Request, PROTOCOL_VERSION};
use crate::store::GameStore;
use crate::transport::{tcp::TcpTransport, ConnectionClosed, Transport};

pub struct ScanServer<S: GameStore> {
    hub: Arc<SessionHub<S>>,
}

impl<S: GameStore> Clone for ScanServer<S> {
    fn clone(&self) -> Self {
        Self {
            hub: Arc::clone(&self.hub),
        }
    }
}

impl<S> ScanServer<S>
where
    S: GameStore + Send + 'static,
{
    pub fn new(hub: Arc<SessionHub<S>>) -> Self {
        Self { hub }
    }

    pub fn hub(&self) -> &SessionHub<S> {
        &self.hub
    }

    /// Answer a single request.
    pub async fn handle(&self, request: Request) -> Reply {
        if let Some(key) = request.session() {
            if !valid_session_key(key) {
                return Reply::Error(format!("invalid session key {:?}", key));
            }
        }
        match request {
            Request::Hello { version } if version == PROTOCOL_VERSION => Reply::Hello {
                version: PROTOCOL_VERSION,
            },
            Request::Hello { version } => Reply::Error(format!(
                "protocol version mismatch: expected {}, got {}",
                PROTOCOL_VERSION, version
            )),
            Request::NewGame { session } => match self.hub.new_game(&session).await {
                Ok(state) => Reply::Started {
                    ships: state.ships().len(),
                },
                Err(e) => Reply::Error(e.to_string()),
            },
            Request::Scan { session, hid } => Reply::Routed(self.hub.scan(&session, &hid).await),
            Request::Status { session } => match self.hub.summary(&session).await {
                Ok(Some(summary)) => Reply::Status(summary),
                Ok(None) => Reply::NoGame,
                Err(e) => Reply::Error(e.to_string()),
            },
            Request::Clear { session } => match self.hub.clear(&session).await {
                Ok(()) => Reply::Cleared,
                Err(e) => Reply::Error(e.to_string()),
            },
        }
    }

    /// Serve one connection until the peer goes away.
    ///
    /// A clean hang-up ends with `Ok`; a broken frame or a receive timeout is
    /// returned as the error.
    pub async fn serve_connection<T>(&self, mut transport: T) -> anyhow::Result<()>
    where
        T: Transport<Reply, Request>,
    {
        loop {
            let request = match transport.recv().await {
                Ok(request) => request,
                Err(e) if e.is::<ConnectionClosed>() => return Ok(()),
                Err(e) => return Err(e.context("receiving request")),
            };
            log::debug!("request: {:?}", request);
            let reply = self.handle(request).await;
            transport.send(reply).await?;
        }
    }

    /// Accept TCP connections forever, one task per connection.
    pub async fn listen(&self, listener: TcpListener) -> anyhow::Result<()> {
        let local = listener
            .local_addr()
            .map_err(|e| anyhow!("listener has no address: {}", e))?;
        log::info!("scan server listening on {}", local);
        loop {
            let (stream, addr) = listener.accept().await?;
            log::info!("client connected from {}", addr);
            let server = self.clone();
            tokio::spawn(async move {
                let transport: TcpTransport<Reply, Request> = TcpTransport::new(stream);
                if let Err(e) = server.serve_connection(transport).await {
                    log::warn!("connection {} ended with error: {:#}", addr, e);
                } else {
                    log::info!("client {} disconnected", addr);
                }
            });
        }
    }
}
