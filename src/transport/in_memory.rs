use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::transport::{ConnectionClosed, Transport};

/// In-process transport backed by a pair of unbounded channels.
pub struct InMemoryTransport<Tx, Rx> {
    tx: UnboundedSender<Tx>,
    rx: UnboundedReceiver<Rx>,
}

impl<A, B> InMemoryTransport<A, B> {
    /// Two connected ends: what one sends, the other receives.
    pub fn pair() -> (InMemoryTransport<A, B>, InMemoryTransport<B, A>) {
        let (a_tx, a_rx) = unbounded_channel();
        let (b_tx, b_rx) = unbounded_channel();
        (
            InMemoryTransport { tx: a_tx, rx: b_rx },
            InMemoryTransport { tx: b_tx, rx: a_rx },
        )
    }
}

#[async_trait::async_trait]
impl<Tx, Rx> Transport<Tx, Rx> for InMemoryTransport<Tx, Rx>
where
    Tx: Serialize + Send + 'static,
    Rx: DeserializeOwned + Send + 'static,
{
    async fn send(&mut self, msg: Tx) -> anyhow::Result<()> {
        self.tx
            .send(msg)
            .map_err(|_| anyhow::Error::new(ConnectionClosed))
    }

    async fn recv(&mut self) -> anyhow::Result<Rx> {
        self.rx
            .recv()
            .await
            .ok_or_else(|| anyhow::Error::new(ConnectionClosed))
    }
}
