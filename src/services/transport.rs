use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::RwLock;

use crate::error::TransportError;

/// Destination for encoded frame payloads
#[async_trait]
pub trait FrameSink: Send + Sync {
    /// Deliver one payload. Best effort; callers do not retry.
    async fn send(&self, payload: &[u8]) -> Result<(), TransportError>;
}

/// Sends each payload as one UDP datagram to a fixed target
pub struct UdpSink {
    socket: UdpSocket,
    target: SocketAddr,
}

impl UdpSink {
    /// Resolve `target` (`host:port`) and bind an ephemeral local socket
    pub async fn connect(target: &str) -> Result<Self, TransportError> {
        let target_addr = tokio::net::lookup_host(target)
            .await
            .map_err(|e| TransportError::Resolve(format!("{target}: {e}")))?
            .next()
            .ok_or_else(|| TransportError::Resolve(target.to_string()))?;

        let bind_addr: SocketAddr = if target_addr.is_ipv4() {
            ([0, 0, 0, 0], 0).into()
        } else {
            (std::net::Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(bind_addr).await?;

        tracing::info!(peer = %target_addr, local = ?socket.local_addr().ok(), "UDP sink ready");
        Ok(Self {
            socket,
            target: target_addr,
        })
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }

    pub fn local_addr(&self) -> Result<SocketAddr, TransportError> {
        Ok(self.socket.local_addr()?)
    }
}

#[async_trait]
impl FrameSink for UdpSink {
    async fn send(&self, payload: &[u8]) -> Result<(), TransportError> {
        let sent = self.socket.send_to(payload, self.target).await?;
        if sent != payload.len() {
            return Err(TransportError::Truncated {
                sent,
                len: payload.len(),
            });
        }
        tracing::trace!(bytes = sent, peer = %self.target, "Sent frame");
        Ok(())
    }
}

/// In-memory sink that records every payload
pub struct MemorySink {
    payloads: Arc<RwLock<Vec<Vec<u8>>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self {
            payloads: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Copies of all payloads received so far, oldest first
    pub async fn payloads(&self) -> Vec<Vec<u8>> {
        self.payloads.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.payloads.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.payloads.read().await.is_empty()
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FrameSink for MemorySink {
    async fn send(&self, payload: &[u8]) -> Result<(), TransportError> {
        self.payloads.write().await.push(payload.to_vec());
        Ok(())
    }
}
