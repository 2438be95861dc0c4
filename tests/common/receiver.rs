//! Local UDP receiver standing in for the light controller.

use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;

/// Bound loopback socket that collects datagrams
pub struct UdpReceiver {
    socket: UdpSocket,
}

impl UdpReceiver {
    /// Bind an ephemeral loopback port
    pub async fn start() -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test receiver");
        Self { socket }
    }

    pub fn addr(&self) -> SocketAddr {
        self.socket.local_addr().expect("receiver has no address")
    }

    /// `host:port` string for config and sinks
    pub fn target(&self) -> String {
        self.addr().to_string()
    }

    /// Wait up to a second for the next datagram
    pub async fn recv(&self) -> Vec<u8> {
        self.try_recv(Duration::from_secs(1))
            .await
            .expect("No datagram received within 1s")
    }

    /// Next datagram, or `None` after `timeout`
    pub async fn try_recv(&self, timeout: Duration) -> Option<Vec<u8>> {
        let mut buf = vec![0u8; 2048];
        match tokio::time::timeout(timeout, self.socket.recv(&mut buf)).await {
            Ok(Ok(len)) => {
                buf.truncate(len);
                Some(buf)
            }
            _ => None,
        }
    }
}
