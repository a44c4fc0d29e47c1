use std::net::Ipv4Addr;
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::UdpSocket;
use tokio::time::timeout;
use tracing::debug;

use crate::TransportError;

/// UDP responses larger than this are silently cut off by the kernel.
/// Matches the classic 512-byte-plus-headroom sizing; TCP fallback on
/// truncation is out of scope.
const RECV_BUF_LEN: usize = 1024;

const DNS_PORT: u16 = 53;

const DEFAULT_DEADLINE: Duration = Duration::from_secs(5);

/// One network round trip: hand query bytes to a server, get response
/// bytes back. The resolver sees nothing below this seam, which is what
/// lets its tests script responses instead of reaching the network.
#[async_trait]
pub trait Transport {
    async fn send(&self, server: Ipv4Addr, query: &[u8]) -> Result<Vec<u8>, TransportError>;
}

/// The real thing: one UDP datagram out, one in, with a per-round-trip
/// deadline.
#[derive(Debug, Clone)]
pub struct UdpTransport {
    deadline: Duration,
}

impl UdpTransport {
    pub fn new(deadline: Duration) -> Self {
        Self { deadline }
    }
}

impl Default for UdpTransport {
    fn default() -> Self {
        Self::new(DEFAULT_DEADLINE)
    }
}

#[async_trait]
impl Transport for UdpTransport {
    async fn send(&self, server: Ipv4Addr, query: &[u8]) -> Result<Vec<u8>, TransportError> {
        let sock = UdpSocket::bind(("0.0.0.0", 0)).await?;
        sock.send_to(query, (server, DNS_PORT)).await?;

        let mut buf = [0; RECV_BUF_LEN];
        let len = timeout(self.deadline, sock.recv(&mut buf))
            .await
            .map_err(|_| TransportError::Timeout)??;

        debug!(%server, len, "received response");

        Ok(buf[..len].to_vec())
    }
}
