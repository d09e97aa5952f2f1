//! Transport layer for datagram I/O abstraction

use crate::error::{Error, Result};
use std::fmt;
use std::net::{SocketAddr, ToSocketAddrs};

mod mock;
mod udp;
pub use mock::MockTransport;
pub use udp::UdpTransport;

/// Connectionless transport: one payload to one address, no acknowledgment
pub trait DatagramTransport: Send {
    /// Send one datagram, returns number of bytes handed to the network
    fn send_to(&mut self, payload: &[u8], target: SocketAddr) -> Result<usize>;
}

/// A listener endpoint as configured (host may be a name or an IP literal)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Destination {
    pub host: String,
    pub port: u16,
}

impl Destination {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Resolve to the first socket address for this host
    ///
    /// IP literals resolve without touching DNS.
    pub fn resolve(&self) -> Result<SocketAddr> {
        let mut addrs = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|e| self.resolution_error(e.to_string()))?;
        addrs
            .next()
            .ok_or_else(|| self.resolution_error("no addresses returned".to_string()))
    }

    fn resolution_error(&self, reason: String) -> Error {
        Error::AddressResolution {
            host: self.host.clone(),
            port: self.port,
            reason,
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
