//! UDP transport implementation

use super::DatagramTransport;
use crate::error::{Error, Result};
use std::net::{SocketAddr, UdpSocket};

/// UDP socket used only for sending
pub struct UdpTransport {
    socket: UdpSocket,
}

impl UdpTransport {
    /// Bind the sending socket
    ///
    /// # Arguments
    /// * `bind_address` - Local address, e.g. `0.0.0.0:0` for any port
    pub fn bind(bind_address: &str) -> Result<Self> {
        let socket = UdpSocket::bind(bind_address).map_err(|e| {
            Error::Other(format!("Failed to bind UDP socket to {}: {}", bind_address, e))
        })?;

        // Allows subnet broadcast addresses in the destination list
        if let Err(e) = socket.set_broadcast(true) {
            log::warn!("Failed to enable SO_BROADCAST: {}", e);
        }

        log::info!("UDP socket bound to {}", socket.local_addr()?);
        Ok(Self { socket })
    }

    /// Local address the socket is bound to
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }
}

impl DatagramTransport for UdpTransport {
    fn send_to(&mut self, payload: &[u8], target: SocketAddr) -> Result<usize> {
        self.socket
            .send_to(payload, target)
            .map_err(|e| Error::Send {
                destination: target.to_string(),
                reason: e.to_string(),
            })
    }
}
