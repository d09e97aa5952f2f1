//! Mock transport for testing

use super::DatagramTransport;
use crate::error::{Error, Result};
use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

/// Mock transport that records datagrams instead of sending them
///
/// Clones share the same record, so a test can keep one handle while the
/// broadcaster owns another.
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockTransportInner>>,
}

#[derive(Default)]
struct MockTransportInner {
    sent: Vec<(SocketAddr, Vec<u8>)>,
    failing: HashSet<SocketAddr>,
}

impl MockTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every send to `addr` fail
    pub fn fail_on(&self, addr: SocketAddr) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.failing.insert(addr);
    }

    /// All datagrams sent so far, in order
    pub fn sent(&self) -> Vec<(SocketAddr, Vec<u8>)> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.sent.clone()
    }

    /// Payloads sent to one address, as UTF-8 text
    pub fn sent_to(&self, addr: SocketAddr) -> Vec<String> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner
            .sent
            .iter()
            .filter(|(a, _)| *a == addr)
            .map(|(_, p)| String::from_utf8_lossy(p).into_owned())
            .collect()
    }

    /// Clear recorded datagrams
    pub fn clear_sent(&self) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.sent.clear();
    }
}

impl DatagramTransport for MockTransport {
    fn send_to(&mut self, payload: &[u8], target: SocketAddr) -> Result<usize> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if inner.failing.contains(&target) {
            return Err(Error::Send {
                destination: target.to_string(),
                reason: "simulated failure".to_string(),
            });
        }
        inner.sent.push((target, payload.to_vec()));
        Ok(payload.len())
    }
}
