//! UDP fan-out of NMEA sentences
//!
//! Every sentence goes to every configured destination as its own datagram.
//! Destinations are independent: a host that fails to resolve or a send that
//! errors is recorded in the [`DeliveryReport`] and the remaining
//! destinations are still attempted. Nothing is retried; the next tick
//! supersedes a lost sentence.
//!
//! # Wire Format
//!
//! ```text
//! ┌─────────────────────────────┬────────────────────┐
//! │ $<body>*<HH>  (ASCII)       │ \r\n  (optional)   │
//! └─────────────────────────────┴────────────────────┘
//! ```

use crate::error::Result;
use crate::nmea::Sentence;
use crate::transport::{DatagramTransport, Destination};

/// Typical sentence is under 80 bytes; NMEA caps at 82 including CR LF
const MAX_DATAGRAM_SIZE: usize = 128;

/// Result of one send attempt
#[derive(Debug)]
pub struct DeliveryOutcome {
    pub destination: Destination,
    /// Bytes sent, or why the datagram could not be sent
    pub result: Result<usize>,
}

/// Per-destination outcome of broadcasting one sentence
#[derive(Debug, Default)]
pub struct DeliveryReport {
    pub outcomes: Vec<DeliveryOutcome>,
}

impl DeliveryReport {
    /// Number of destinations the datagram was handed to
    pub fn delivered(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    /// Number of destinations that failed
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.delivered()
    }

    /// True when every destination succeeded
    pub fn is_complete(&self) -> bool {
        self.failed() == 0
    }
}

/// Sends sentences to a fixed destination list
pub struct Broadcaster<T: DatagramTransport> {
    transport: T,
    destinations: Vec<Destination>,
    line_terminator: bool,
    /// Reused send buffer
    buffer: Vec<u8>,
}

impl<T: DatagramTransport> Broadcaster<T> {
    /// Create a new broadcaster
    ///
    /// # Arguments
    /// * `transport` - Datagram transport (UDP socket or mock)
    /// * `destinations` - Listener endpoints, fixed for the run
    /// * `line_terminator` - Append `\r\n` to each datagram
    pub fn new(transport: T, destinations: Vec<Destination>, line_terminator: bool) -> Self {
        Self {
            transport,
            destinations,
            line_terminator,
            buffer: Vec::with_capacity(MAX_DATAGRAM_SIZE),
        }
    }

    /// Build destinations from a host list sharing one port
    pub fn with_hosts(transport: T, hosts: &[String], port: u16, line_terminator: bool) -> Self {
        let destinations = hosts.iter().map(|h| Destination::new(h.clone(), port)).collect();
        Self::new(transport, destinations, line_terminator)
    }

    /// Configured destinations
    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    /// Send `sentence` to every destination
    pub fn broadcast(&mut self, sentence: &Sentence) -> DeliveryReport {
        sentence.write_datagram(&mut self.buffer, self.line_terminator);

        let mut report = DeliveryReport {
            outcomes: Vec::with_capacity(self.destinations.len()),
        };

        for destination in &self.destinations {
            let result = destination
                .resolve()
                .and_then(|addr| self.transport.send_to(&self.buffer, addr));

            match &result {
                Ok(_) => log::debug!("Sent to {}: {}", destination, sentence),
                // Send errors are not fatal - just log and continue
                Err(e) => log::warn!("Failed to send {} to {}: {}", sentence.header(), destination, e),
            }

            report.outcomes.push(DeliveryOutcome {
                destination: destination.clone(),
                result,
            });
        }

        report
    }
}
