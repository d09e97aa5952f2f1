//! SamudraIO - Simulated marine instrument suite
//!
//! Generates NMEA 0183 sentences for depth, speed, heading, water
//! temperature, true wind and GPS position, and broadcasts them as UDP
//! datagrams to one or more listeners. Intended for integration testing of
//! navigation software without a boat.
//!
//! ## Modules
//!
//! - [`nmea`]: checksum, angle math, coordinate formatting, sentence value
//! - [`simulator`]: vessel state and sentence generation
//! - [`transport`]: datagram transport abstraction (UDP, mock)
//! - [`streaming`]: fan-out of sentences to all destinations
//! - [`app`]: tick / broadcast / sleep driver loop

pub mod app;
pub mod config;
pub mod error;
pub mod nmea;
pub mod simulator;
pub mod streaming;
pub mod transport;

// Re-export commonly used types
pub use app::SamudraApp;
pub use config::AppConfig;
pub use error::{Error, Result};
