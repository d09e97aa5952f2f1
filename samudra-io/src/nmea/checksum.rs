//! NMEA 0183 checksum
//!
//! The checksum is the XOR of every byte between `$` and `*` (both
//! exclusive), written as two uppercase hex digits.

/// XOR checksum of a sentence body.
#[inline]
pub fn checksum(body: &str) -> u8 {
    body.bytes().fold(0u8, |acc, b| acc ^ b)
}

/// Checksum of a sentence body rendered as two uppercase hex digits.
pub fn checksum_hex(body: &str) -> String {
    format!("{:02X}", checksum(body))
}
