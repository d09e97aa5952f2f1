//! NMEA Sentence Monitor
//!
//! Minimal listener for checking a running SamudraIO instance. Binds a UDP
//! port, prints every sentence it receives, flags checksum mismatches and
//! reports per-type counts on exit.
//!
//! Usage:
//! ```bash
//! # terminal 1
//! cargo run --example sentence_monitor -- 4950 30
//! # terminal 2
//! RUST_LOG=debug cargo run -- samudra.toml
//! ```
//!
//! Arguments: `[port] [seconds]`, defaults 4950 and 30.

use samudra_io::nmea::checksum_hex;
use std::collections::BTreeMap;
use std::net::UdpSocket;
use std::time::{Duration, Instant};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let port: u16 = args.next().map(|a| a.parse()).transpose()?.unwrap_or(4950);
    let seconds: u64 = args.next().map(|a| a.parse()).transpose()?.unwrap_or(30);

    let socket = UdpSocket::bind(("0.0.0.0", port))?;
    socket.set_read_timeout(Some(Duration::from_millis(200)))?;
    println!("Listening on UDP {} for {} seconds...", port, seconds);

    let deadline = Instant::now() + Duration::from_secs(seconds);
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    let mut bad = 0u64;
    let mut buf = [0u8; 512];

    while Instant::now() < deadline {
        let (n, from) = match socket.recv_from(&mut buf) {
            Ok(r) => r,
            Err(e)
                if e.kind() == std::io::ErrorKind::WouldBlock
                    || e.kind() == std::io::ErrorKind::TimedOut =>
            {
                continue
            }
            Err(e) => return Err(e.into()),
        };

        let text = String::from_utf8_lossy(&buf[..n]);
        let line = text.trim_end_matches(['\r', '\n']);

        let valid = match (line.strip_prefix('$'), line.rfind('*')) {
            (Some(_), Some(star)) => checksum_hex(&line[1..star]) == line[star + 1..],
            _ => false,
        };
        if !valid {
            bad += 1;
        }

        let header = line
            .trim_start_matches('$')
            .split(',')
            .next()
            .unwrap_or("")
            .to_string();
        *counts.entry(header).or_default() += 1;

        println!("{} {} {}", from, if valid { "ok " } else { "BAD" }, line);
    }

    println!("\n=== Summary ===");
    for (header, count) in &counts {
        println!("{:8} {}", header, count);
    }
    println!("checksum failures: {}", bad);
    Ok(())
}
