//! End-to-end broadcast over real loopback UDP sockets.

use samudra_io::config::AppConfig;
use samudra_io::nmea::checksum_hex;
use samudra_io::transport::UdpTransport;
use samudra_io::SamudraApp;
use std::net::UdpSocket;
use std::time::Duration;

fn listener() -> (UdpSocket, u16) {
    let socket = UdpSocket::bind("127.0.0.1:0").expect("bind listener");
    socket
        .set_read_timeout(Some(Duration::from_secs(2)))
        .expect("set timeout");
    let port = socket.local_addr().unwrap().port();
    (socket, port)
}

fn loopback_config(port: u16) -> AppConfig {
    let mut config = AppConfig::default();
    config.network.destinations = vec!["127.0.0.1".to_string()];
    config.network.port = port;
    config.network.bind_address = "127.0.0.1:0".to_string();
    config.simulation.random_seed = 2024;
    config.simulation.update_interval_secs = 0.01;
    config
}

fn recv_text(socket: &UdpSocket) -> String {
    let mut buf = [0u8; 256];
    let (n, _) = socket.recv_from(&mut buf).expect("datagram");
    String::from_utf8(buf[..n].to_vec()).expect("ascii sentence")
}

#[test]
fn test_one_tick_arrives_in_order() {
    let (socket, port) = listener();
    let config = loopback_config(port);
    let transport = UdpTransport::bind(&config.network.bind_address).unwrap();
    let sender = transport.local_addr().unwrap();
    assert!(sender.ip().is_loopback());
    assert_ne!(sender.port(), 0);
    let mut app = SamudraApp::new(&config, transport).unwrap();

    let summary = app.run_tick();
    assert_eq!(summary.delivered, 6);

    let expected_headers = ["IIDPT", "IIVHW", "IIHDG", "IIMTW", "IIMWV", "GPRMC"];
    for header in expected_headers {
        let mut buf = [0u8; 256];
        let (n, from) = socket.recv_from(&mut buf).expect("datagram");
        assert_eq!(from, sender);
        let text = String::from_utf8(buf[..n].to_vec()).expect("ascii sentence");
        assert!(text.starts_with(&format!("${},", header)), "got {}", text);

        // No terminator by default; checksum must verify
        let star = text.rfind('*').unwrap();
        assert_eq!(text.len(), star + 3);
        assert_eq!(checksum_hex(&text[1..star]), &text[star + 1..]);
    }
}

#[test]
fn test_reference_sentences_on_wire() {
    let (socket, port) = listener();
    let config = loopback_config(port);
    let transport = UdpTransport::bind(&config.network.bind_address).unwrap();
    let mut app = SamudraApp::new(&config, transport).unwrap();

    app.run_tick();
    let batch: Vec<String> = (0..6).map(|_| recv_text(&socket)).collect();

    // Static headings and fixed fix time survive the trip unchanged
    assert!(batch[1].starts_with("$IIVHW,90,T,73,M,"));
    assert_eq!(batch[2], "$IIHDG,73.0,,,0.0,E*16");
    assert!(batch[4].starts_with("$IIMWV,90,T,"));
    assert!(batch[5].starts_with("$GPRMC,080820.000,A,4311.06"));
    assert!(batch[5].contains(",N,02759.64"));
    assert!(batch[5].contains(",181223,,,A*"));
}

#[test]
fn test_line_terminator_and_multiple_listeners() {
    let (first, port) = listener();
    // Second listener on another loopback address, same port
    let second = match UdpSocket::bind(("127.0.0.2", port)) {
        Ok(s) => s,
        // Not every platform routes all of 127/8; skip the second leg there
        Err(_) => return,
    };
    second
        .set_read_timeout(Some(Duration::from_secs(2)))
        .unwrap();

    let mut config = loopback_config(port);
    config.network.destinations = vec!["127.0.0.1".to_string(), "127.0.0.2".to_string()];
    config.network.line_terminator = true;
    let transport = UdpTransport::bind(&config.network.bind_address).unwrap();
    let mut app = SamudraApp::new(&config, transport).unwrap();

    let stats = app.run(Some(2)).unwrap();
    assert_eq!(stats.delivered, 24);

    for socket in [&first, &second] {
        for _ in 0..12 {
            let text = recv_text(socket);
            assert!(text.starts_with('$'));
            assert!(text.ends_with("\r\n"));
        }
    }
}
