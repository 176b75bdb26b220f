//! End-to-end probing of a mock TNFS server on both transports

use std::time::Duration;

use tnfs_probe::{ProbeConfig, Reachability, probe_host};

use super::mock;

#[tokio::test]
async fn test_mock_server_is_up_on_both_transports() {
    let _ = tracing_subscriber::fmt::try_init();

    let (udp, tcp) = mock::bind_pair().await;
    let port = udp.local_addr().unwrap().port();
    let _tcp_server = mock::serve_tcp(tcp, 0x4242);
    let (_udp_server, mut requests) = mock::serve_udp(udp, 0x4242);

    let config = ProbeConfig { port, udp_timeout: Duration::from_secs(1), ..ProbeConfig::default() };
    let reachability = probe_host("127.0.0.1", &config).await;

    assert_eq!(reachability, Reachability::new(true, true));
    assert!(!reachability.is_down());

    let mount = mock::next_request(&mut requests).await;
    assert_eq!(mount.len(), 10);
    assert_eq!(mount[3], 0x00);

    let unmount = mock::next_request(&mut requests).await;
    assert_eq!(unmount, vec![0x42, 0x42, 0x00, 0x01]);
}

#[tokio::test]
async fn test_nothing_listening_is_down_on_both_transports() {
    let (udp, tcp) = mock::bind_pair().await;
    let port = udp.local_addr().unwrap().port();
    drop(tcp);
    drop(udp);

    let config = ProbeConfig { port, udp_timeout: Duration::from_millis(300), ..ProbeConfig::default() };
    let reachability = probe_host("127.0.0.1", &config).await;

    assert!(reachability.is_down());
}
