//! UDP prober tests

use std::time::{Duration, Instant};

use tnfs_probe::{ProbeConfig, ProbeError, Prober, UdpProber};
use tokio::net::UdpSocket;

#[tokio::test]
async fn test_no_datagram_returns_false() {
    let _ = tracing_subscriber::fmt::try_init();

    let silent = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let addr = silent.local_addr().unwrap();

    let prober = UdpProber::new(ProbeConfig::default());
    let started = Instant::now();

    assert!(!prober.probe(&addr.to_string()).await);
    assert!(started.elapsed() <= Duration::from_secs(6));
    drop(silent);
}

#[tokio::test]
async fn test_short_datagram_returns_false_without_unmount() {
    let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let addr = server.local_addr().unwrap();

    let responder = tokio::spawn(async move {
        let mut buf = [0u8; 64];
        let (_, peer) = server.recv_from(&mut buf).await.unwrap();
        server.send_to(&[0x00, 0x01, 0x00], peer).await.unwrap();

        // A malformed reply opens no session, so nothing else should arrive
        tokio::time::timeout(Duration::from_millis(300), server.recv_from(&mut buf))
            .await
            .is_err()
    });

    let config = ProbeConfig { udp_timeout: Duration::from_millis(500), ..ProbeConfig::default() };
    let result = UdpProber::new(config).exchange(&addr.to_string()).await;

    assert!(matches!(result, Err(ProbeError::Malformed(_))));
    assert!(responder.await.unwrap(), "no UNMOUNT expected after a malformed reply");
}

#[tokio::test]
async fn test_missing_unmount_reply_does_not_change_outcome() {
    let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let addr = server.local_addr().unwrap();

    tokio::spawn(async move {
        let mut buf = [0u8; 64];
        let (_, peer) = server.recv_from(&mut buf).await.unwrap();
        server.send_to(&[0x00, 0x09, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00], peer).await.unwrap();
        // Swallow the UNMOUNT without answering
        let _ = server.recv_from(&mut buf).await;
    });

    let config = ProbeConfig { udp_timeout: Duration::from_millis(300), ..ProbeConfig::default() };
    assert!(UdpProber::new(config).probe(&addr.to_string()).await);
}
