//! TCP prober tests

use std::time::{Duration, Instant};

use tnfs_probe::{ProbeConfig, Prober, TcpProber};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

#[tokio::test]
async fn test_refused_connection_returns_false_quickly() {
    let _ = tracing_subscriber::fmt::try_init();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let prober = TcpProber::new(ProbeConfig::default());
    let started = Instant::now();

    assert!(!prober.probe(&addr.to_string()).await);
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_short_reply_then_close_returns_false() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 64];
        let _ = socket.read(&mut request).await;
        socket.write_all(&[0x12, 0x34, 0x00, 0x00, 0x00]).await.unwrap();
    });

    let prober = TcpProber::new(ProbeConfig::default());
    assert!(!prober.probe(&addr.to_string()).await);
}

#[tokio::test]
async fn test_close_without_reply_returns_false() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        drop(socket);
    });

    let prober = TcpProber::new(ProbeConfig::default());
    assert!(!prober.probe(&addr.to_string()).await);
}

#[tokio::test]
async fn test_unresolvable_host_returns_false() {
    let config = ProbeConfig { connect_timeout: Duration::from_secs(2), ..ProbeConfig::default() };
    let prober = TcpProber::new(config);

    assert!(!prober.probe("tnfs.invalid").await);
}
