//! Mock TNFS responders bound to loopback

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Reply header for a successful MOUNT with the given session
pub fn mount_reply(session_id: u16) -> [u8; 8] {
    let [hi, lo] = session_id.to_be_bytes();
    [hi, lo, 0x00, 0x00, 0x00, 0x02, 0x00, 0x05]
}

/// Reply header for an UNMOUNT of the given session
pub fn unmount_reply(session_id: u16) -> [u8; 8] {
    let [hi, lo] = session_id.to_be_bytes();
    [hi, lo, 0x00, 0x01, 0x00, 0x02, 0x00, 0x00]
}

/// Bind a UDP socket and a TCP listener on the same loopback port
pub async fn bind_pair() -> (UdpSocket, TcpListener) {
    for _ in 0..20 {
        let udp = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = udp.local_addr().unwrap().port();
        if let Ok(tcp) = TcpListener::bind(("127.0.0.1", port)).await {
            return (udp, tcp);
        }
    }
    panic!("could not bind TCP and UDP on the same port");
}

/// Answer every TCP connection with a MOUNT reply
pub fn serve_tcp(listener: TcpListener, session_id: u16) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut request = [0u8; 64];
                if socket.read(&mut request).await.is_ok() {
                    let _ = socket.write_all(&mount_reply(session_id)).await;
                }
            });
        }
    })
}

/// Answer MOUNT and UNMOUNT datagrams, forwarding every request received
pub fn serve_udp(socket: UdpSocket, session_id: u16) -> (JoinHandle<()>, mpsc::UnboundedReceiver<Vec<u8>>) {
    let (tx, rx) = mpsc::unbounded_channel();

    let handle = tokio::spawn(async move {
        let mut buf = [0u8; 1024];
        while let Ok((n, peer)) = socket.recv_from(&mut buf).await {
            let request = buf[..n].to_vec();
            let reply = match request.get(3) {
                Some(0x01) => unmount_reply(session_id),
                _ => mount_reply(session_id),
            };
            let _ = tx.send(request);
            let _ = socket.send_to(&reply, peer).await;
        }
    });

    (handle, rx)
}

/// Wait for the next captured datagram
pub async fn next_request(rx: &mut mpsc::UnboundedReceiver<Vec<u8>>) -> Vec<u8> {
    tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("Timeout waiting for datagram")
        .expect("Channel closed")
}
