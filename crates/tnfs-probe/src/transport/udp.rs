//! TNFS probing over UDP datagrams.

use std::net::SocketAddr;

use async_trait::async_trait;
use tokio::net::UdpSocket;
use tokio::time::timeout;
use tracing::debug;

use super::{ProbeConfig, Prober, Transport, expect_command, resolve};
use crate::error::ProbeError;
use crate::protocol::{
    Command, ProbeResponse, build_mount_request, build_unmount_request, parse_response,
};

/// Sends MOUNT as one datagram and waits for a single reply.
///
/// The socket stays unconnected, so a reply is accepted from whichever
/// address the server answers on.
///
/// A parsed MOUNT reply opens a session on the server, so the prober follows
/// up with an UNMOUNT for that session. The UNMOUNT is best effort and never
/// changes the outcome, which is decided on the MOUNT reply alone.
#[derive(Debug, Clone, Default)]
pub struct UdpProber {
    config: ProbeConfig,
}

impl UdpProber {
    pub fn new(config: ProbeConfig) -> Self {
        Self { config }
    }

    async fn open_socket(&self, host: &str) -> Result<(UdpSocket, SocketAddr), ProbeError> {
        let addrs = timeout(self.config.udp_timeout, resolve(host, self.config.port))
            .await
            .map_err(|_| ProbeError::ConnectTimeout(self.config.udp_timeout))??;
        let target = addrs[0];

        let socket = UdpSocket::bind(bind_addr_for(&target)).await.map_err(ProbeError::Connect)?;
        Ok((socket, target))
    }

    /// Receive one datagram, bounded by the UDP deadline
    async fn recv_reply(&self, socket: &UdpSocket) -> Result<Vec<u8>, ProbeError> {
        let mut buf = vec![0u8; self.config.max_response_len];

        let received = match timeout(self.config.udp_timeout, socket.recv_from(&mut buf)).await {
            Ok(Ok((n, _))) => n,
            Ok(Err(e)) => return Err(ProbeError::Read(e)),
            Err(_) => return Err(ProbeError::NoResponse),
        };

        if received == 0 {
            return Err(ProbeError::NoResponse);
        }

        buf.truncate(received);
        Ok(buf)
    }

    /// Close the server-side session opened by a MOUNT
    async fn release_session(&self, socket: &UdpSocket, target: SocketAddr, session_id: u16) {
        let request = build_unmount_request(session_id);
        if let Err(error) = socket.send_to(request.as_bytes(), target).await {
            debug!(session_id, %error, "failed to send UNMOUNT");
            return;
        }

        match self.recv_reply(socket).await.and_then(|reply| parse_response(&reply).map_err(ProbeError::from)) {
            Ok(reply) => debug!(session_id, %reply, "UNMOUNT answered"),
            Err(error) => debug!(session_id, %error, "no usable UNMOUNT reply"),
        }
    }
}

#[async_trait]
impl Prober for UdpProber {
    fn transport(&self) -> Transport {
        Transport::Udp
    }

    async fn exchange(&self, host: &str) -> Result<ProbeResponse, ProbeError> {
        let (socket, target) = self.open_socket(host).await?;

        let request = build_mount_request();
        socket.send_to(request.as_bytes(), target).await.map_err(ProbeError::Write)?;

        let reply = self.recv_reply(&socket).await?;
        let mount = parse_response(&reply)?;

        self.release_session(&socket, target, mount.session_id).await;
        drop(socket);

        expect_command(mount, Command::Mount)
    }
}

/// Unspecified local address of the same family as `target`
fn bind_addr_for(target: &SocketAddr) -> SocketAddr {
    match target {
        SocketAddr::V4(_) => SocketAddr::from(([0, 0, 0, 0], 0)),
        SocketAddr::V6(_) => SocketAddr::from(([0u16; 8], 0)),
    }
}
