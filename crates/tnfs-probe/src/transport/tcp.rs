//! TNFS probing over a TCP stream.

use std::io;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::{Instant, timeout, timeout_at};
use tracing::debug;

use super::{ProbeConfig, Prober, Transport, expect_command, resolve};
use crate::error::ProbeError;
use crate::protocol::{Command, ProbeResponse, build_mount_request, parse_response};

/// Sends MOUNT over a fresh TCP connection and reads the reply.
///
/// No retries: a single failed attempt reports the server as down.
#[derive(Debug, Clone, Default)]
pub struct TcpProber {
    config: ProbeConfig,
}

impl TcpProber {
    pub fn new(config: ProbeConfig) -> Self {
        Self { config }
    }

    async fn connect(&self, host: &str) -> Result<TcpStream, ProbeError> {
        let addrs = resolve(host, self.config.port).await?;
        TcpStream::connect(&addrs[..]).await.map_err(ProbeError::Connect)
    }
}

#[async_trait]
impl Prober for TcpProber {
    fn transport(&self) -> Transport {
        Transport::Tcp
    }

    async fn exchange(&self, host: &str) -> Result<ProbeResponse, ProbeError> {
        let mut stream = timeout(self.config.connect_timeout, self.connect(host))
            .await
            .map_err(|_| ProbeError::ConnectTimeout(self.config.connect_timeout))??;

        // One deadline covers the write and every read that follows
        let deadline = Instant::now() + self.config.read_timeout;

        let request = build_mount_request();
        match timeout_at(deadline, stream.write_all(request.as_bytes())).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(ProbeError::Write(e)),
            Err(_) => return Err(ProbeError::Write(io::ErrorKind::TimedOut.into())),
        }

        let response = read_until_deadline(&mut stream, deadline, self.config.max_response_len).await;
        drop(stream);

        if response.is_empty() {
            return Err(ProbeError::NoResponse);
        }

        let parsed = parse_response(&response)?;
        expect_command(parsed, Command::Mount)
    }
}

/// Collect bytes until `max_len` is reached, the peer closes, a read fails or
/// the deadline passes. Whatever arrived so far is returned in every case.
async fn read_until_deadline<R>(reader: &mut R, deadline: Instant, max_len: usize) -> Vec<u8>
where
    R: AsyncRead + Unpin,
{
    let mut buf = vec![0u8; max_len];
    let mut filled = 0;

    while filled < max_len {
        match timeout_at(deadline, reader.read(&mut buf[filled..])).await {
            Ok(Ok(0)) => break,
            Ok(Ok(n)) => filled += n,
            Ok(Err(e)) => {
                debug!(error = %e, received = filled, "TCP read stopped");
                break;
            }
            Err(_) => {
                debug!(received = filled, "TCP read deadline elapsed");
                break;
            }
        }
    }

    buf.truncate(filled);
    buf
}
