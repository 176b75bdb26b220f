//! Transport-specific probing for TNFS servers.
//!
//! Both transports send the same MOUNT request and classify the server as up
//! only when a well-formed header echoing MOUNT comes back. They differ in
//! connection lifecycle, so each lives behind the common [`Prober`] trait.

pub mod tcp;
pub mod udp;

pub use tcp::TcpProber;
pub use udp::UdpProber;

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::net::lookup_host;
use tracing::debug;

use crate::TNFS_PORT;
use crate::error::ProbeError;
use crate::protocol::{Command, ProbeResponse};

/// Transport a probe runs over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    Tcp,
    Udp,
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::Tcp => write!(f, "tcp"),
            Transport::Udp => write!(f, "udp"),
        }
    }
}

/// Timeouts and limits applied by the probers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Port used when the host string does not carry one
    pub port: u16,

    /// Bound on resolving and connecting the TCP stream
    pub connect_timeout: Duration,

    /// Deadline for writing the request and collecting the TCP reply
    pub read_timeout: Duration,

    /// Deadline for each UDP receive
    pub udp_timeout: Duration,

    /// Upper bound on the bytes collected for one reply
    pub max_response_len: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            port: TNFS_PORT,
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(2),
            udp_timeout: Duration::from_secs(5),
            max_response_len: 1024,
        }
    }
}

/// A transport-specific way of checking a TNFS server
#[async_trait]
pub trait Prober: Send + Sync {
    /// Transport this prober uses
    fn transport(&self) -> Transport;

    /// Run the handshake and return the MOUNT reply, or why there was none
    async fn exchange(&self, host: &str) -> Result<ProbeResponse, ProbeError>;

    /// Whether `host` answered the MOUNT handshake. Never fails.
    async fn probe(&self, host: &str) -> bool {
        match self.exchange(host).await {
            Ok(response) => {
                debug!(host, transport = %self.transport(), %response, "TNFS server is up");
                true
            }
            Err(error) => {
                debug!(host, transport = %self.transport(), %error, "TNFS server is down");
                false
            }
        }
    }
}

/// Status string persisted for a single transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    Up,
    Down,
}

impl ServerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerStatus::Up => "up",
            ServerStatus::Down => "down",
        }
    }

    /// Parse a stored status; anything other than "up" counts as down
    pub fn from_stored(value: &str) -> Self {
        if value == "up" { ServerStatus::Up } else { ServerStatus::Down }
    }

    pub fn is_up(&self) -> bool {
        *self == ServerStatus::Up
    }
}

impl From<bool> for ServerStatus {
    fn from(up: bool) -> Self {
        if up { ServerStatus::Up } else { ServerStatus::Down }
    }
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of probing one server on both transports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Reachability {
    pub tcp_up: bool,
    pub udp_up: bool,
}

impl Reachability {
    pub fn new(tcp_up: bool, udp_up: bool) -> Self {
        Self { tcp_up, udp_up }
    }

    pub fn tcp_status(&self) -> ServerStatus {
        self.tcp_up.into()
    }

    pub fn udp_status(&self) -> ServerStatus {
        self.udp_up.into()
    }

    /// Both transports are unreachable
    pub fn is_down(&self) -> bool {
        !self.tcp_up && !self.udp_up
    }
}

/// Probe `host` over TCP and UDP concurrently
pub async fn probe_host(host: &str, config: &ProbeConfig) -> Reachability {
    let tcp = TcpProber::new(*config);
    let udp = UdpProber::new(*config);

    let (tcp_up, udp_up) = tokio::join!(tcp.probe(host), udp.probe(host));
    Reachability { tcp_up, udp_up }
}

/// Split an optional port off a host string.
///
/// Accepts `name`, `name:port`, bare IPv4/IPv6 literals and `[v6]:port`.
pub(crate) fn split_host_port(host: &str, default_port: u16) -> (String, u16) {
    let host = host.trim();

    if let Ok(addr) = host.parse::<SocketAddr>() {
        return (addr.ip().to_string(), addr.port());
    }

    if let Some(inner) = host.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
        return (inner.to_string(), default_port);
    }

    // More than one colon without brackets is a bare IPv6 literal
    if let Some((name, port)) = host.rsplit_once(':') {
        if !name.contains(':') {
            if let Ok(port) = port.parse::<u16>() {
                return (name.to_string(), port);
            }
        }
    }

    (host.to_string(), default_port)
}

/// Resolve a host string to socket addresses
pub(crate) async fn resolve(host: &str, default_port: u16) -> Result<Vec<SocketAddr>, ProbeError> {
    let (name, port) = split_host_port(host, default_port);

    let addrs: Vec<SocketAddr> = lookup_host((name.as_str(), port))
        .await
        .map_err(|source| ProbeError::Resolve { host: host.to_string(), source })?
        .collect();

    if addrs.is_empty() {
        return Err(ProbeError::NoAddress(host.to_string()));
    }

    Ok(addrs)
}

/// Accept the reply only if it answers `command`
pub(crate) fn expect_command(
    response: ProbeResponse,
    command: Command,
) -> Result<ProbeResponse, ProbeError> {
    if response.is_reply_to(command) {
        Ok(response)
    } else {
        Err(ProbeError::UnexpectedCommand { expected: command.code(), actual: response.command })
    }
}
