//! tnfs-probe - reachability probing for TNFS servers
//!
//! This library decides whether a remote server speaks TNFS (Trebor Network
//! File System) over TCP and UDP by performing the MOUNT handshake, and
//! tracks how long a server has been unreachable on both transports.

pub mod downtime;
pub mod error;
pub mod protocol;
pub mod transport;

// Re-export main types
pub use downtime::{format_downtime, update_downtime};
pub use error::{ParseError, ProbeError};
pub use protocol::{
    Command, ProbeRequest, ProbeResponse, build_mount_request, build_unmount_request,
    parse_response,
};
pub use transport::{
    ProbeConfig, Prober, Reachability, ServerStatus, TcpProber, Transport, UdpProber, probe_host,
};

/// Well-known TNFS port, used by both transports
pub const TNFS_PORT: u16 = 16384;
