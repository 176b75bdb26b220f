//! Protocol type definitions for TNFS probing.

use std::fmt;

/// Protocol version sent in MOUNT requests
pub const TNFS_VERSION_MAJOR: u8 = 2;
pub const TNFS_VERSION_MINOR: u8 = 0;

/// Length of the response header shared by every TNFS reply
pub const RESPONSE_HEADER_LEN: usize = 8;

/// Length of the MOUNT request built by the prober
pub const MOUNT_REQUEST_LEN: usize = 10;

/// TNFS commands used by the liveness handshake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Command {
    Mount = 0x00,
    Unmount = 0x01,
}

impl Command {
    /// Wire value of the command byte
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Mount => write!(f, "MOUNT"),
            Command::Unmount => write!(f, "UNMOUNT"),
        }
    }
}

/// An encoded request, ready to be written to a socket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    command: Command,
    bytes: Vec<u8>,
}

impl ProbeRequest {
    pub(crate) fn new(command: Command, bytes: Vec<u8>) -> Self {
        Self { command, bytes }
    }

    pub fn command(&self) -> Command {
        self.command
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl AsRef<[u8]> for ProbeRequest {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Decoded TNFS response header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeResponse {
    /// Session assigned by the server, needed to address an UNMOUNT
    pub session_id: u16,

    pub sequence_id: u8,

    /// Echoes the request's command on success
    pub command: u8,

    /// Major version in the high byte, minor version in the low byte
    pub server_version: u16,

    /// Minimum retry interval advertised by the server
    pub min_retry_time: u16,
}

impl ProbeResponse {
    /// Server protocol version as `(major, minor)`
    pub fn version(&self) -> (u8, u8) {
        ((self.server_version >> 8) as u8, (self.server_version & 0xff) as u8)
    }

    /// Whether this header answers the given command
    pub fn is_reply_to(&self, command: Command) -> bool {
        self.command == command.code()
    }
}

impl fmt::Display for ProbeResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (major, minor) = self.version();
        write!(
            f,
            "session={:#06x} seq={} cmd={:#04x} version={}.{} retry={}",
            self.session_id, self.sequence_id, self.command, major, minor, self.min_retry_time
        )
    }
}
