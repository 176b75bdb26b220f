//! Error types for TNFS probing.
//!
//! These never escape the boolean [`Prober::probe`](crate::Prober::probe)
//! contract; they exist so the typed exchange path can say why a probe failed.

use std::io;
use std::time::Duration;

use thiserror::Error;

use crate::protocol::types::RESPONSE_HEADER_LEN;

/// Failure to decode a response header
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("response too short: got {received} bytes, need at least {}", RESPONSE_HEADER_LEN)]
    TooShort { received: usize },
}

/// Reasons a probe classified a server as down
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to resolve {host}: {source}")]
    Resolve {
        host: String,
        #[source]
        source: io::Error,
    },

    #[error("no address found for {0}")]
    NoAddress(String),

    #[error("connection failed: {0}")]
    Connect(#[source] io::Error),

    #[error("connection timed out after {0:?}")]
    ConnectTimeout(Duration),

    #[error("failed to send request: {0}")]
    Write(#[source] io::Error),

    #[error("failed to receive response: {0}")]
    Read(#[source] io::Error),

    #[error("no response received")]
    NoResponse,

    #[error("malformed response: {0}")]
    Malformed(#[from] ParseError),

    #[error("unexpected command in reply: expected {expected:#04x}, got {actual:#04x}")]
    UnexpectedCommand { expected: u8, actual: u8 },
}

impl ProbeError {
    /// Whether the failure happened before any byte reached the server
    pub fn is_connect_failure(&self) -> bool {
        matches!(
            self,
            ProbeError::Resolve { .. }
                | ProbeError::NoAddress(_)
                | ProbeError::Connect(_)
                | ProbeError::ConnectTimeout(_)
        )
    }
}
