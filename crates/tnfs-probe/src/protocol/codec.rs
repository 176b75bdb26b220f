//! Encoding of TNFS requests and decoding of response headers.
//!
//! All multi-byte integers on the wire are big-endian.

use super::types::{
    Command, MOUNT_REQUEST_LEN, ProbeRequest, ProbeResponse, RESPONSE_HEADER_LEN,
    TNFS_VERSION_MAJOR, TNFS_VERSION_MINOR,
};
use crate::error::ParseError;

/// Path mounted by the probe
const MOUNT_PATH: &[u8] = b"/";

/// Build the MOUNT request used to prove liveness.
///
/// Layout: session (0), sequence (0), command, version minor, version major,
/// then the NUL-terminated path, user and password. User and password are
/// empty.
pub fn build_mount_request() -> ProbeRequest {
    let mut bytes = Vec::with_capacity(MOUNT_REQUEST_LEN);
    write_header(&mut bytes, 0, Command::Mount);
    bytes.push(TNFS_VERSION_MINOR);
    bytes.push(TNFS_VERSION_MAJOR);
    bytes.extend_from_slice(MOUNT_PATH);
    bytes.push(0);
    bytes.push(0); // user
    bytes.push(0); // password

    ProbeRequest::new(Command::Mount, bytes)
}

/// Build the UNMOUNT request releasing the session opened by a MOUNT
pub fn build_unmount_request(session_id: u16) -> ProbeRequest {
    let mut bytes = Vec::with_capacity(4);
    write_header(&mut bytes, session_id, Command::Unmount);

    ProbeRequest::new(Command::Unmount, bytes)
}

fn write_header(bytes: &mut Vec<u8>, session_id: u16, command: Command) {
    bytes.extend_from_slice(&session_id.to_be_bytes());
    bytes.push(0); // sequence
    bytes.push(command.code());
}

/// Decode the 8-byte response header.
///
/// Bytes beyond the header are ignored. No range checks are done on the
/// version or retry fields; callers only look at the command byte.
pub fn parse_response(bytes: &[u8]) -> Result<ProbeResponse, ParseError> {
    let Some(header) = bytes.get(..RESPONSE_HEADER_LEN) else {
        return Err(ParseError::TooShort { received: bytes.len() });
    };

    let version_minor = header[4];
    let version_major = header[5];

    Ok(ProbeResponse {
        session_id: u16::from_be_bytes([header[0], header[1]]),
        sequence_id: header[2],
        command: header[3],
        server_version: (u16::from(version_major) << 8) | u16::from(version_minor),
        min_retry_time: u16::from_be_bytes([header[6], header[7]]),
    })
}
