//! Protocol module for TNFS probing.
//!
//! Only the subset of TNFS needed to prove liveness lives here: the MOUNT and
//! UNMOUNT requests and the fixed 8-byte response header.

pub mod codec;
pub mod types;

pub use codec::{build_mount_request, build_unmount_request, parse_response};
pub use types::{Command, ProbeRequest, ProbeResponse};
