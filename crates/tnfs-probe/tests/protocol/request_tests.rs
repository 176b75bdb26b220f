//! Tests for request construction

use tnfs_probe::protocol::types::{TNFS_VERSION_MAJOR, TNFS_VERSION_MINOR};
use tnfs_probe::{Command, build_mount_request, build_unmount_request};

#[test]
fn test_mount_request_is_ten_bytes() {
    let request = build_mount_request();

    assert_eq!(request.len(), 10);
    assert_eq!(request.as_bytes()[3], 0x00);
    assert_eq!(request.as_bytes()[5], 0x02);
}

#[test]
fn test_mount_request_is_deterministic() {
    assert_eq!(build_mount_request(), build_mount_request());
}

#[test]
fn test_mount_request_fields() {
    let request = build_mount_request();
    let bytes = request.as_bytes();

    assert_eq!(&bytes[0..2], &[0x00, 0x00], "session id is unassigned");
    assert_eq!(bytes[2], 0x00, "sequence id");
    assert_eq!(bytes[3], Command::Mount.code());
    assert_eq!(bytes[4], TNFS_VERSION_MINOR);
    assert_eq!(bytes[5], TNFS_VERSION_MAJOR);
    assert_eq!(&bytes[6..8], b"/\0", "mount path");
    assert_eq!(&bytes[8..10], &[0x00, 0x00], "empty user and password");
}

#[test]
fn test_unmount_request_is_big_endian() {
    let request = build_unmount_request(4660);

    assert_eq!(request.command(), Command::Unmount);
    assert_eq!(request.as_bytes(), &[0x12, 0x34, 0x00, 0x01]);
}
