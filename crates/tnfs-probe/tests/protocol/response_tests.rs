//! Tests for response header parsing

use tnfs_probe::{Command, ParseError, parse_response};

#[test]
fn test_parse_fails_below_header_length() {
    let buffer = [0xFFu8; 7];

    for len in 0..=7 {
        let result = parse_response(&buffer[..len]);
        assert_eq!(result, Err(ParseError::TooShort { received: len }), "length {len}");
    }
}

#[test]
fn test_parse_well_formed_mount_reply() {
    let response = parse_response(&[0x12, 0x34, 0x00, 0x00, 0x00, 0x02, 0x00, 0x05]).unwrap();

    assert_eq!(response.session_id, 4660);
    assert_eq!(response.sequence_id, 0);
    assert_eq!(response.command, 0);
    assert_eq!(response.server_version, 512);
    assert_eq!(response.min_retry_time, 5);
    assert!(response.is_reply_to(Command::Mount));
    assert!(!response.is_reply_to(Command::Unmount));
}

#[test]
fn test_parse_does_not_validate_ranges() {
    let response = parse_response(&[0xFF; 8]).unwrap();

    assert_eq!(response.session_id, 0xFFFF);
    assert_eq!(response.command, 0xFF);
    assert_eq!(response.server_version, 0xFFFF);
    assert_eq!(response.min_retry_time, 0xFFFF);
}

#[test]
fn test_parse_error_message() {
    let err = parse_response(&[0x00; 3]).unwrap_err();
    assert_eq!(err.to_string(), "response too short: got 3 bytes, need at least 8");
}
