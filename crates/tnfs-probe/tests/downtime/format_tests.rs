//! Tests for the downtime label

use chrono::{DateTime, Duration, Utc};
use tnfs_probe::format_downtime;

fn now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

#[test]
fn test_format_downtime_hours() {
    let now = now();
    assert_eq!(format_downtime(Some(now - Duration::seconds(3600)), now), "1 hour");
    assert_eq!(format_downtime(Some(now - Duration::seconds(7200)), now), "2 hours");
}

#[test]
fn test_format_downtime_days() {
    let now = now();
    assert_eq!(format_downtime(Some(now - Duration::seconds(90_000)), now), "1 day");
    assert_eq!(format_downtime(Some(now - Duration::seconds(200_000)), now), "2 days");
}

#[test]
fn test_format_downtime_not_down() {
    assert_eq!(format_downtime(None, now()), "");
}

#[test]
fn test_format_downtime_minimum_one_hour() {
    let now = now();
    assert_eq!(format_downtime(Some(now - Duration::minutes(5)), now), "1 hour");
}
