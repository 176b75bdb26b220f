//! Tests for the down-since state transitions

use chrono::{DateTime, Duration, Utc};
use tnfs_probe::{Reachability, update_downtime};

fn now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

#[test]
fn test_update_downtime_sets_on_first_outage() {
    let t = now();
    assert_eq!(update_downtime(None, false, false, t), Some(t));
}

#[test]
fn test_update_downtime_retains_existing() {
    let t0 = now();
    let t1 = t0 + Duration::hours(3);
    assert_eq!(update_downtime(Some(t0), false, false, t1), Some(t0));
}

#[test]
fn test_update_downtime_clears_on_recovery() {
    let t0 = now();
    let t1 = t0 + Duration::hours(3);
    assert_eq!(update_downtime(Some(t0), true, false, t1), None);
}

#[test]
fn test_outage_sequence() {
    let start = now();
    let checks = [
        (Reachability::new(true, true), None),
        (Reachability::new(false, false), Some(start + Duration::hours(1))),
        (Reachability::new(false, false), Some(start + Duration::hours(1))),
        (Reachability::new(false, true), None),
        (Reachability::new(false, false), Some(start + Duration::hours(4))),
    ];

    let mut down_since = None;
    for (hour, (reachability, expected)) in checks.into_iter().enumerate() {
        let at = start + Duration::hours(hour as i64);
        down_since = update_downtime(down_since, reachability.tcp_up, reachability.udp_up, at);
        assert_eq!(down_since, expected, "check {hour}");
        assert_eq!(down_since.is_some(), reachability.is_down());
    }
}
