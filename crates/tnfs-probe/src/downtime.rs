//! Downtime tracking.
//!
//! A server is "down since" the first check that found both transports
//! unreachable. The timestamp is kept across consecutive fully-down checks and
//! cleared as soon as either transport answers again.

use chrono::{DateTime, Utc};

const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_DAY: i64 = 86_400;

/// Compute the new "down since" value after a check.
///
/// - both transports down, not yet marked: `now`
/// - both transports down, already marked: unchanged
/// - either transport up: `None`
pub fn update_downtime(
    previous_down_since: Option<DateTime<Utc>>,
    tcp_up: bool,
    udp_up: bool,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    if tcp_up || udp_up {
        return None;
    }

    Some(previous_down_since.unwrap_or(now))
}

/// Coarse human label for how long a server has been down.
///
/// Whole hours (at least 1) during the first day, whole days after that.
/// Returns an empty string when the server is not down.
pub fn format_downtime(down_since: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(down_since) = down_since else {
        return String::new();
    };

    // A down_since in the future (clock adjustment) counts as just gone down
    let elapsed = (now - down_since).num_seconds().max(0);

    if elapsed < SECONDS_PER_DAY {
        let hours = (elapsed / SECONDS_PER_HOUR).max(1);
        with_unit(hours, "hour")
    } else {
        with_unit(elapsed / SECONDS_PER_DAY, "day")
    }
}

fn with_unit(count: i64, unit: &str) -> String {
    if count > 1 { format!("{count} {unit}s") } else { format!("{count} {unit}") }
}
