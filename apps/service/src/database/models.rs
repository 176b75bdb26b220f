use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tnfs_probe::{Reachability, ServerStatus, update_downtime};

/// Display position given to newly added servers, after any ordered ones
pub const NEW_SERVER_ORDER_INDEX: i64 = 1000;

/// A monitored TNFS server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRecord {
    pub id: i64,
    pub server_url: String,
    pub last_check: DateTime<Utc>,
    pub tcp_status: ServerStatus,
    pub udp_status: ServerStatus,
    /// First check that found both transports down, cleared on recovery
    pub down_since: Option<DateTime<Utc>>,
    pub order_index: i64,
}

/// Outcome of a check, applied to a record by the store.
///
/// The new "down since" is derived from the value stored at the moment the
/// update is applied, never from an earlier read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckUpdate {
    pub last_check: DateTime<Utc>,
    pub reachability: Reachability,
}

impl CheckUpdate {
    pub fn new(reachability: Reachability, now: DateTime<Utc>) -> Self {
        Self { last_check: now, reachability }
    }

    pub fn tcp_status(&self) -> ServerStatus {
        self.reachability.tcp_status()
    }

    pub fn udp_status(&self) -> ServerStatus {
        self.reachability.udp_status()
    }

    /// "Down since" after this check, given the currently stored value
    pub fn down_since_after(&self, stored: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
        update_downtime(stored, self.reachability.tcp_up, self.reachability.udp_up, self.last_check)
    }
}

/// Convert a stored Unix timestamp; out-of-range values fall back to the epoch
pub fn timestamp_to_datetime(timestamp: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(timestamp, 0).unwrap_or_default()
}
