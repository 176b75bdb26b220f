use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tnfs_probe::Reachability;

/// Result of checking one stored server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// Id of the server that was checked
    pub server_id: i64,

    /// Host that was probed
    pub target: String,

    /// When the probe finished
    pub timestamp: DateTime<Utc>,

    /// Which transports answered
    pub reachability: Reachability,

    /// Outage start after applying this result
    pub down_since: Option<DateTime<Utc>>,

    /// Error message if the result could not be stored
    pub error_message: Option<String>,
}

impl CheckResult {
    pub fn new(server_id: i64, target: String, reachability: Reachability) -> Self {
        Self {
            server_id,
            target,
            timestamp: Utc::now(),
            reachability,
            down_since: None,
            error_message: None,
        }
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_down_since(mut self, down_since: Option<DateTime<Utc>>) -> Self {
        self.down_since = down_since;
        self
    }

    /// Mark the result as not persisted
    pub fn failure(mut self, error: String) -> Self {
        self.error_message = Some(error);
        self
    }
}

/// Summary of one pass over the server list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleReport {
    pub checked: usize,
    /// Servers reachable on at least one transport
    pub up: usize,
    pub down: usize,
    pub failed_updates: usize,
}

impl CycleReport {
    pub fn record(&mut self, result: &CheckResult) {
        self.checked += 1;
        if result.reachability.is_down() {
            self.down += 1;
        } else {
            self.up += 1;
        }
        if result.error_message.is_some() {
            self.failed_updates += 1;
        }
    }
}

impl fmt::Display for CycleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "checked {} servers: {} up, {} down", self.checked, self.up, self.down)?;
        if self.failed_updates > 0 {
            write!(f, ", {} not saved", self.failed_updates)?;
        }
        Ok(())
    }
}
