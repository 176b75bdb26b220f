use std::fmt::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tnfs_probe::{Reachability, ServerStatus, format_downtime};

use crate::database::ServerRecord;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A server as shown to users, with the downtime label resolved
#[derive(Debug, Serialize)]
pub struct ServerView<'a> {
    pub id: i64,
    pub server_url: &'a str,
    pub tcp_status: ServerStatus,
    pub udp_status: ServerStatus,
    pub down_since: Option<DateTime<Utc>>,
    /// Empty while the server is reachable
    pub downtime: String,
    pub last_check: DateTime<Utc>,
    pub order_index: i64,
}

impl<'a> ServerView<'a> {
    pub fn new(record: &'a ServerRecord, now: DateTime<Utc>) -> Self {
        Self {
            id: record.id,
            server_url: &record.server_url,
            tcp_status: record.tcp_status,
            udp_status: record.udp_status,
            down_since: record.down_since,
            downtime: format_downtime(record.down_since, now),
            last_check: record.last_check,
            order_index: record.order_index,
        }
    }
}

/// Status table in display order, closed by the time of the last listed check
pub fn render_table(servers: &[ServerRecord], now: DateTime<Utc>) -> String {
    let Some(last) = servers.last() else {
        return "No servers found.\n".to_string();
    };

    let url_width = servers.iter().map(|s| s.server_url.len()).max().unwrap_or(0).max("URL".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:<url_width$}  {:<4}  {:<4}  {:<9}  {}",
        "ID", "URL", "TCP", "UDP", "Downtime", "Last Check"
    );

    for server in servers {
        let _ = writeln!(
            out,
            "{:>4}  {:<url_width$}  {:<4}  {:<4}  {:<9}  {}",
            server.id,
            server.server_url,
            server.tcp_status.as_str(),
            server.udp_status.as_str(),
            format_downtime(server.down_since, now),
            server.last_check.format(TIMESTAMP_FORMAT),
        );
    }

    let _ = writeln!(out, "Last checked TNFS status at {}", last.last_check.format(TIMESTAMP_FORMAT));
    out
}

pub fn render_json(servers: &[ServerRecord], now: DateTime<Utc>) -> serde_json::Result<String> {
    let views: Vec<_> = servers.iter().map(|server| ServerView::new(server, now)).collect();
    serde_json::to_string_pretty(&views)
}

/// One-line result of an ad-hoc probe
pub fn render_probe(host: &str, reachability: Reachability) -> String {
    format!("{host}: TCP {}, UDP {}", reachability.tcp_status(), reachability.udp_status())
}
