use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tnfs_probe::Reachability;
use tokio::sync::RwLock;

use super::models::{CheckUpdate, NEW_SERVER_ORDER_INDEX, ServerRecord};
use super::repository::{ServerStore, StoreError};

/// In-memory store for tests
#[derive(Default)]
pub struct MemoryStore {
    servers: RwLock<Vec<ServerRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ServerStore for MemoryStore {
    async fn list_servers(&self) -> Result<Vec<ServerRecord>> {
        let mut servers = self.servers.read().await.clone();
        servers.sort_by_key(|server| (server.order_index, server.id));
        Ok(servers)
    }

    async fn get_server(&self, id: i64) -> Result<Option<ServerRecord>> {
        let servers = self.servers.read().await;
        Ok(servers.iter().find(|server| server.id == id).cloned())
    }

    async fn add_server(
        &self,
        server_url: &str,
        now: DateTime<Utc>,
        reachability: Reachability,
    ) -> Result<ServerRecord> {
        let update = CheckUpdate::new(reachability, now);
        let mut servers = self.servers.write().await;
        let id = servers.iter().map(|server| server.id).max().unwrap_or(0) + 1;

        let record = ServerRecord {
            id,
            server_url: server_url.to_string(),
            last_check: update.last_check,
            tcp_status: update.tcp_status(),
            udp_status: update.udp_status(),
            down_since: update.down_since_after(None),
            order_index: NEW_SERVER_ORDER_INDEX,
        };
        servers.push(record.clone());
        Ok(record)
    }

    async fn delete_server(&self, id: i64) -> Result<()> {
        let mut servers = self.servers.write().await;
        let before = servers.len();
        servers.retain(|server| server.id != id);

        if servers.len() == before {
            return Err(StoreError::NotFound(id).into());
        }
        Ok(())
    }

    async fn reorder(&self, ids: &[i64]) -> Result<()> {
        let mut servers = self.servers.write().await;
        for (position, id) in ids.iter().enumerate() {
            if let Some(server) = servers.iter_mut().find(|server| server.id == *id) {
                server.order_index = position as i64;
            }
        }
        Ok(())
    }

    async fn record_check(&self, id: i64, update: CheckUpdate) -> Result<Option<DateTime<Utc>>> {
        let mut servers = self.servers.write().await;
        let server = servers
            .iter_mut()
            .find(|server| server.id == id)
            .ok_or(StoreError::NotFound(id))?;

        server.last_check = update.last_check;
        server.tcp_status = update.tcp_status();
        server.udp_status = update.udp_status();
        server.down_since = update.down_since_after(server.down_since);
        Ok(server.down_since)
    }
}
