use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use libsql::{Row, params};
use std::path::Path;
use tnfs_probe::{Reachability, ServerStatus};

use super::models::{CheckUpdate, NEW_SERVER_ORDER_INDEX, ServerRecord, timestamp_to_datetime};
use crate::pool::{LibsqlManager, LibsqlPool, open_pool};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("server {0} not found")]
    NotFound(i64),
}

/// Storage for monitored servers and their last check results
#[async_trait]
pub trait ServerStore: Send + Sync {
    /// All servers in display order (`order_index`, then `id`)
    async fn list_servers(&self) -> Result<Vec<ServerRecord>>;

    /// Get a server by id
    async fn get_server(&self, id: i64) -> Result<Option<ServerRecord>>;

    /// Insert a server together with the result of its first probe
    async fn add_server(
        &self,
        server_url: &str,
        now: DateTime<Utc>,
        reachability: Reachability,
    ) -> Result<ServerRecord>;

    /// Delete a server by id
    async fn delete_server(&self, id: i64) -> Result<()>;

    /// Each id's position in `ids` becomes its `order_index`; unknown ids are ignored
    async fn reorder(&self, ids: &[i64]) -> Result<()>;

    /// Write back the outcome of a check and return the resulting "down since".
    ///
    /// The new value is derived from the stored one within the same atomic
    /// update, so concurrent cycles cannot restore a cleared outage.
    async fn record_check(&self, id: i64, update: CheckUpdate) -> Result<Option<DateTime<Utc>>>;
}

const SELECT_SERVER: &str = "SELECT id, server_url, last_check, tcp_status, udp_status, down_since, order_index FROM tnfs_servers";

/// LibSQL store implementation
pub struct LibsqlStore {
    pool: LibsqlPool,
}

impl LibsqlStore {
    /// Create a store from an existing pool
    pub fn new_from_pool(pool: LibsqlPool) -> Self {
        Self { pool }
    }

    /// Open the database file, apply migrations and return the store
    pub async fn open(path: &Path, pool_size: usize) -> Result<Self> {
        let pool = open_pool(path, pool_size).await?;
        let store = Self::new_from_pool(pool);

        let conn = store.get_conn().await?;
        super::initialize_database(&conn).await?;

        Ok(store)
    }

    /// Get a connection from the pool
    async fn get_conn(&self) -> Result<deadpool::managed::Object<LibsqlManager>> {
        Ok(self.pool.get().await?)
    }
}

fn row_to_record(row: &Row) -> Result<ServerRecord> {
    let last_check: i64 = row.get(2)?;
    let tcp_status: String = row.get(3)?;
    let udp_status: String = row.get(4)?;
    let down_since: Option<i64> = row.get(5)?;

    Ok(ServerRecord {
        id: row.get(0)?,
        server_url: row.get(1)?,
        last_check: timestamp_to_datetime(last_check),
        tcp_status: ServerStatus::from_stored(&tcp_status),
        udp_status: ServerStatus::from_stored(&udp_status),
        down_since: down_since.map(timestamp_to_datetime),
        order_index: row.get(6)?,
    })
}

#[async_trait]
impl ServerStore for LibsqlStore {
    async fn list_servers(&self) -> Result<Vec<ServerRecord>> {
        let conn = self.get_conn().await?;
        let mut stmt = conn
            .prepare(&format!("{SELECT_SERVER} ORDER BY order_index ASC, id ASC"))
            .await?;

        let mut rows = stmt.query(()).await?;
        let mut servers = Vec::new();

        while let Some(row) = rows.next().await? {
            servers.push(row_to_record(&row)?);
        }

        Ok(servers)
    }

    async fn get_server(&self, id: i64) -> Result<Option<ServerRecord>> {
        let conn = self.get_conn().await?;
        let mut stmt = conn.prepare(&format!("{SELECT_SERVER} WHERE id = ?")).await?;
        let mut rows = stmt.query(params![id]).await?;

        match rows.next().await? {
            Some(row) => Ok(Some(row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    async fn add_server(
        &self,
        server_url: &str,
        now: DateTime<Utc>,
        reachability: Reachability,
    ) -> Result<ServerRecord> {
        let update = CheckUpdate::new(reachability, now);
        let down_since = update.down_since_after(None);
        let conn = self.get_conn().await?;

        conn.execute(
            "INSERT INTO tnfs_servers (server_url, last_check, tcp_status, udp_status, down_since, order_index)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                server_url,
                update.last_check.timestamp(),
                update.tcp_status().as_str(),
                update.udp_status().as_str(),
                down_since.map(|since| since.timestamp()),
                NEW_SERVER_ORDER_INDEX,
            ],
        )
        .await?;

        Ok(ServerRecord {
            id: conn.last_insert_rowid(),
            server_url: server_url.to_string(),
            last_check: update.last_check,
            tcp_status: update.tcp_status(),
            udp_status: update.udp_status(),
            down_since,
            order_index: NEW_SERVER_ORDER_INDEX,
        })
    }

    async fn delete_server(&self, id: i64) -> Result<()> {
        let conn = self.get_conn().await?;
        let affected = conn.execute("DELETE FROM tnfs_servers WHERE id = ?", params![id]).await?;

        if affected == 0 {
            return Err(StoreError::NotFound(id).into());
        }

        Ok(())
    }

    async fn reorder(&self, ids: &[i64]) -> Result<()> {
        let conn = self.get_conn().await?;
        let tx = conn.transaction().await?;

        for (position, id) in ids.iter().enumerate() {
            tx.execute(
                "UPDATE tnfs_servers SET order_index = ? WHERE id = ?",
                params![position as i64, *id],
            )
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn record_check(&self, id: i64, update: CheckUpdate) -> Result<Option<DateTime<Utc>>> {
        let conn = self.get_conn().await?;
        let mut rows = conn
            .query(
                "UPDATE tnfs_servers
                 SET last_check = ?1, tcp_status = ?2, udp_status = ?3,
                     down_since = CASE WHEN ?4 THEN COALESCE(down_since, ?1) ELSE NULL END
                 WHERE id = ?5
                 RETURNING down_since",
                params![
                    update.last_check.timestamp(),
                    update.tcp_status().as_str(),
                    update.udp_status().as_str(),
                    update.reachability.is_down() as i64,
                    id,
                ],
            )
            .await?;

        let row = rows.next().await?.ok_or(StoreError::NotFound(id))?;
        let down_since: Option<i64> = row.get(0)?;
        Ok(down_since.map(timestamp_to_datetime))
    }
}
