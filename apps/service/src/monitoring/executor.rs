use anyhow::Result;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tnfs_probe::Reachability;
use tokio::sync::mpsc;

use super::checker::Checker;
use super::types::{CheckResult, CycleReport};
use crate::database::{CheckUpdate, ServerRecord, ServerStore};

/// One pass of probing every stored server and saving the outcome
pub struct CheckCycle {
    store: Arc<dyn ServerStore>,
    checker: Arc<dyn Checker>,
    concurrency: usize,
}

impl CheckCycle {
    pub fn new(store: Arc<dyn ServerStore>, checker: Arc<dyn Checker>, concurrency: usize) -> Self {
        Self { store, checker, concurrency: concurrency.max(1) }
    }

    /// Probe a single host without touching the store
    pub async fn check_server(&self, host: &str) -> Reachability {
        self.checker.check(host).await
    }

    /// Probe all servers and record the results.
    ///
    /// Probes run concurrently and hand their results to a single writer, so
    /// store writes happen one at a time without holding back probes still
    /// in flight. A failed write is counted in the report, it does not abort
    /// the cycle.
    pub async fn run_once(&self) -> Result<CycleReport> {
        let servers = self.store.list_servers().await?;
        tracing::debug!("Checking {} TNFS servers", servers.len());

        let (result_tx, mut result_rx) = mpsc::unbounded_channel();
        let checker = self.checker.clone();
        let concurrency = self.concurrency;

        let probing = async move {
            stream::iter(servers)
                .for_each_concurrent(concurrency, |server| {
                    let checker = checker.clone();
                    let result_tx = result_tx.clone();
                    async move {
                        let reachability = checker.check(&server.server_url).await;
                        let _ = result_tx.send((server, reachability, Utc::now()));
                    }
                })
                .await;
        };

        let recording = async {
            let mut report = CycleReport::default();
            while let Some((server, reachability, checked_at)) = result_rx.recv().await {
                let result = self.save(&server, reachability, checked_at).await;
                report.record(&result);
            }
            report
        };

        let ((), report) = tokio::join!(probing, recording);
        Ok(report)
    }

    async fn save(
        &self,
        server: &ServerRecord,
        reachability: Reachability,
        checked_at: DateTime<Utc>,
    ) -> CheckResult {
        let result =
            CheckResult::new(server.id, server.server_url.clone(), reachability).at(checked_at);
        let update = CheckUpdate::new(reachability, checked_at);

        match self.store.record_check(server.id, update).await {
            Ok(down_since) => {
                tracing::debug!(
                    server_id = result.server_id,
                    target = %result.target,
                    tcp = %reachability.tcp_status(),
                    udp = %reachability.udp_status(),
                    "Recorded check"
                );
                result.with_down_since(down_since)
            }
            Err(e) => {
                tracing::warn!("Failed to record check for {}: {}", result.target, e);
                result.failure(e.to_string())
            }
        }
    }
}
