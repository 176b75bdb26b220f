use async_trait::async_trait;
use tnfs_probe::{ProbeConfig, Reachability, probe_host};

/// Checker trait for probing a server on every transport
#[async_trait]
pub trait Checker: Send + Sync {
    /// Probe `target` and report which transports answered
    async fn check(&self, target: &str) -> Reachability;
}

/// TNFS MOUNT handshake checker over TCP and UDP
pub struct TnfsChecker {
    config: ProbeConfig,
}

impl TnfsChecker {
    pub fn new(config: ProbeConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Checker for TnfsChecker {
    async fn check(&self, target: &str) -> Reachability {
        probe_host(target, &self.config).await
    }
}

/// Checker answering from a fixed table, counting every call
#[cfg(test)]
pub struct FixedChecker {
    answers: std::collections::HashMap<String, Reachability>,
    calls: std::sync::atomic::AtomicUsize,
    delay: std::time::Duration,
}

#[cfg(test)]
impl FixedChecker {
    pub fn new<'a>(answers: impl IntoIterator<Item = (&'a str, Reachability)>) -> Self {
        Self {
            answers: answers.into_iter().map(|(host, r)| (host.to_string(), r)).collect(),
            calls: std::sync::atomic::AtomicUsize::new(0),
            delay: std::time::Duration::ZERO,
        }
    }

    /// Answer only after `delay`, like a server near its timeout
    pub fn with_delay(mut self, delay: std::time::Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait]
impl Checker for FixedChecker {
    async fn check(&self, target: &str) -> Reachability {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.answers.get(target).copied().unwrap_or_default()
    }
}
