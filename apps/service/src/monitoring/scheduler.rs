use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

use super::executor::CheckCycle;

/// Monitoring scheduler - runs a check cycle on a fixed interval
pub struct Scheduler {
    cycle: Arc<CheckCycle>,
    period: Duration,
}

impl Scheduler {
    /// Create a new scheduler
    pub fn new(cycle: Arc<CheckCycle>, period: Duration) -> Self {
        Self { cycle, period }
    }

    /// Run cycles until `shutdown` turns true or its sender is dropped.
    ///
    /// The first cycle starts immediately. A cycle in progress is finished
    /// before shutdown is observed.
    pub fn spawn(self, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut timer = interval(self.period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = timer.tick() => {
                        match self.cycle.run_once().await {
                            Ok(report) => tracing::info!("Check cycle finished: {}", report),
                            Err(e) => tracing::error!("Check cycle failed: {}", e),
                        }
                    }
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            tracing::info!("Scheduler stopping");
                            break;
                        }
                    }
                }
            }
        })
    }
}
