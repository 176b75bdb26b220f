//! Monitoring engine module - probes the stored TNFS servers
//!
//! This module is responsible for:
//! - Probing servers over TCP and UDP
//! - Running check cycles over the whole server list
//! - Scheduling cycles until shutdown

pub mod checker;
pub mod executor;
pub mod scheduler;
pub mod types;

pub use checker::TnfsChecker;
pub use executor::CheckCycle;
pub use scheduler::Scheduler;
