//! Tracing setup shared by the TNFS monitor binaries and tests.

mod subscriber;

pub use subscriber::{LogFormat, init, init_with_level, try_init_test};
