/// Transport tests
pub mod end_to_end_tests;
pub mod mock;
pub mod tcp_tests;
pub mod udp_tests;
