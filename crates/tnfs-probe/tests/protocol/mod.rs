/// Protocol module tests
pub mod request_tests;
pub mod response_tests;
