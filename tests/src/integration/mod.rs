//! Cross-crate integration tests.

pub mod concurrency;
pub mod http_api;
pub mod scenarios;
