//! # SocialVerse Test Suite
//!
//! Unified test crate covering what unit tests in the individual crates
//! cannot: cross-crate flows and genuinely concurrent writers.
//!
//! ## Structure
//!
//! ```text
//! tests/src/integration/
//! ├── concurrency.rs    # Racing writers against one database file
//! ├── http_api.rs       # Full router request/response flows
//! └── scenarios.rs      # Multi-step store flows
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p sv-tests
//! ```

pub mod integration;
