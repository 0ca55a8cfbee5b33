//! # SocialVerse REST Gateway
//!
//! The external interface of the backend.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                      SV GATEWAY                            │
//! ├────────────────────────────────────────────────────────────┤
//! │  ┌──────────────────────────────────────────────────────┐  │
//! │  │    Middleware: CORS → Trace → Timeout → BodyLimit    │  │
//! │  └───────────────────────────┬──────────────────────────┘  │
//! │                              │                             │
//! │  ┌───────────────────────────┴──────────────────────────┐  │
//! │  │   Route handlers (users, posts, transactions, ...)   │  │
//! │  └──────┬──────────────────────────────────────┬────────┘  │
//! │         │                                      │           │
//! │   SocialStore (sv-store)            PlatformRegistry       │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers translate requests into store and adapter calls and map
//! typed `StoreError`s to HTTP failure envelopes; no business rule is
//! enforced here.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod service;

pub use auth::Credentials;
pub use config::{ConfigError, GatewayConfig};
pub use error::{ApiError, ApiResult, GatewayError};
pub use service::{build_router, serve, AppState};
