//! # SocialVerse Store
//!
//! The persistence layer over SQLite.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       SocialStore                        │
//! ├──────────────────────────────────────────────────────────┤
//! │  users │ posts │ transactions │ tickets │ feedback │ ... │  repositories
//! ├──────────────────────────────────────────────────────────┤
//! │            engine: collection-field updates              │  revision CAS
//! │            codec:  versioned column envelope             │  serde_json
//! ├──────────────────────────────────────────────────────────┤
//! │                sqlx SQLite pool (WAL mode)               │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency discipline
//!
//! Two write disciplines cover every mutation of shared state:
//!
//! - **Guarded single write**: conditional numeric changes (ticket supply
//!   decrement, feedback vote counters) happen in one `UPDATE ... WHERE`
//!   whose row count decides the outcome. No read-check-write window.
//! - **Optimistic revision CAS**: arbitrary collection mutations (ballots,
//!   participant sets) go through [`engine::update_collection_field`],
//!   which re-reads and retries when a concurrent writer bumped the row's
//!   `revision` counter first. Lost updates become retries, never silent
//!   overwrites.

pub mod codec;
pub mod engine;
pub mod schema;
pub mod store;

mod feedback;
mod polls;
mod pools;
mod posts;
mod tickets;
mod transactions;
mod users;

pub use feedback::NewFeedback;
pub use polls::{NewPoll, PollOverview};
pub use pools::{NewPool, PoolJoinOutcome, PoolOverview};
pub use posts::{FeedPage, FeedPost, NewPost};
pub use store::SocialStore;
pub use tickets::NewTicket;
pub use transactions::NewTransaction;
