//! # Core Domain Entities
//!
//! One struct per relational table, derived `sqlx::FromRow` so repository
//! queries map straight onto them.
//!
//! ## Clusters
//!
//! - **Identity**: `User`
//! - **Content**: `Post`, `Feedback`
//! - **Value**: `Transaction`, `NftTicket`, `SavingsPool`
//! - **Governance**: `VotingPoll`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A wallet identity. Wallets are opaque strings supplied by clients;
/// no on-chain verification happens in this backend.
pub type Wallet = String;

/// Surrogate row identifier used by every table.
pub type RowId = i64;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// A registered user, keyed by wallet address.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Surrogate key.
    pub id: RowId,
    /// Unique wallet address.
    pub wallet_address: Wallet,
    /// Unique display name, if chosen.
    pub username: Option<String>,
    /// Contact email, if supplied.
    pub email: Option<String>,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
    /// Free-form profile text.
    pub bio: Option<String>,
    /// Set after successful credential verification.
    pub is_verified: bool,
    /// Row creation time (UTC).
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// CLUSTER B: CONTENT
// =============================================================================

/// A post. `media_urls` and `cross_platform_status` are serialized
/// collection columns; the raw text is carried here and decoded by the
/// store's codec, never exposed undecoded to API clients.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: RowId,
    /// Author row id.
    pub user_id: RowId,
    pub content: String,
    /// Serialized `Vec<String>` column (may be NULL).
    pub media_urls: Option<String>,
    /// One of: text, image, video, nft, cross_platform.
    pub post_type: String,
    /// Reserved for future chain anchoring; always NULL in this backend.
    pub blockchain_hash: Option<String>,
    /// Serialized `PostingStatus` column (may be NULL). Written once at
    /// post creation, never re-mutated.
    pub cross_platform_status: Option<String>,
    pub likes_count: i64,
    pub shares_count: i64,
    pub comments_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Community feedback, optionally anonymous. The verification hash lets a
/// submitter later prove authorship of an anonymous entry.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Feedback {
    pub id: RowId,
    pub content: String,
    pub category: Option<String>,
    pub is_anonymous: bool,
    /// NULL when the submission is anonymous.
    pub user_wallet: Option<Wallet>,
    /// SHA-256 digest over content and submission time.
    pub verification_hash: String,
    pub upvotes: i64,
    pub downvotes: i64,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// CLUSTER C: VALUE
// =============================================================================

/// A recorded token transaction. Purely bookkeeping; nothing is submitted
/// to a chain.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Transaction {
    pub id: RowId,
    pub from_wallet: Wallet,
    pub to_wallet: Wallet,
    pub amount: f64,
    /// Unique external hash, if the client supplied one.
    pub transaction_hash: Option<String>,
    /// One of: tip, payment, purchase, savings, nft_purchase,
    /// pool_contribution, social_posting_payment.
    pub transaction_type: Option<String>,
    pub related_post_id: Option<RowId>,
    pub gas_fee: Option<f64>,
    /// pending or confirmed.
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// An event ticket with finite supply.
///
/// Invariant: `0 <= remaining_supply <= total_supply` at all times.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct NftTicket {
    pub id: RowId,
    pub event_name: String,
    pub event_date: Option<String>,
    pub venue: Option<String>,
    pub price: Option<f64>,
    pub total_supply: i64,
    pub remaining_supply: i64,
    pub creator_wallet: Option<Wallet>,
    pub nft_contract_address: Option<String>,
    pub metadata_uri: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A pooled-savings goal.
///
/// `participants` is a serialized `ParticipantSet` column; the creator is
/// its first element at creation time. `current_amount` only grows (there
/// is no withdrawal operation).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SavingsPool {
    pub id: RowId,
    pub pool_name: String,
    pub description: Option<String>,
    pub target_amount: f64,
    pub current_amount: f64,
    pub creator_wallet: Wallet,
    /// Serialized `ParticipantSet` column.
    pub participants: Option<String>,
    pub end_date: Option<String>,
    /// One of: goal_based, time_based, rotating.
    pub pool_type: Option<String>,
    pub smart_contract_address: Option<String>,
    pub is_active: bool,
    /// Optimistic concurrency counter, bumped on every collection write.
    pub revision: i64,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// CLUSTER D: GOVERNANCE
// =============================================================================

/// A poll. `options`, `eligible_voters`, and `votes` are serialized
/// collection columns.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct VotingPoll {
    pub id: RowId,
    pub title: String,
    pub description: Option<String>,
    /// Serialized `Vec<String>` of declared options.
    pub options: Option<String>,
    pub creator_wallet: Option<Wallet>,
    /// Serialized `Vec<Wallet>`; empty means the poll is open to all.
    pub eligible_voters: Option<String>,
    /// Serialized `Ballot` column.
    pub votes: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_blockchain_verified: bool,
    pub smart_contract_address: Option<String>,
    /// Optimistic concurrency counter, bumped on every ballot write.
    pub revision: i64,
    pub created_at: DateTime<Utc>,
}

/// Kind of a feedback vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackVote {
    Upvote,
    Downvote,
}
