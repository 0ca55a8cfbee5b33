//! # Error Types
//!
//! Defines the error taxonomy shared between the store and the gateway.

use thiserror::Error;

/// Errors that can occur in the persistence layer.
///
/// Every variant is surfaced to the request handler as a typed result;
/// nothing is silently swallowed. Decode failures are deliberately
/// distinct from "never written": only a genuinely NULL/empty column
/// decodes to an empty collection.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Row absent for the requested operation.
    #[error("{entity} not found: id {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// Stored collection text is non-empty but cannot be decoded.
    #[error("corrupt {column} column on {table} row {id}: {detail}")]
    CorruptState {
        table: &'static str,
        column: &'static str,
        id: i64,
        detail: String,
    },

    /// The persistence layer rejected or failed a write.
    #[error("store write failed: {0}")]
    Write(String),

    /// Guarded supply decrement found no eligible row.
    #[error("ticket {id} is sold out")]
    SoldOut { id: i64 },

    /// Optimistic concurrency guard lost the race too many times.
    #[error("concurrent update conflict on {table} row {id} after {attempts} attempts")]
    Conflict {
        table: &'static str,
        id: i64,
        attempts: u32,
    },

    /// Voter wallet is outside the poll's eligible-voter list.
    #[error("wallet {wallet} is not eligible to vote on poll {poll_id}")]
    NotEligible { poll_id: i64, wallet: String },

    /// Chosen option is not among the poll's declared options.
    #[error("option {option:?} is not declared on poll {poll_id}")]
    InvalidOption { poll_id: i64, option: String },

    /// Unique constraint violation (wallet or username already taken).
    #[error("duplicate {entity}: {detail}")]
    Duplicate {
        entity: &'static str,
        detail: String,
    },
}

impl StoreError {
    /// Shorthand for a missing row.
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Duplicate {
                entity: "row",
                detail: db.message().to_string(),
            },
            _ => StoreError::Write(e.to_string()),
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
