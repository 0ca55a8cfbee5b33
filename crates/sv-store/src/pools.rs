//! Savings pool repository.
//!
//! Joining a pool is two coupled mutations that must land together: the
//! participant set gains the wallet (if absent) and `current_amount`
//! grows by the contribution. Both columns are written in one CAS-guarded
//! `UPDATE` keyed on the row's revision, and the contribution's ledger
//! record is inserted in the same SQL transaction, so a lost CAS race
//! retries the whole cycle and a failed write leaves no half-applied
//! state.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sv_types::{ParticipantSet, RowId, SavingsPool, StoreError, StoreResult};
use uuid::Uuid;

use crate::engine::{decode_column, CollectionColumn, MAX_CAS_ATTEMPTS};
use crate::{codec, SocialStore};

const PARTICIPANTS: CollectionColumn = CollectionColumn {
    table: "savings_pools",
    column: "participants",
    entity: "pool",
};

/// Destination wallet for pool contributions.
const POOL_WALLET: &str = "pool_wallet";

/// Input for creating a pool.
#[derive(Debug, Clone)]
pub struct NewPool {
    pub pool_name: String,
    pub description: Option<String>,
    pub target_amount: f64,
    pub creator_wallet: String,
    pub end_date: Option<String>,
    pub pool_type: Option<String>,
    pub smart_contract_address: Option<String>,
}

/// A pool as served to clients: participant set decoded.
#[derive(Debug, Clone, Serialize)]
pub struct PoolOverview {
    pub id: RowId,
    pub pool_name: String,
    pub description: Option<String>,
    pub target_amount: f64,
    pub current_amount: f64,
    pub creator_wallet: String,
    pub participants: ParticipantSet,
    pub end_date: Option<String>,
    pub pool_type: Option<String>,
    pub smart_contract_address: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Result of a join: whether the wallet was newly added and the pool
/// balance after the contribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoolJoinOutcome {
    pub newly_joined: bool,
    pub current_amount: f64,
}

impl SocialStore {
    /// Create a pool with the creator seeded as the first participant.
    pub async fn create_pool(&self, pool: NewPool) -> StoreResult<RowId> {
        let participants = ParticipantSet::with_creator(&pool.creator_wallet);
        let encoded = codec::encode(&participants)
            .map_err(|e| StoreError::Write(format!("encode participants: {e}")))?;

        let result = sqlx::query(
            "INSERT INTO savings_pools
                (pool_name, description, target_amount, current_amount, creator_wallet,
                 participants, end_date, pool_type, smart_contract_address, created_at)
             VALUES (?, ?, ?, 0, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&pool.pool_name)
        .bind(&pool.description)
        .bind(pool.target_amount)
        .bind(&pool.creator_wallet)
        .bind(&encoded)
        .bind(&pool.end_date)
        .bind(&pool.pool_type)
        .bind(&pool.smart_contract_address)
        .bind(Utc::now())
        .execute(self.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Active pools, newest first.
    pub async fn list_pools(&self) -> StoreResult<Vec<SavingsPool>> {
        let pools = sqlx::query_as::<_, SavingsPool>(
            "SELECT * FROM savings_pools WHERE is_active = 1 ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(self.pool())
        .await?;
        Ok(pools)
    }

    /// Active pools with their participant sets decoded.
    pub async fn pool_overviews(&self) -> StoreResult<Vec<PoolOverview>> {
        let pools = self.list_pools().await?;
        let mut overviews = Vec::with_capacity(pools.len());
        for pool in pools {
            overviews.push(PoolOverview {
                participants: decode_column(PARTICIPANTS, pool.id, pool.participants.as_deref())?,
                id: pool.id,
                pool_name: pool.pool_name,
                description: pool.description,
                target_amount: pool.target_amount,
                current_amount: pool.current_amount,
                creator_wallet: pool.creator_wallet,
                end_date: pool.end_date,
                pool_type: pool.pool_type,
                smart_contract_address: pool.smart_contract_address,
                is_active: pool.is_active,
                created_at: pool.created_at,
            });
        }
        Ok(overviews)
    }

    /// Fetch one pool.
    pub async fn pool_by_id(&self, pool_id: RowId) -> StoreResult<SavingsPool> {
        sqlx::query_as::<_, SavingsPool>("SELECT * FROM savings_pools WHERE id = ?")
            .bind(pool_id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| StoreError::not_found("pool", pool_id))
    }

    /// Join a pool and contribute.
    ///
    /// A wallet already in the set contributes again without being
    /// re-added. Contributions past `target_amount` are permitted;
    /// `current_amount` only grows. Missing pool fails with `NotFound`.
    pub async fn join_pool(
        &self,
        pool_id: RowId,
        participant_wallet: &str,
        contribution_amount: f64,
        transaction_hash: Option<String>,
    ) -> StoreResult<PoolJoinOutcome> {
        if !contribution_amount.is_finite() || contribution_amount < 0.0 {
            return Err(StoreError::Write(format!(
                "contribution must be a non-negative amount, got {contribution_amount}"
            )));
        }

        for attempt in 1..=MAX_CAS_ATTEMPTS {
            let row: Option<(Option<String>, f64, i64)> = sqlx::query_as(
                "SELECT participants, current_amount, revision FROM savings_pools WHERE id = ?",
            )
            .bind(pool_id)
            .fetch_optional(self.pool())
            .await?;

            let (raw, current_amount, revision) = match row {
                Some(r) => r,
                None => return Err(StoreError::not_found("pool", pool_id)),
            };

            let mut participants: ParticipantSet =
                decode_column(PARTICIPANTS, pool_id, raw.as_deref())?;
            let newly_joined = participants.join(participant_wallet);
            let new_amount = current_amount + contribution_amount;
            let encoded = codec::encode(&participants)
                .map_err(|e| StoreError::Write(format!("encode participants: {e}")))?;

            let mut tx = self.pool().begin().await.map_err(StoreError::from)?;

            let update = sqlx::query(
                "UPDATE savings_pools
                 SET participants = ?, current_amount = ?, revision = revision + 1
                 WHERE id = ? AND revision = ?",
            )
            .bind(&encoded)
            .bind(new_amount)
            .bind(pool_id)
            .bind(revision)
            .execute(&mut *tx)
            .await?;

            if update.rows_affected() == 0 {
                // Another contributor got in between our read and write;
                // drop the transaction and re-read.
                drop(tx);
                tracing::debug!(pool_id, attempt, "pool revision moved, retrying join");
                continue;
            }

            let hash = transaction_hash
                .clone()
                .unwrap_or_else(|| format!("pool_{}", Uuid::new_v4().simple()));
            sqlx::query(
                "INSERT INTO transactions
                    (from_wallet, to_wallet, amount, transaction_hash, transaction_type,
                     related_post_id, status, created_at)
                 VALUES (?, ?, ?, ?, 'pool_contribution', ?, 'confirmed', ?)",
            )
            .bind(participant_wallet)
            .bind(POOL_WALLET)
            .bind(contribution_amount)
            .bind(&hash)
            .bind(pool_id)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;

            tx.commit().await.map_err(StoreError::from)?;
            tracing::info!(
                pool_id,
                participant_wallet,
                contribution_amount,
                new_amount,
                newly_joined,
                "pool contribution applied"
            );
            return Ok(PoolJoinOutcome {
                newly_joined,
                current_amount: new_amount,
            });
        }

        Err(StoreError::Conflict {
            table: "savings_pools",
            id: pool_id,
            attempts: MAX_CAS_ATTEMPTS,
        })
    }

    /// Decode a pool's participant set.
    pub async fn pool_participants(&self, pool_id: RowId) -> StoreResult<ParticipantSet> {
        let pool = self.pool_by_id(pool_id).await?;
        decode_column(PARTICIPANTS, pool_id, pool.participants.as_deref())
    }
}
