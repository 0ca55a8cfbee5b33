//! Transaction ledger repository. Plain inserts and selects; the
//! interesting writes (ticket purchase, pool contribution) construct
//! their records in `tickets.rs` and `pools.rs` under the same SQL
//! transaction as the guarded update they belong to.

use chrono::Utc;
use sv_types::{RowId, StoreResult, Transaction};

use crate::SocialStore;

/// Input for recording a transaction.
#[derive(Debug, Clone, Default)]
pub struct NewTransaction {
    pub from_wallet: String,
    pub to_wallet: String,
    pub amount: f64,
    pub transaction_hash: Option<String>,
    pub transaction_type: Option<String>,
    pub related_post_id: Option<RowId>,
    pub gas_fee: Option<f64>,
    /// Defaults to "confirmed" when empty, matching the public record API.
    pub status: Option<String>,
}

impl SocialStore {
    /// Record a transaction.
    pub async fn record_transaction(&self, tx: NewTransaction) -> StoreResult<RowId> {
        let result = sqlx::query(
            "INSERT INTO transactions
                (from_wallet, to_wallet, amount, transaction_hash, transaction_type,
                 related_post_id, gas_fee, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&tx.from_wallet)
        .bind(&tx.to_wallet)
        .bind(tx.amount)
        .bind(&tx.transaction_hash)
        .bind(&tx.transaction_type)
        .bind(tx.related_post_id)
        .bind(tx.gas_fee)
        .bind(tx.status.as_deref().unwrap_or("confirmed"))
        .bind(Utc::now())
        .execute(self.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Most recent transactions touching a wallet, either side.
    pub async fn transaction_history(
        &self,
        wallet: &str,
        limit: u32,
    ) -> StoreResult<Vec<Transaction>> {
        let txs = sqlx::query_as::<_, Transaction>(
            "SELECT * FROM transactions
             WHERE from_wallet = ? OR to_wallet = ?
             ORDER BY created_at DESC, id DESC
             LIMIT ?",
        )
        .bind(wallet)
        .bind(wallet)
        .bind(limit as i64)
        .fetch_all(self.pool())
        .await?;
        Ok(txs)
    }
}
