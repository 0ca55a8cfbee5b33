//! NFT ticket repository.
//!
//! Purchase is the guarded-single-write template: the supply decrement
//! happens in one `UPDATE ... WHERE remaining_supply > 0`, and the number
//! of rows affected decides the outcome. The purchase transaction record
//! is only inserted when the guard matched, inside the same SQL
//! transaction, so a `SoldOut` attempt leaves no ledger entry behind.

use chrono::Utc;
use sv_types::{NftTicket, RowId, StoreError, StoreResult};
use uuid::Uuid;

use crate::SocialStore;

/// Input for creating a ticket. `remaining_supply` starts at
/// `total_supply`; there is no way to mint more later.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub event_name: String,
    pub event_date: Option<String>,
    pub venue: Option<String>,
    pub price: Option<f64>,
    pub total_supply: i64,
    pub creator_wallet: Option<String>,
    pub nft_contract_address: Option<String>,
    pub metadata_uri: Option<String>,
}

/// Destination wallet for ticket payments.
const PLATFORM_WALLET: &str = "platform_wallet";

impl SocialStore {
    /// Create a ticket with full remaining supply.
    pub async fn create_ticket(&self, ticket: NewTicket) -> StoreResult<RowId> {
        if ticket.total_supply < 0 {
            return Err(StoreError::Write(format!(
                "total_supply must be non-negative, got {}",
                ticket.total_supply
            )));
        }
        let result = sqlx::query(
            "INSERT INTO nft_tickets
                (event_name, event_date, venue, price, total_supply, remaining_supply,
                 creator_wallet, nft_contract_address, metadata_uri, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&ticket.event_name)
        .bind(&ticket.event_date)
        .bind(&ticket.venue)
        .bind(ticket.price)
        .bind(ticket.total_supply)
        .bind(ticket.total_supply)
        .bind(&ticket.creator_wallet)
        .bind(&ticket.nft_contract_address)
        .bind(&ticket.metadata_uri)
        .bind(Utc::now())
        .execute(self.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Upcoming tickets, soonest event first.
    pub async fn list_tickets(&self) -> StoreResult<Vec<NftTicket>> {
        let tickets = sqlx::query_as::<_, NftTicket>(
            "SELECT * FROM nft_tickets ORDER BY event_date ASC, id ASC",
        )
        .fetch_all(self.pool())
        .await?;
        Ok(tickets)
    }

    /// Purchase one ticket for `buyer_wallet`.
    ///
    /// Returns the remaining supply after the purchase. Fails with
    /// `SoldOut` when the guard matched no row but the ticket exists, or
    /// `NotFound` when it does not.
    pub async fn purchase_ticket(
        &self,
        ticket_id: RowId,
        buyer_wallet: &str,
        amount_paid: f64,
        transaction_hash: Option<String>,
    ) -> StoreResult<i64> {
        let mut tx = self.pool().begin().await.map_err(StoreError::from)?;

        let decrement = sqlx::query(
            "UPDATE nft_tickets
             SET remaining_supply = remaining_supply - 1
             WHERE id = ? AND remaining_supply > 0",
        )
        .bind(ticket_id)
        .execute(&mut *tx)
        .await?;

        if decrement.rows_affected() == 0 {
            // Transaction dropped on return; nothing was written.
            let exists: Option<(i64,)> =
                sqlx::query_as("SELECT id FROM nft_tickets WHERE id = ?")
                    .bind(ticket_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            return Err(match exists {
                Some(_) => StoreError::SoldOut { id: ticket_id },
                None => StoreError::not_found("ticket", ticket_id),
            });
        }

        let hash = transaction_hash
            .unwrap_or_else(|| format!("nft_{}", Uuid::new_v4().simple()));
        sqlx::query(
            "INSERT INTO transactions
                (from_wallet, to_wallet, amount, transaction_hash, transaction_type,
                 related_post_id, status, created_at)
             VALUES (?, ?, ?, ?, 'nft_purchase', ?, 'confirmed', ?)",
        )
        .bind(buyer_wallet)
        .bind(PLATFORM_WALLET)
        .bind(amount_paid)
        .bind(&hash)
        .bind(ticket_id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        let (remaining,): (i64,) =
            sqlx::query_as("SELECT remaining_supply FROM nft_tickets WHERE id = ?")
                .bind(ticket_id)
                .fetch_one(&mut *tx)
                .await?;

        tx.commit().await.map_err(StoreError::from)?;
        tracing::info!(ticket_id, buyer_wallet, remaining, "ticket purchased");
        Ok(remaining)
    }

    /// Tickets a wallet has purchased, via its nft_purchase transactions.
    pub async fn tickets_owned_by(&self, wallet: &str) -> StoreResult<Vec<NftTicket>> {
        let tickets = sqlx::query_as::<_, NftTicket>(
            "SELECT nt.* FROM nft_tickets nt
             JOIN transactions t ON nt.id = t.related_post_id
             WHERE t.from_wallet = ? AND t.transaction_type = 'nft_purchase'
             ORDER BY nt.event_date ASC",
        )
        .bind(wallet)
        .fetch_all(self.pool())
        .await?;
        Ok(tickets)
    }
}
