//! User repository.

use chrono::Utc;
use sv_types::{RowId, StoreError, StoreResult, User};

use crate::SocialStore;

impl SocialStore {
    /// Register a new user. Duplicate wallet or username is a client
    /// error, not a silent upsert.
    pub async fn register_user(
        &self,
        wallet_address: &str,
        username: Option<&str>,
        email: Option<&str>,
    ) -> StoreResult<RowId> {
        let result = sqlx::query(
            "INSERT INTO users (wallet_address, username, email, is_verified, created_at)
             VALUES (?, ?, ?, 0, ?)",
        )
        .bind(wallet_address)
        .bind(username)
        .bind(email)
        .bind(Utc::now())
        .execute(self.pool())
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => StoreError::Duplicate {
                entity: "user",
                detail: format!("wallet or username already registered: {wallet_address}"),
            },
            other => other.into(),
        })?;

        Ok(result.last_insert_rowid())
    }

    /// Look up a user by wallet address.
    pub async fn user_by_wallet(&self, wallet_address: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE wallet_address = ?")
            .bind(wallet_address)
            .fetch_optional(self.pool())
            .await?;
        Ok(user)
    }

    /// Create or update the wallet's user row as verified, after a
    /// successful credential check. Keeps an existing username.
    pub async fn mark_verified(
        &self,
        wallet_address: &str,
        email: &str,
    ) -> StoreResult<User> {
        let fallback_username = default_username(wallet_address);
        sqlx::query(
            "INSERT INTO users (wallet_address, username, email, is_verified, created_at)
             VALUES (?, ?, ?, 1, ?)
             ON CONFLICT(wallet_address) DO UPDATE SET
                email = excluded.email,
                is_verified = 1",
        )
        .bind(wallet_address)
        .bind(&fallback_username)
        .bind(email)
        .bind(Utc::now())
        .execute(self.pool())
        .await?;

        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE wallet_address = ?")
            .bind(wallet_address)
            .fetch_one(self.pool())
            .await?;
        Ok(user)
    }
}

/// Derived display name for wallets that never chose one.
fn default_username(wallet: &str) -> String {
    let tail: String = wallet
        .chars()
        .rev()
        .take(6)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("User_{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn register_then_lookup() {
        let store = SocialStore::open_in_memory().await.unwrap();
        let id = store
            .register_user("0xw1", Some("alice"), Some("a@example.com"))
            .await
            .unwrap();
        let user = store.user_by_wallet("0xw1").await.unwrap().unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.username.as_deref(), Some("alice"));
        assert!(!user.is_verified);
    }

    #[tokio::test]
    async fn duplicate_wallet_rejected() {
        let store = SocialStore::open_in_memory().await.unwrap();
        store.register_user("0xw1", None, None).await.unwrap();
        let err = store.register_user("0xw1", None, None).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { entity: "user", .. }));
    }

    #[tokio::test]
    async fn mark_verified_upserts_and_keeps_username() {
        let store = SocialStore::open_in_memory().await.unwrap();
        store
            .register_user("0xwallet99", Some("bob"), None)
            .await
            .unwrap();
        let user = store.mark_verified("0xwallet99", "b@example.com").await.unwrap();
        assert!(user.is_verified);
        assert_eq!(user.username.as_deref(), Some("bob"));
        assert_eq!(user.email.as_deref(), Some("b@example.com"));

        // Unknown wallet gets a fresh verified row with a derived name.
        let fresh = store.mark_verified("0xabcdef", "c@example.com").await.unwrap();
        assert_eq!(fresh.username.as_deref(), Some("User_abcdef"));
    }
}
