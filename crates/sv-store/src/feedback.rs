//! Feedback repository.
//!
//! Vote counters use the same guarded-write discipline as ticket supply:
//! one `UPDATE` whose row count distinguishes success from a missing row.

use chrono::Utc;
use sha2::{Digest, Sha256};
use sv_types::{Feedback, FeedbackVote, RowId, StoreError, StoreResult};

use crate::SocialStore;

/// Input for submitting feedback.
#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub content: String,
    pub category: Option<String>,
    pub is_anonymous: bool,
    /// Dropped when the submission is anonymous.
    pub user_wallet: Option<String>,
}

impl SocialStore {
    /// Submit feedback, returning (row id, verification hash).
    ///
    /// The hash digests content and submission time so an anonymous
    /// submitter can later prove authorship without a stored identity.
    pub async fn submit_feedback(&self, feedback: NewFeedback) -> StoreResult<(RowId, String)> {
        let now = Utc::now();
        let verification_hash = hex::encode(Sha256::digest(
            format!("{}{}", feedback.content, now.to_rfc3339()).as_bytes(),
        ));
        let wallet = if feedback.is_anonymous {
            None
        } else {
            feedback.user_wallet
        };

        let result = sqlx::query(
            "INSERT INTO feedback (content, category, is_anonymous, user_wallet, verification_hash, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&feedback.content)
        .bind(&feedback.category)
        .bind(feedback.is_anonymous)
        .bind(&wallet)
        .bind(&verification_hash)
        .bind(now)
        .execute(self.pool())
        .await?;

        Ok((result.last_insert_rowid(), verification_hash))
    }

    /// Most recent feedback entries.
    pub async fn list_feedback(&self, limit: u32) -> StoreResult<Vec<Feedback>> {
        let entries = sqlx::query_as::<_, Feedback>(
            "SELECT * FROM feedback ORDER BY created_at DESC, id DESC LIMIT ?",
        )
        .bind(limit as i64)
        .fetch_all(self.pool())
        .await?;
        Ok(entries)
    }

    /// Guarded increment of one vote counter.
    pub async fn vote_feedback(&self, feedback_id: RowId, vote: FeedbackVote) -> StoreResult<()> {
        let sql = match vote {
            FeedbackVote::Upvote => "UPDATE feedback SET upvotes = upvotes + 1 WHERE id = ?",
            FeedbackVote::Downvote => "UPDATE feedback SET downvotes = downvotes + 1 WHERE id = ?",
        };
        let result = sqlx::query(sql).bind(feedback_id).execute(self.pool()).await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("feedback", feedback_id));
        }
        Ok(())
    }
}
