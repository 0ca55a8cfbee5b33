//! Voting poll repository.
//!
//! Ballot writes go through the collection-field update engine. The
//! eligibility and option checks read columns that are immutable after
//! poll creation, so validating before the CAS loop is race-free.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sv_types::{Ballot, RowId, StoreError, StoreResult, VotingPoll};

use crate::engine::{self, decode_column, CollectionColumn};
use crate::{codec, SocialStore};

const VOTES: CollectionColumn = CollectionColumn {
    table: "voting_polls",
    column: "votes",
    entity: "poll",
};

const OPTIONS: CollectionColumn = CollectionColumn {
    table: "voting_polls",
    column: "options",
    entity: "poll",
};

const ELIGIBLE_VOTERS: CollectionColumn = CollectionColumn {
    table: "voting_polls",
    column: "eligible_voters",
    entity: "poll",
};

/// Input for creating a poll.
#[derive(Debug, Clone)]
pub struct NewPoll {
    pub title: String,
    pub description: Option<String>,
    pub options: Vec<String>,
    pub creator_wallet: Option<String>,
    /// Empty means the poll is open to any wallet.
    pub eligible_voters: Vec<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_blockchain_verified: bool,
    pub smart_contract_address: Option<String>,
}

/// A poll as served to clients: collection columns decoded.
#[derive(Debug, Clone, Serialize)]
pub struct PollOverview {
    pub id: RowId,
    pub title: String,
    pub description: Option<String>,
    pub options: Vec<String>,
    pub creator_wallet: Option<String>,
    pub eligible_voters: Vec<String>,
    pub votes: Ballot,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_blockchain_verified: bool,
    pub smart_contract_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SocialStore {
    /// Create a poll. The ballot column starts NULL and decodes to an
    /// empty ballot until the first vote.
    pub async fn create_poll(&self, poll: NewPoll) -> StoreResult<RowId> {
        let options = codec::encode(&poll.options)
            .map_err(|e| StoreError::Write(format!("encode options: {e}")))?;
        let eligible = codec::encode(&poll.eligible_voters)
            .map_err(|e| StoreError::Write(format!("encode eligible_voters: {e}")))?;

        let result = sqlx::query(
            "INSERT INTO voting_polls
                (title, description, options, creator_wallet, eligible_voters,
                 start_date, end_date, is_blockchain_verified, smart_contract_address, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&poll.title)
        .bind(&poll.description)
        .bind(&options)
        .bind(&poll.creator_wallet)
        .bind(&eligible)
        .bind(&poll.start_date)
        .bind(&poll.end_date)
        .bind(poll.is_blockchain_verified)
        .bind(&poll.smart_contract_address)
        .bind(Utc::now())
        .execute(self.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// All polls, newest first.
    pub async fn list_polls(&self) -> StoreResult<Vec<VotingPoll>> {
        let polls = sqlx::query_as::<_, VotingPoll>(
            "SELECT * FROM voting_polls ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(self.pool())
        .await?;
        Ok(polls)
    }

    /// All polls with their collection columns decoded.
    pub async fn poll_overviews(&self) -> StoreResult<Vec<PollOverview>> {
        let polls = self.list_polls().await?;
        let mut overviews = Vec::with_capacity(polls.len());
        for poll in polls {
            overviews.push(PollOverview {
                options: decode_column(OPTIONS, poll.id, poll.options.as_deref())?,
                eligible_voters: decode_column(
                    ELIGIBLE_VOTERS,
                    poll.id,
                    poll.eligible_voters.as_deref(),
                )?,
                votes: decode_column(VOTES, poll.id, poll.votes.as_deref())?,
                id: poll.id,
                title: poll.title,
                description: poll.description,
                creator_wallet: poll.creator_wallet,
                start_date: poll.start_date,
                end_date: poll.end_date,
                is_blockchain_verified: poll.is_blockchain_verified,
                smart_contract_address: poll.smart_contract_address,
                created_at: poll.created_at,
            });
        }
        Ok(overviews)
    }

    /// Record a vote. A repeat vote from the same wallet overwrites its
    /// previous choice; the ballot never grows from re-votes.
    ///
    /// A non-empty declared option list restricts choices to it, and a
    /// non-empty eligible-voter list restricts who may vote. Empty lists
    /// leave the respective check open.
    pub async fn record_vote(
        &self,
        poll_id: RowId,
        voter_wallet: &str,
        vote_option: &str,
    ) -> StoreResult<Ballot> {
        let poll: Option<VotingPoll> =
            sqlx::query_as("SELECT * FROM voting_polls WHERE id = ?")
                .bind(poll_id)
                .fetch_optional(self.pool())
                .await?;
        let poll = poll.ok_or_else(|| StoreError::not_found("poll", poll_id))?;

        let options: Vec<String> = decode_column(OPTIONS, poll_id, poll.options.as_deref())?;
        if !options.is_empty() && !options.iter().any(|o| o == vote_option) {
            return Err(StoreError::InvalidOption {
                poll_id,
                option: vote_option.to_string(),
            });
        }

        let eligible: Vec<String> =
            decode_column(ELIGIBLE_VOTERS, poll_id, poll.eligible_voters.as_deref())?;
        if !eligible.is_empty() && !eligible.iter().any(|w| w == voter_wallet) {
            return Err(StoreError::NotEligible {
                poll_id,
                wallet: voter_wallet.to_string(),
            });
        }

        let ballot = engine::update_collection_field::<Ballot, _>(
            self.pool(),
            VOTES,
            poll_id,
            |ballot| ballot.cast(voter_wallet, vote_option),
        )
        .await?;

        tracing::info!(poll_id, voter_wallet, vote_option, voters = ballot.len(), "vote recorded");
        Ok(ballot)
    }

    /// Decode a poll's current ballot.
    pub async fn poll_ballot(&self, poll_id: RowId) -> StoreResult<Ballot> {
        let row: Option<(Option<String>,)> =
            sqlx::query_as("SELECT votes FROM voting_polls WHERE id = ?")
                .bind(poll_id)
                .fetch_optional(self.pool())
                .await?;
        let (raw,) = row.ok_or_else(|| StoreError::not_found("poll", poll_id))?;
        decode_column(VOTES, poll_id, raw.as_deref())
    }
}
