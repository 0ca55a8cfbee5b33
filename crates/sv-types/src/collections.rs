//! # Collection Value Types
//!
//! The semantic types behind serialized collection columns. Each is owned
//! by exactly one parent row and is rebuilt from column text on every
//! read, so these are plain value types with no interior mutability.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-poll mapping from voter wallet to chosen option.
///
/// Invariant: each wallet maps to at most one option; a repeated vote from
/// the same wallet overwrites, never duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ballot(pub BTreeMap<String, String>);

impl Ballot {
    /// Record a vote, overwriting any previous choice by the same wallet.
    pub fn cast(&mut self, voter: impl Into<String>, option: impl Into<String>) {
        self.0.insert(voter.into(), option.into());
    }

    /// Number of distinct voters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when nobody has voted yet.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Tally of votes per option.
    pub fn tally(&self) -> BTreeMap<&str, usize> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for option in self.0.values() {
            *counts.entry(option.as_str()).or_default() += 1;
        }
        counts
    }
}

/// Per-pool ordered set of contributing wallets.
///
/// Insertion order is preserved (the creator stays first); duplicates are
/// rejected at insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantSet(pub Vec<String>);

impl ParticipantSet {
    /// Seed the set with the pool creator as the first participant.
    pub fn with_creator(creator: impl Into<String>) -> Self {
        Self(vec![creator.into()])
    }

    /// Append a wallet only if it is not already present. Returns whether
    /// the wallet was newly added.
    pub fn join(&mut self, wallet: &str) -> bool {
        if self.contains(wallet) {
            return false;
        }
        self.0.push(wallet.to_string());
        true
    }

    /// Membership check.
    pub fn contains(&self, wallet: &str) -> bool {
        self.0.iter().any(|w| w == wallet)
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the set has no participants.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Receipt returned by a platform adapter for one simulated external post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformReceipt {
    /// Platform name (twitter, facebook, ...).
    pub platform: String,
    /// Synthetic external post identifier.
    pub external_post_id: String,
    /// Synthetic permalink on the platform.
    pub url: String,
    /// When the simulated post was made (UTC).
    pub timestamp: DateTime<Utc>,
}

/// Per-post mapping from platform name to its posting receipt.
///
/// Written once when the post is created; never re-mutated afterward.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostingStatus(pub BTreeMap<String, PlatformReceipt>);

impl PostingStatus {
    /// Attach a receipt under its platform name.
    pub fn record(&mut self, receipt: PlatformReceipt) {
        self.0.insert(receipt.platform.clone(), receipt);
    }

    /// True when no platform was posted to.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ballot_revote_overwrites() {
        let mut ballot = Ballot::default();
        ballot.cast("w1", "A");
        ballot.cast("w1", "B");
        assert_eq!(ballot.len(), 1);
        assert_eq!(ballot.0.get("w1").map(String::as_str), Some("B"));
    }

    #[test]
    fn ballot_tally_counts_per_option() {
        let mut ballot = Ballot::default();
        ballot.cast("w1", "A");
        ballot.cast("w2", "A");
        ballot.cast("w3", "B");
        let tally = ballot.tally();
        assert_eq!(tally.get("A"), Some(&2));
        assert_eq!(tally.get("B"), Some(&1));
    }

    #[test]
    fn participant_set_rejects_duplicates() {
        let mut set = ParticipantSet::with_creator("c1");
        assert!(set.join("w2"));
        assert!(!set.join("w2"));
        assert!(!set.join("c1"));
        assert_eq!(set.0, vec!["c1".to_string(), "w2".to_string()]);
    }

    #[test]
    fn posting_status_keyed_by_platform() {
        let mut status = PostingStatus::default();
        status.record(PlatformReceipt {
            platform: "twitter".into(),
            external_post_id: "tw_abc123".into(),
            url: "https://twitter.com/user/status/tw_abc123".into(),
            timestamp: Utc::now(),
        });
        assert!(status.0.contains_key("twitter"));
        assert!(!status.is_empty());
    }
}
