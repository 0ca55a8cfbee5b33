//! Concurrent-writer tests against a file-backed database.
//!
//! In-memory SQLite gives each connection its own database, so these
//! tests use a real file in a temp directory to get genuinely racing
//! connections from one pool.

#[cfg(test)]
mod tests {
    use sv_store::{NewPool, NewPoll, NewTicket, SocialStore};
    use sv_types::StoreError;
    use tempfile::TempDir;

    async fn file_store() -> (TempDir, SocialStore) {
        let dir = TempDir::new().expect("temp dir");
        let store = SocialStore::open(dir.path().join("test.db"))
            .await
            .expect("open store");
        (dir, store)
    }

    fn test_pool(creator: &str) -> NewPool {
        NewPool {
            pool_name: "vacation fund".into(),
            description: None,
            target_amount: 100.0,
            creator_wallet: creator.into(),
            end_date: None,
            pool_type: None,
            smart_contract_address: None,
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_pool_joins_lose_neither_contribution() {
        let (_dir, store) = file_store().await;
        let pool_id = store.create_pool(test_pool("0xcreator")).await.expect("create");

        let (a, b) = tokio::join!(
            store.join_pool(pool_id, "0xalice", 40.0, None),
            store.join_pool(pool_id, "0xbob", 70.0, None),
        );
        a.expect("alice joins");
        b.expect("bob joins");

        let participants = store.pool_participants(pool_id).await.expect("participants");
        assert!(participants.contains("0xalice"));
        assert!(participants.contains("0xbob"));
        assert_eq!(participants.len(), 3);

        let pool = store.pool_by_id(pool_id).await.expect("pool");
        assert_eq!(pool.current_amount, 110.0);

        // Both contributions made it to the ledger.
        let alice_txs = store.transaction_history("0xalice", 10).await.expect("history");
        let bob_txs = store.transaction_history("0xbob", 10).await.expect("history");
        assert_eq!(alice_txs.len(), 1);
        assert_eq!(bob_txs.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn last_ticket_sells_exactly_once() {
        let (_dir, store) = file_store().await;
        let ticket_id = store
            .create_ticket(NewTicket {
                event_name: "launch party".into(),
                event_date: None,
                venue: None,
                price: Some(1.0),
                total_supply: 1,
                creator_wallet: None,
                nft_contract_address: None,
                metadata_uri: None,
            })
            .await
            .expect("create ticket");

        let (a, b) = tokio::join!(
            store.purchase_ticket(ticket_id, "0xalice", 1.0, None),
            store.purchase_ticket(ticket_id, "0xbob", 1.0, None),
        );

        let outcomes = [a, b];
        let successes = outcomes.iter().filter(|r| r.is_ok()).count();
        let sold_out = outcomes
            .iter()
            .filter(|r| matches!(r, Err(StoreError::SoldOut { .. })))
            .count();
        assert_eq!(successes, 1);
        assert_eq!(sold_out, 1);

        // The winner drained the supply and is the only ledger entry.
        if let Ok(remaining) = &outcomes[0] {
            assert_eq!(*remaining, 0);
        }
        let alice = store.tickets_owned_by("0xalice").await.expect("alice");
        let bob = store.tickets_owned_by("0xbob").await.expect("bob");
        assert_eq!(alice.len() + bob.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_votes_are_all_retained() {
        let (_dir, store) = file_store().await;
        let poll_id = store
            .create_poll(NewPoll {
                title: "snack budget".into(),
                description: None,
                options: vec!["yes".into(), "no".into()],
                creator_wallet: None,
                eligible_voters: Vec::new(),
                start_date: None,
                end_date: None,
                is_blockchain_verified: false,
                smart_contract_address: None,
            })
            .await
            .expect("create poll");

        let voters: Vec<String> = (0..6).map(|i| format!("0xvoter{i}")).collect();
        let votes = voters
            .iter()
            .map(|w| store.record_vote(poll_id, w, "yes"));
        let results = futures::future::join_all(votes).await;
        for result in results {
            result.expect("vote recorded");
        }

        let ballot = store.poll_ballot(poll_id).await.expect("ballot");
        assert_eq!(ballot.len(), voters.len());
        for voter in &voters {
            assert_eq!(ballot.0.get(voter).map(String::as_str), Some("yes"));
        }
    }
}
