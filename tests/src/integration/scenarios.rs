//! Multi-step flows across store and platform crates.

#[cfg(test)]
mod tests {
    use sv_platforms::PlatformRegistry;
    use sv_store::{NewFeedback, NewPool, NewPoll, NewPost, SocialStore};
    use sv_types::StoreError;

    async fn store() -> SocialStore {
        SocialStore::open_in_memory().await.expect("open store")
    }

    #[tokio::test]
    async fn fanned_out_post_round_trips_through_feed() {
        let store = store().await;
        let user_id = store
            .register_user("0xauthor", Some("author"), None)
            .await
            .expect("register");

        let registry = PlatformRegistry::new();
        let platforms = ["twitter".to_string(), "facebook".to_string()];
        let status = registry
            .publish_all(&platforms, "hello world", "0xauthor")
            .expect("fan out");

        store
            .create_post(NewPost {
                user_id,
                content: "hello world".into(),
                media_urls: vec!["https://img.example/1.png".into()],
                post_type: "text".into(),
                cross_platform_status: status.clone(),
            })
            .await
            .expect("create post");

        let feed = store.feed(1, 10).await.expect("feed");
        assert_eq!(feed.posts.len(), 1);
        let post = &feed.posts[0];
        assert_eq!(post.username.as_deref(), Some("author"));
        assert_eq!(post.media_urls, vec!["https://img.example/1.png"]);
        assert_eq!(post.cross_platform_status, status);
        assert!(!feed.has_more);
    }

    #[tokio::test]
    async fn typo_in_platform_list_fails_whole_fan_out() {
        let registry = PlatformRegistry::new();
        let platforms = ["twitter".to_string(), "twiter".to_string()];
        assert!(registry.publish_all(&platforms, "oops", "0xw").is_err());
    }

    #[tokio::test]
    async fn revote_keeps_only_the_final_choice() {
        let store = store().await;
        let poll_id = store
            .create_poll(NewPoll {
                title: "favorite letter".into(),
                description: None,
                options: vec!["A".into(), "B".into()],
                creator_wallet: None,
                eligible_voters: Vec::new(),
                start_date: None,
                end_date: None,
                is_blockchain_verified: false,
                smart_contract_address: None,
            })
            .await
            .expect("create poll");

        store.record_vote(poll_id, "0xw1", "A").await.expect("first vote");
        let ballot = store.record_vote(poll_id, "0xw1", "B").await.expect("revote");

        assert_eq!(ballot.len(), 1);
        assert_eq!(ballot.0.get("0xw1").map(String::as_str), Some("B"));
    }

    #[tokio::test]
    async fn pool_contributions_may_overshoot_target() {
        let store = store().await;
        let pool_id = store
            .create_pool(NewPool {
                pool_name: "gadget fund".into(),
                description: None,
                target_amount: 100.0,
                creator_wallet: "0xcreator".into(),
                end_date: None,
                pool_type: None,
                smart_contract_address: None,
            })
            .await
            .expect("create pool");

        let first = store
            .join_pool(pool_id, "0xalice", 40.0, None)
            .await
            .expect("first join");
        assert!(first.newly_joined);
        assert_eq!(first.current_amount, 40.0);

        let second = store
            .join_pool(pool_id, "0xalice", 70.0, None)
            .await
            .expect("repeat contribution");
        assert!(!second.newly_joined);
        assert_eq!(second.current_amount, 110.0);

        let participants = store.pool_participants(pool_id).await.expect("participants");
        assert_eq!(participants.len(), 2);
    }

    #[tokio::test]
    async fn joining_a_missing_pool_is_not_found() {
        let store = store().await;
        let err = store
            .join_pool(4242, "0xalice", 5.0, None)
            .await
            .expect_err("missing pool");
        assert!(matches!(err, StoreError::NotFound { entity: "pool", .. }));
    }

    #[tokio::test]
    async fn corrupt_collection_column_is_reported_not_emptied() {
        let store = store().await;
        let pool_id = store
            .create_pool(NewPool {
                pool_name: "broken".into(),
                description: None,
                target_amount: 10.0,
                creator_wallet: "0xcreator".into(),
                end_date: None,
                pool_type: None,
                smart_contract_address: None,
            })
            .await
            .expect("create pool");

        sqlx::query("UPDATE savings_pools SET participants = 'not json' WHERE id = ?")
            .bind(pool_id)
            .execute(store.pool())
            .await
            .expect("inject corruption");

        let err = store
            .join_pool(pool_id, "0xalice", 5.0, None)
            .await
            .expect_err("corrupt column");
        assert!(matches!(err, StoreError::CorruptState { .. }));

        // The broken value is still there for operators to inspect.
        let raw: (Option<String>,) =
            sqlx::query_as("SELECT participants FROM savings_pools WHERE id = ?")
                .bind(pool_id)
                .fetch_one(store.pool())
                .await
                .expect("raw read");
        assert_eq!(raw.0.as_deref(), Some("not json"));
    }

    #[tokio::test]
    async fn anonymous_feedback_never_stores_the_wallet() {
        let store = store().await;
        let (feedback_id, hash) = store
            .submit_feedback(NewFeedback {
                content: "dark mode please".into(),
                category: Some("feature".into()),
                is_anonymous: true,
                user_wallet: Some("0xme".into()),
            })
            .await
            .expect("submit");
        assert_eq!(hash.len(), 64);

        let listed = store.list_feedback(10).await.expect("list");
        let entry = listed.iter().find(|f| f.id == feedback_id).expect("entry");
        assert!(entry.user_wallet.is_none());
        assert_eq!(entry.verification_hash, hash);
    }
}
