//! Request/response flows through the full router.
//!
//! Each test drives the real middleware and handler stack with
//! `tower::ServiceExt::oneshot` against an in-memory store.

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use sv_gateway::{build_router, AppState, Credentials, GatewayConfig};
    use sv_store::SocialStore;
    use tower::ServiceExt;

    const EMAIL: &str = "admin@socialverse.test";
    const PASSWORD: &str = "correct horse";

    async fn app() -> Router {
        let store = SocialStore::open_in_memory().await.expect("open store");
        let digest = Credentials::digest("pepper", PASSWORD);
        let credentials = Credentials::new(EMAIL, "pepper", digest);
        build_router(AppState::new(store, credentials, GatewayConfig::default()))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = match body {
            Some(json) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("request"),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .expect("request"),
        };
        let response = app.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, value)
    }

    #[tokio::test]
    async fn health_reports_liveness() {
        let app = app().await;
        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected() {
        let app = app().await;
        let payload = json!({"wallet_address": "0xw1", "username": "sam"});

        let (status, body) = send(&app, "POST", "/api/users/register", Some(payload.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert!(body["user_id"].is_i64());

        let (status, body) = send(&app, "POST", "/api/users/register", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn authentication_verifies_the_wallet() {
        let app = app().await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/users/authenticate",
            Some(json!({"email": EMAIL, "password": "wrong", "wallet_address": "0xw1"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);

        let (status, body) = send(
            &app,
            "POST",
            "/api/users/authenticate",
            Some(json!({"email": EMAIL, "password": PASSWORD, "wallet_address": "0xw1"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["user"]["is_verified"], true);
        assert_eq!(body["user"]["wallet_address"], "0xw1");
    }

    #[tokio::test]
    async fn posting_for_an_unknown_wallet_is_not_found() {
        let app = app().await;
        let (status, body) = send(
            &app,
            "POST",
            "/api/posts/create",
            Some(json!({"content": "hi", "user_wallet": "0xghost", "cross_post": false})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn created_posts_show_up_in_the_feed() {
        let app = app().await;
        send(
            &app,
            "POST",
            "/api/users/register",
            Some(json!({"wallet_address": "0xw1", "username": "sam"})),
        )
        .await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/posts/create",
            Some(json!({
                "content": "hello feed",
                "user_wallet": "0xw1",
                "platforms": ["twitter"],
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert!(body["cross_platform_status"]["twitter"]["external_post_id"]
            .as_str()
            .is_some_and(|id| id.starts_with("tw_")));

        let (status, body) = send(&app, "GET", "/api/posts/feed?page=1&limit=10", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["posts"].as_array().map(Vec::len), Some(1));
        assert_eq!(body["posts"][0]["content"], "hello feed");
        assert_eq!(body["posts"][0]["username"], "sam");
    }

    #[tokio::test]
    async fn unknown_platform_is_a_client_error() {
        let app = app().await;
        send(
            &app,
            "POST",
            "/api/users/register",
            Some(json!({"wallet_address": "0xw1"})),
        )
        .await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/social/post",
            Some(json!({"platform": "myspace", "content": "hi", "wallet_address": "0xw1"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn social_post_records_payment_and_post() {
        let app = app().await;
        send(
            &app,
            "POST",
            "/api/users/register",
            Some(json!({"wallet_address": "0xw1"})),
        )
        .await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/social/post",
            Some(json!({"platform": "linkedin", "content": "hi", "wallet_address": "0xw1"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["platform"], "linkedin");
        assert!(body["url"].as_str().is_some_and(|u| u.contains("linkedin.com")));

        let (status, body) = send(&app, "GET", "/api/transactions/history?wallet=0xw1", None).await;
        assert_eq!(status, StatusCode::OK);
        let txs = body["transactions"].as_array().expect("transactions");
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0]["transaction_type"], "social_posting_payment");
        assert_eq!(txs[0]["amount"], 0.002);
    }

    #[tokio::test]
    async fn sold_out_tickets_conflict_over_http() {
        let app = app().await;
        let (_, body) = send(
            &app,
            "POST",
            "/api/nft-tickets/create",
            Some(json!({"event_name": "launch", "total_supply": 1, "price": 2.5})),
        )
        .await;
        let ticket_id = body["ticket_id"].as_i64().expect("ticket id");

        let purchase = json!({
            "ticket_id": ticket_id,
            "buyer_wallet": "0xbuyer",
            "amount_paid": 2.5,
        });
        let (status, body) = send(&app, "POST", "/api/nft-tickets/purchase", Some(purchase.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["remaining_supply"], 0);

        let (status, body) = send(&app, "POST", "/api/nft-tickets/purchase", Some(purchase)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn feedback_vote_type_is_validated() {
        let app = app().await;
        let (_, body) = send(
            &app,
            "POST",
            "/api/feedback/submit",
            Some(json!({"content": "more cats"})),
        )
        .await;
        let feedback_id = body["feedback_id"].as_i64().expect("feedback id");

        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/feedback/{feedback_id}/vote"),
            Some(json!({"vote_type": "sideways"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/feedback/{feedback_id}/vote"),
            Some(json!({"vote_type": "upvote"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (_, body) = send(&app, "GET", "/api/feedback/list", None).await;
        assert_eq!(body["feedback"][0]["upvotes"], 1);
    }

    #[tokio::test]
    async fn votes_outside_the_declared_options_are_rejected() {
        let app = app().await;
        let (_, body) = send(
            &app,
            "POST",
            "/api/voting/create",
            Some(json!({
                "title": "logo color",
                "options": ["red", "blue"],
                "eligible_voters": ["0xmember"],
            })),
        )
        .await;
        let poll_id = body["poll_id"].as_i64().expect("poll id");

        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/voting/{poll_id}/vote"),
            Some(json!({"user_wallet": "0xmember", "vote_option": "green"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/voting/{poll_id}/vote"),
            Some(json!({"user_wallet": "0xoutsider", "vote_option": "red"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/voting/{poll_id}/vote"),
            Some(json!({"user_wallet": "0xmember", "vote_option": "red"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_voters"], 1);

        let (_, body) = send(&app, "GET", "/api/voting/list", None).await;
        assert_eq!(body["polls"][0]["votes"]["0xmember"], "red");
    }

    #[tokio::test]
    async fn pool_join_flow_over_http() {
        let app = app().await;
        let (_, body) = send(
            &app,
            "POST",
            "/api/savings-pools/create",
            Some(json!({
                "pool_name": "trip",
                "target_amount": 100.0,
                "creator_wallet": "0xcreator",
            })),
        )
        .await;
        let pool_id = body["pool_id"].as_i64().expect("pool id");

        let (status, body) = send(
            &app,
            "POST",
            "/api/savings-pools/join",
            Some(json!({
                "pool_id": pool_id,
                "participant_wallet": "0xalice",
                "contribution_amount": 25.0,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["newly_joined"], true);
        assert_eq!(body["current_amount"], 25.0);

        let (_, body) = send(&app, "GET", "/api/savings-pools/list", None).await;
        let participants = body["pools"][0]["participants"].as_array().expect("participants");
        assert_eq!(participants.len(), 2);
    }
}
