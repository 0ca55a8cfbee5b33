//! Single-platform simulated posting with per-platform charges.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use sv_platforms::Platform;
use sv_store::{NewPost, NewTransaction};
use sv_types::PostingStatus;

use crate::error::{ApiError, ApiResult};
use crate::service::AppState;

#[derive(Debug, Deserialize)]
pub struct SocialPostRequest {
    pub platform: String,
    pub content: String,
    pub wallet_address: String,
    pub transaction_hash: Option<String>,
}

/// Charge the platform fee, simulate the post, and persist it with its
/// receipt. The author must already be registered; an unknown wallet is
/// a 404, never a silently dropped post.
pub async fn post(
    State(state): State<AppState>,
    Json(req): Json<SocialPostRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let platform = Platform::parse(&req.platform)?;

    let user = state
        .store
        .user_by_wallet(&req.wallet_address)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    state
        .store
        .record_transaction(NewTransaction {
            from_wallet: req.wallet_address.clone(),
            to_wallet: state.config.treasury_wallet.clone(),
            amount: platform.posting_charge(),
            transaction_hash: req.transaction_hash,
            transaction_type: Some("social_posting_payment".to_string()),
            ..NewTransaction::default()
        })
        .await?;

    let receipt = state
        .platforms
        .publish(platform, &req.content, &req.wallet_address);

    let mut status = PostingStatus::default();
    status.record(receipt.clone());

    state
        .store
        .create_post(NewPost {
            user_id: user.id,
            content: req.content,
            media_urls: Vec::new(),
            post_type: "cross_platform".to_string(),
            cross_platform_status: status,
        })
        .await?;

    Ok(Json(json!({
        "success": true,
        "platform": platform.name(),
        "post_id": receipt.external_post_id,
        "url": receipt.url,
        "message": format!("Successfully posted to {}", platform.name()),
    })))
}
