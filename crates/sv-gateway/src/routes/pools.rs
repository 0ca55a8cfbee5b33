//! Savings pool endpoints.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use sv_store::NewPool;
use sv_types::RowId;

use crate::error::{ApiError, ApiResult};
use crate::service::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePoolRequest {
    pub pool_name: String,
    pub description: Option<String>,
    pub target_amount: f64,
    pub creator_wallet: String,
    pub end_date: Option<String>,
    pub pool_type: Option<String>,
    pub smart_contract_address: Option<String>,
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreatePoolRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    if req.creator_wallet.is_empty() {
        return Err(ApiError::BadRequest("creator_wallet is required".into()));
    }

    let pool_id = state
        .store
        .create_pool(NewPool {
            pool_name: req.pool_name,
            description: req.description,
            target_amount: req.target_amount,
            creator_wallet: req.creator_wallet,
            end_date: req.end_date,
            pool_type: req.pool_type,
            smart_contract_address: req.smart_contract_address,
        })
        .await?;

    Ok(Json(json!({
        "success": true,
        "pool_id": pool_id,
        "message": "Savings pool created successfully",
    })))
}

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    let pools = state.store.pool_overviews().await?;
    Ok(Json(json!({
        "success": true,
        "pools": pools,
    })))
}

#[derive(Debug, Deserialize)]
pub struct JoinRequest {
    pub pool_id: RowId,
    pub participant_wallet: String,
    pub contribution_amount: f64,
    pub transaction_hash: Option<String>,
}

pub async fn join(
    State(state): State<AppState>,
    Json(req): Json<JoinRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let outcome = state
        .store
        .join_pool(
            req.pool_id,
            &req.participant_wallet,
            req.contribution_amount,
            req.transaction_hash,
        )
        .await?;

    Ok(Json(json!({
        "success": true,
        "newly_joined": outcome.newly_joined,
        "current_amount": outcome.current_amount,
        "message": "Joined savings pool successfully",
    })))
}
