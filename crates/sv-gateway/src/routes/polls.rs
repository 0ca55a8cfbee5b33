//! Voting poll endpoints.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use sv_store::NewPoll;
use sv_types::RowId;

use crate::error::{ApiError, ApiResult};
use crate::service::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePollRequest {
    pub title: String,
    pub description: Option<String>,
    pub options: Vec<String>,
    pub creator_wallet: Option<String>,
    #[serde(default)]
    pub eligible_voters: Vec<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default)]
    pub is_blockchain_verified: bool,
    pub smart_contract_address: Option<String>,
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreatePollRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    if req.title.is_empty() {
        return Err(ApiError::BadRequest("title is required".into()));
    }

    let poll_id = state
        .store
        .create_poll(NewPoll {
            title: req.title,
            description: req.description,
            options: req.options,
            creator_wallet: req.creator_wallet,
            eligible_voters: req.eligible_voters,
            start_date: req.start_date,
            end_date: req.end_date,
            is_blockchain_verified: req.is_blockchain_verified,
            smart_contract_address: req.smart_contract_address,
        })
        .await?;

    Ok(Json(json!({
        "success": true,
        "poll_id": poll_id,
        "message": "Voting poll created successfully",
    })))
}

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    let polls = state.store.poll_overviews().await?;
    Ok(Json(json!({
        "success": true,
        "polls": polls,
    })))
}

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub user_wallet: String,
    pub vote_option: String,
}

pub async fn vote(
    State(state): State<AppState>,
    Path(poll_id): Path<RowId>,
    Json(req): Json<VoteRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let ballot = state
        .store
        .record_vote(poll_id, &req.user_wallet, &req.vote_option)
        .await?;

    Ok(Json(json!({
        "success": true,
        "total_voters": ballot.len(),
        "message": "Vote recorded successfully",
    })))
}
