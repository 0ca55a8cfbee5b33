//! Feedback submission and voting.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use sv_store::NewFeedback;
use sv_types::{FeedbackVote, RowId};

use crate::error::{ApiError, ApiResult};
use crate::service::AppState;

fn default_anonymous() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub content: String,
    pub category: Option<String>,
    #[serde(default = "default_anonymous")]
    pub is_anonymous: bool,
    pub user_wallet: Option<String>,
}

pub async fn submit(
    State(state): State<AppState>,
    Json(req): Json<SubmitRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    if req.content.is_empty() {
        return Err(ApiError::BadRequest("content is required".into()));
    }

    let (feedback_id, verification_hash) = state
        .store
        .submit_feedback(NewFeedback {
            content: req.content,
            category: req.category,
            is_anonymous: req.is_anonymous,
            user_wallet: req.user_wallet,
        })
        .await?;

    Ok(Json(json!({
        "success": true,
        "feedback_id": feedback_id,
        "verification_hash": verification_hash,
        "message": "Feedback submitted successfully",
    })))
}

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    let feedback = state
        .store
        .list_feedback(state.config.limits.list_limit)
        .await?;

    Ok(Json(json!({
        "success": true,
        "feedback": feedback,
    })))
}

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub vote_type: String,
}

pub async fn vote(
    State(state): State<AppState>,
    Path(feedback_id): Path<RowId>,
    Json(req): Json<VoteRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let vote = match req.vote_type.as_str() {
        "upvote" => FeedbackVote::Upvote,
        "downvote" => FeedbackVote::Downvote,
        other => {
            return Err(ApiError::BadRequest(format!(
                "vote_type must be upvote or downvote, got {other:?}"
            )))
        }
    };

    state.store.vote_feedback(feedback_id, vote).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Vote recorded successfully",
    })))
}
