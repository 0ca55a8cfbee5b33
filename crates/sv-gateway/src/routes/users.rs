//! User registration and authentication.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::error::{ApiError, ApiResult};
use crate::service::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub wallet_address: String,
    pub username: Option<String>,
    pub email: Option<String>,
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    if req.wallet_address.is_empty() {
        return Err(ApiError::BadRequest("wallet_address is required".into()));
    }

    let user_id = state
        .store
        .register_user(&req.wallet_address, req.username.as_deref(), req.email.as_deref())
        .await?;

    Ok(Json(json!({
        "success": true,
        "user_id": user_id,
        "message": "User registered successfully",
    })))
}

#[derive(Debug, Deserialize)]
pub struct AuthenticateRequest {
    pub email: String,
    pub password: String,
    pub wallet_address: String,
}

/// Verify the configured credentials and mark the wallet's user row
/// verified. Comparison is constant-time; failure is a plain 401 with
/// no hint about which field was wrong.
pub async fn authenticate(
    State(state): State<AppState>,
    Json(req): Json<AuthenticateRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    if !state.credentials.verify(&req.email, &req.password) {
        return Err(ApiError::Unauthorized);
    }

    let user = state
        .store
        .mark_verified(&req.wallet_address, &req.email)
        .await?;

    Ok(Json(json!({
        "success": true,
        "user": {
            "email": user.email,
            "wallet_address": user.wallet_address,
            "username": user.username,
            "is_verified": true,
        },
        "message": "Authentication successful",
    })))
}
