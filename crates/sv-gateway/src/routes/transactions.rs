//! Transaction ledger endpoints.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use sv_store::NewTransaction;
use sv_types::RowId;

use crate::error::{ApiError, ApiResult};
use crate::service::AppState;

#[derive(Debug, Deserialize)]
pub struct RecordRequest {
    pub from_wallet: String,
    pub to_wallet: String,
    pub amount: f64,
    pub transaction_hash: Option<String>,
    pub transaction_type: Option<String>,
    pub related_post_id: Option<RowId>,
    pub gas_fee: Option<f64>,
    pub status: Option<String>,
}

pub async fn record(
    State(state): State<AppState>,
    Json(req): Json<RecordRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let transaction_id = state
        .store
        .record_transaction(NewTransaction {
            from_wallet: req.from_wallet,
            to_wallet: req.to_wallet,
            amount: req.amount,
            transaction_hash: req.transaction_hash,
            transaction_type: req.transaction_type,
            related_post_id: req.related_post_id,
            gas_fee: req.gas_fee,
            status: req.status,
        })
        .await?;

    Ok(Json(json!({
        "success": true,
        "transaction_id": transaction_id,
        "message": "Transaction recorded successfully",
    })))
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub wallet: Option<String>,
}

pub async fn history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let wallet = query
        .wallet
        .filter(|w| !w.is_empty())
        .ok_or_else(|| ApiError::BadRequest("wallet query parameter is required".into()))?;

    let transactions = state
        .store
        .transaction_history(&wallet, state.config.limits.list_limit)
        .await?;

    Ok(Json(json!({
        "success": true,
        "transactions": transactions,
    })))
}

#[derive(Debug, Deserialize)]
pub struct PaymentRequest {
    pub wallet_address: String,
    pub amount: f64,
    pub transaction_hash: Option<String>,
}

/// Record a posting payment into the configured treasury wallet.
pub async fn payment(
    State(state): State<AppState>,
    Json(req): Json<PaymentRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let transaction_id = state
        .store
        .record_transaction(NewTransaction {
            from_wallet: req.wallet_address,
            to_wallet: state.config.treasury_wallet.clone(),
            amount: req.amount,
            transaction_hash: req.transaction_hash,
            transaction_type: Some("social_posting_payment".to_string()),
            ..NewTransaction::default()
        })
        .await?;

    Ok(Json(json!({
        "success": true,
        "transaction_id": transaction_id,
        "message": "Payment processed successfully",
    })))
}
