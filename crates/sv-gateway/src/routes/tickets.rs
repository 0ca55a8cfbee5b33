//! NFT event ticket endpoints.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use sv_store::NewTicket;
use sv_types::RowId;

use crate::error::{ApiError, ApiResult};
use crate::service::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTicketRequest {
    pub event_name: String,
    pub event_date: Option<String>,
    pub venue: Option<String>,
    pub price: Option<f64>,
    pub total_supply: i64,
    pub creator_wallet: Option<String>,
    pub nft_contract_address: Option<String>,
    pub metadata_uri: Option<String>,
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateTicketRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    if req.total_supply < 0 {
        return Err(ApiError::BadRequest("total_supply must be non-negative".into()));
    }

    let ticket_id = state
        .store
        .create_ticket(NewTicket {
            event_name: req.event_name,
            event_date: req.event_date,
            venue: req.venue,
            price: req.price,
            total_supply: req.total_supply,
            creator_wallet: req.creator_wallet,
            nft_contract_address: req.nft_contract_address,
            metadata_uri: req.metadata_uri,
        })
        .await?;

    Ok(Json(json!({
        "success": true,
        "ticket_id": ticket_id,
        "message": "NFT ticket created successfully",
    })))
}

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    let tickets = state.store.list_tickets().await?;
    Ok(Json(json!({
        "success": true,
        "tickets": tickets,
    })))
}

#[derive(Debug, Deserialize)]
pub struct PurchaseRequest {
    /// Older clients send `event_id`.
    #[serde(alias = "event_id")]
    pub ticket_id: RowId,
    pub buyer_wallet: String,
    pub amount_paid: f64,
    pub transaction_hash: Option<String>,
}

pub async fn purchase(
    State(state): State<AppState>,
    Json(req): Json<PurchaseRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let remaining_supply = state
        .store
        .purchase_ticket(
            req.ticket_id,
            &req.buyer_wallet,
            req.amount_paid,
            req.transaction_hash,
        )
        .await?;

    Ok(Json(json!({
        "success": true,
        "remaining_supply": remaining_supply,
        "message": "Ticket purchased successfully",
    })))
}

#[derive(Debug, Deserialize)]
pub struct MyTicketsQuery {
    pub wallet: Option<String>,
}

pub async fn my_tickets(
    State(state): State<AppState>,
    Query(query): Query<MyTicketsQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let wallet = query
        .wallet
        .filter(|w| !w.is_empty())
        .ok_or_else(|| ApiError::BadRequest("wallet query parameter is required".into()))?;

    let tickets = state.store.tickets_owned_by(&wallet).await?;

    Ok(Json(json!({
        "success": true,
        "tickets": tickets,
    })))
}
