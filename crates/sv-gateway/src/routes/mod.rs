//! REST route handlers, one module per resource.
//!
//! Every success response carries `"success": true` and every failure
//! goes through `ApiError`, so clients see one envelope shape across
//! the whole surface.

use axum::routing::{get, post};
use axum::Router;

use crate::service::AppState;

mod feedback;
mod polls;
mod pools;
mod posts;
mod social;
mod tickets;
mod transactions;
mod users;

/// Assemble the `/api` router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/users/register", post(users::register))
        .route("/users/authenticate", post(users::authenticate))
        .route("/posts/create", post(posts::create))
        .route("/posts/feed", get(posts::feed))
        .route("/posts", get(posts::list))
        .route("/transactions/record", post(transactions::record))
        .route("/transactions/history", get(transactions::history))
        .route("/transactions/payment", post(transactions::payment))
        .route("/nft-tickets/create", post(tickets::create))
        .route("/nft-tickets/list", get(tickets::list))
        .route("/nft-tickets/purchase", post(tickets::purchase))
        .route("/nft-tickets/my-tickets", get(tickets::my_tickets))
        .route("/feedback/submit", post(feedback::submit))
        .route("/feedback/list", get(feedback::list))
        .route("/feedback/:feedback_id/vote", post(feedback::vote))
        .route("/savings-pools/create", post(pools::create))
        .route("/savings-pools/list", get(pools::list))
        .route("/savings-pools/join", post(pools::join))
        .route("/voting/create", post(polls::create))
        .route("/voting/list", get(polls::list))
        .route("/voting/:poll_id/vote", post(polls::vote))
        .route("/social/post", post(social::post))
}
