//! Post creation and feed reads.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use sv_store::NewPost;
use sv_types::PostingStatus;

use crate::error::{ApiError, ApiResult};
use crate::service::AppState;

fn default_post_type() -> String {
    "text".to_string()
}

fn default_cross_post() -> bool {
    true
}

fn default_platforms() -> Vec<String> {
    ["twitter", "instagram", "facebook", "youtube"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
    pub user_wallet: String,
    #[serde(default)]
    pub media_urls: Vec<String>,
    #[serde(default = "default_post_type")]
    pub post_type: String,
    #[serde(default = "default_cross_post")]
    pub cross_post: bool,
    #[serde(default = "default_platforms")]
    pub platforms: Vec<String>,
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreatePostRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let user = state
        .store
        .user_by_wallet(&req.user_wallet)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    let status = if req.cross_post {
        state
            .platforms
            .publish_all(&req.platforms, &req.content, &req.user_wallet)?
    } else {
        PostingStatus::default()
    };

    let post_id = state
        .store
        .create_post(NewPost {
            user_id: user.id,
            content: req.content,
            media_urls: req.media_urls,
            post_type: req.post_type,
            cross_platform_status: status.clone(),
        })
        .await?;

    Ok(Json(json!({
        "success": true,
        "post_id": post_id,
        "cross_platform_status": status,
        "message": "Post created successfully",
    })))
}

#[derive(Debug, Deserialize, Default)]
pub struct FeedQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub per_page: Option<u32>,
}

pub async fn feed(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let limits = &state.config.limits;
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query
        .limit
        .unwrap_or(limits.default_page_size)
        .clamp(1, limits.max_page_size);

    let feed = state.store.feed(page, per_page).await?;

    Ok(Json(json!({
        "success": true,
        "posts": feed.posts,
        "page": feed.page,
    })))
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let limits = &state.config.limits;
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query
        .per_page
        .unwrap_or(limits.default_page_size)
        .clamp(1, limits.max_page_size);

    let feed = state.store.feed(page, per_page).await?;

    Ok(Json(json!({
        "success": true,
        "posts": feed.posts,
        "page": feed.page,
        "has_more": feed.has_more,
    })))
}
