//! Post repository.
//!
//! `media_urls` and `cross_platform_status` go through the versioned
//! codec in both directions: encoded once at insertion, decoded on every
//! feed read. A malformed stored value surfaces as `CorruptState` for its
//! row rather than being shown as an empty collection.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sv_types::{PostingStatus, RowId, StoreResult};

use crate::engine::{decode_column, CollectionColumn};
use crate::{codec, SocialStore};

const MEDIA_URLS: CollectionColumn = CollectionColumn {
    table: "posts",
    column: "media_urls",
    entity: "post",
};

const CROSS_PLATFORM_STATUS: CollectionColumn = CollectionColumn {
    table: "posts",
    column: "cross_platform_status",
    entity: "post",
};

/// Input for creating a post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub user_id: RowId,
    pub content: String,
    pub media_urls: Vec<String>,
    pub post_type: String,
    /// Receipts from the platform fan-out, written once here.
    pub cross_platform_status: PostingStatus,
}

/// A feed entry: post joined with its author, collection columns decoded.
#[derive(Debug, Clone, Serialize)]
pub struct FeedPost {
    pub id: RowId,
    pub content: String,
    pub media_urls: Vec<String>,
    pub post_type: String,
    pub blockchain_hash: Option<String>,
    pub cross_platform_status: PostingStatus,
    pub likes_count: i64,
    pub shares_count: i64,
    pub comments_count: i64,
    pub created_at: DateTime<Utc>,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    pub wallet_address: String,
}

/// One page of the feed.
#[derive(Debug, Clone, Serialize)]
pub struct FeedPage {
    pub posts: Vec<FeedPost>,
    pub page: u32,
    pub has_more: bool,
}

#[derive(sqlx::FromRow)]
struct FeedRow {
    id: RowId,
    content: String,
    media_urls: Option<String>,
    post_type: String,
    blockchain_hash: Option<String>,
    cross_platform_status: Option<String>,
    likes_count: i64,
    shares_count: i64,
    comments_count: i64,
    created_at: DateTime<Utc>,
    username: Option<String>,
    avatar_url: Option<String>,
    wallet_address: String,
}

impl SocialStore {
    /// Insert a post with its collection columns encoded.
    pub async fn create_post(&self, post: NewPost) -> StoreResult<RowId> {
        let media = codec::encode(&post.media_urls)
            .map_err(|e| sv_types::StoreError::Write(format!("encode media_urls: {e}")))?;
        let status = codec::encode(&post.cross_platform_status)
            .map_err(|e| sv_types::StoreError::Write(format!("encode posting status: {e}")))?;

        let result = sqlx::query(
            "INSERT INTO posts (user_id, content, media_urls, post_type, cross_platform_status, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(post.user_id)
        .bind(&post.content)
        .bind(&media)
        .bind(&post.post_type)
        .bind(&status)
        .bind(Utc::now())
        .execute(self.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Newest-first feed page, joined with author info.
    ///
    /// `page` is 1-based to match the client API.
    pub async fn feed(&self, page: u32, per_page: u32) -> StoreResult<FeedPage> {
        let page = page.max(1);
        let offset = (page - 1) as i64 * per_page as i64;

        let rows = sqlx::query_as::<_, FeedRow>(
            "SELECT p.id, p.content, p.media_urls, p.post_type, p.blockchain_hash,
                    p.cross_platform_status, p.likes_count, p.shares_count,
                    p.comments_count, p.created_at,
                    u.username, u.avatar_url, u.wallet_address
             FROM posts p
             JOIN users u ON p.user_id = u.id
             ORDER BY p.created_at DESC, p.id DESC
             LIMIT ? OFFSET ?",
        )
        .bind(per_page as i64)
        .bind(offset)
        .fetch_all(self.pool())
        .await?;

        let has_more = rows.len() as u32 == per_page;
        let mut posts = Vec::with_capacity(rows.len());
        for row in rows {
            posts.push(FeedPost {
                media_urls: decode_column(MEDIA_URLS, row.id, row.media_urls.as_deref())?,
                cross_platform_status: decode_column(
                    CROSS_PLATFORM_STATUS,
                    row.id,
                    row.cross_platform_status.as_deref(),
                )?,
                id: row.id,
                content: row.content,
                post_type: row.post_type,
                blockchain_hash: row.blockchain_hash,
                likes_count: row.likes_count,
                shares_count: row.shares_count,
                comments_count: row.comments_count,
                created_at: row.created_at,
                username: row.username,
                avatar_url: row.avatar_url,
                wallet_address: row.wallet_address,
            });
        }

        Ok(FeedPage {
            posts,
            page,
            has_more,
        })
    }
}
