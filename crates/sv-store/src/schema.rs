//! # Schema Migration
//!
//! Idempotent table creation, run once at store open. Timestamps are
//! RFC 3339 TEXT written by the application (not SQLite defaults, whose
//! format chrono cannot round-trip). Rows carrying a mutable collection
//! column also carry a `revision` counter for the optimistic CAS in the
//! update engine.

use sqlx::SqlitePool;

const TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        wallet_address TEXT UNIQUE NOT NULL,
        username TEXT UNIQUE,
        email TEXT,
        avatar_url TEXT,
        bio TEXT,
        is_verified INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS posts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users(id),
        content TEXT NOT NULL,
        media_urls TEXT,
        post_type TEXT NOT NULL DEFAULT 'text',
        blockchain_hash TEXT,
        cross_platform_status TEXT,
        likes_count INTEGER NOT NULL DEFAULT 0,
        shares_count INTEGER NOT NULL DEFAULT 0,
        comments_count INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS transactions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        from_wallet TEXT NOT NULL,
        to_wallet TEXT NOT NULL,
        amount REAL NOT NULL,
        transaction_hash TEXT UNIQUE,
        transaction_type TEXT,
        related_post_id INTEGER,
        gas_fee REAL,
        status TEXT NOT NULL DEFAULT 'pending',
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS nft_tickets (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        event_name TEXT NOT NULL,
        event_date TEXT,
        venue TEXT,
        price REAL,
        total_supply INTEGER NOT NULL,
        remaining_supply INTEGER NOT NULL,
        creator_wallet TEXT,
        nft_contract_address TEXT,
        metadata_uri TEXT,
        created_at TEXT NOT NULL,
        CHECK (remaining_supply >= 0 AND remaining_supply <= total_supply)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS feedback (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        content TEXT NOT NULL,
        category TEXT,
        is_anonymous INTEGER NOT NULL DEFAULT 1,
        user_wallet TEXT,
        verification_hash TEXT NOT NULL,
        upvotes INTEGER NOT NULL DEFAULT 0,
        downvotes INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS savings_pools (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        pool_name TEXT NOT NULL,
        description TEXT,
        target_amount REAL NOT NULL DEFAULT 0,
        current_amount REAL NOT NULL DEFAULT 0,
        creator_wallet TEXT NOT NULL,
        participants TEXT,
        end_date TEXT,
        pool_type TEXT,
        smart_contract_address TEXT,
        is_active INTEGER NOT NULL DEFAULT 1,
        revision INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS voting_polls (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        description TEXT,
        options TEXT,
        creator_wallet TEXT,
        eligible_voters TEXT,
        votes TEXT,
        start_date TEXT,
        end_date TEXT,
        is_blockchain_verified INTEGER NOT NULL DEFAULT 0,
        smart_contract_address TEXT,
        revision INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL
    )
    "#,
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_posts_created ON posts(created_at DESC)",
    "CREATE INDEX IF NOT EXISTS idx_tx_from ON transactions(from_wallet)",
    "CREATE INDEX IF NOT EXISTS idx_tx_to ON transactions(to_wallet)",
    "CREATE INDEX IF NOT EXISTS idx_tx_type ON transactions(transaction_type)",
];

/// Create all tables and indexes if they do not exist yet.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for ddl in TABLES.iter().chain(INDEXES) {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::debug!(tables = TABLES.len(), "schema migration complete");
    Ok(())
}
