//! # Collection-Field Update Engine
//!
//! Atomic-appearing updates of a structured value stored as serialized
//! text in a single column. The cycle is:
//!
//! 1. `SELECT <column>, revision`: absent row fails with `NotFound`,
//!    nothing is written.
//! 2. Decode through the versioned codec. NULL/empty decodes to the
//!    collection's default; malformed non-empty text fails with
//!    `CorruptState`, nothing is written.
//! 3. Apply the caller's mutate closure.
//! 4. Encode and write back with `UPDATE ... SET <column> = ?,
//!    revision = revision + 1 WHERE id = ? AND revision = ?`.
//! 5. Zero rows matched means a concurrent writer won the race between
//!    steps 1 and 4: re-read and retry, bounded, then `Conflict`.
//!
//! No other column is ever touched here. The write either applies
//! atomically at the storage layer or not at all, so a failed write
//! leaves the stored value as it was.

use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use sv_types::{RowId, StoreError, StoreResult};

use crate::codec;

/// Retry budget for the CAS loop. Conflicts on these rows are short
/// (one UPDATE apart), so a handful of attempts is plenty.
pub const MAX_CAS_ATTEMPTS: u32 = 8;

/// Identifies the column a collection lives in. Both names are
/// compile-time constants owned by the repositories; request data never
/// reaches the SQL text.
#[derive(Debug, Clone, Copy)]
pub struct CollectionColumn {
    pub table: &'static str,
    pub column: &'static str,
    /// Entity name used in `NotFound` errors.
    pub entity: &'static str,
}

/// Read-decode-mutate-encode-write a collection column under optimistic
/// revision CAS. Returns the collection as written.
///
/// The mutate closure may run more than once (once per CAS attempt); it
/// must be a pure function of the decoded collection.
pub async fn update_collection_field<C, M>(
    pool: &SqlitePool,
    col: CollectionColumn,
    row_id: RowId,
    mutate: M,
) -> StoreResult<C>
where
    C: Serialize + DeserializeOwned + Default,
    M: Fn(&mut C),
{
    let select_sql = format!(
        "SELECT {}, revision FROM {} WHERE id = ?",
        col.column, col.table
    );
    let update_sql = format!(
        "UPDATE {} SET {} = ?, revision = revision + 1 WHERE id = ? AND revision = ?",
        col.table, col.column
    );

    for attempt in 1..=MAX_CAS_ATTEMPTS {
        let row: Option<(Option<String>, i64)> = sqlx::query_as(&select_sql)
            .bind(row_id)
            .fetch_optional(pool)
            .await?;

        let (raw, revision) = match row {
            Some(r) => r,
            None => return Err(StoreError::not_found(col.entity, row_id)),
        };

        let mut value: C = decode_column(col, row_id, raw.as_deref())?;
        mutate(&mut value);
        let encoded = codec::encode(&value)
            .map_err(|e| StoreError::Write(format!("encode {}.{}: {e}", col.table, col.column)))?;

        let result = sqlx::query(&update_sql)
            .bind(&encoded)
            .bind(row_id)
            .bind(revision)
            .execute(pool)
            .await?;

        if result.rows_affected() == 1 {
            return Ok(value);
        }

        tracing::debug!(
            table = col.table,
            column = col.column,
            row_id,
            attempt,
            "revision moved under us, retrying collection update"
        );
    }

    Err(StoreError::Conflict {
        table: col.table,
        id: row_id,
        attempts: MAX_CAS_ATTEMPTS,
    })
}

/// Decode a collection column, attributing failures to their row.
pub fn decode_column<C>(col: CollectionColumn, row_id: RowId, raw: Option<&str>) -> StoreResult<C>
where
    C: DeserializeOwned + Default,
{
    codec::decode(raw).map_err(|e| StoreError::CorruptState {
        table: col.table,
        column: col.column,
        id: row_id,
        detail: e.to_string(),
    })
}
