//! Append-only customer audit trail.
//!
//! Entries are never updated or deleted, and they deliberately outlive their
//! customer (no foreign key), so the trail survives record removal.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use wavelink_core::{CustomerId, HistoryEntryId};

use super::RepositoryError;
use crate::models::customer::{CustomerHistoryEntry, FieldChange};

/// Internal row type for `PostgreSQL` history queries.
#[derive(Debug, sqlx::FromRow)]
struct HistoryRow {
    id: Uuid,
    customer_id: Uuid,
    changes: serde_json::Value,
    updated_by: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<HistoryRow> for CustomerHistoryEntry {
    type Error = RepositoryError;

    fn try_from(row: HistoryRow) -> Result<Self, Self::Error> {
        let changes: Vec<FieldChange> = serde_json::from_value(row.changes).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid change set in database: {e}"))
        })?;

        Ok(Self {
            id: HistoryEntryId::new(row.id),
            customer_id: CustomerId::new(row.customer_id),
            changes,
            updated_by: row.updated_by,
            created_at: row.created_at,
        })
    }
}

/// Append one audit entry recording the deltas of a single update.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails.
/// Returns `RepositoryError::DataCorruption` if the change set cannot be
/// serialized to JSON.
pub async fn insert_entry(
    pool: &PgPool,
    customer_id: CustomerId,
    changes: &[FieldChange],
    updated_by: &str,
) -> Result<CustomerHistoryEntry, RepositoryError> {
    let changes_json = serde_json::to_value(changes).map_err(|e| {
        RepositoryError::DataCorruption(format!("unserializable change set: {e}"))
    })?;

    let row = sqlx::query_as::<_, HistoryRow>(
        r"
        INSERT INTO billing.customer_history (customer_id, changes, updated_by)
        VALUES ($1, $2, $3)
        RETURNING id, customer_id, changes, updated_by, created_at
        ",
    )
    .bind(customer_id)
    .bind(changes_json)
    .bind(updated_by)
    .fetch_one(pool)
    .await?;

    row.try_into()
}

/// All audit entries for one customer, newest first.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
/// Returns `RepositoryError::DataCorruption` if a stored change set is
/// invalid.
pub async fn list_for_customer(
    pool: &PgPool,
    customer_id: CustomerId,
) -> Result<Vec<CustomerHistoryEntry>, RepositoryError> {
    let rows = sqlx::query_as::<_, HistoryRow>(
        r"
        SELECT id, customer_id, changes, updated_by, created_at
        FROM billing.customer_history
        WHERE customer_id = $1
        ORDER BY created_at DESC
        ",
    )
    .bind(customer_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(TryInto::try_into).collect()
}
