//! Customer repository for database operations.
//!
//! Queries are bound at runtime so the crate builds without a live database;
//! row shapes are checked by the `CustomerRow` conversion instead.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use wavelink_core::{CustomerId, MonthKey, PackageKind, PaymentStatus};

use super::RepositoryError;
use crate::models::customer::{Customer, CustomerBucket, CustomerUpdate};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` customer queries.
#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: Uuid,
    name: String,
    phone: String,
    package: PackageKind,
    price: Decimal,
    days: i32,
    payment_status: PaymentStatus,
    month: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = RepositoryError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let month = MonthKey::parse(&row.month).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid month in database: {e}"))
        })?;

        Ok(Self {
            id: CustomerId::new(row.id),
            name: row.name,
            phone: row.phone,
            package: row.package,
            price: row.price,
            days: row.days,
            payment_status: row.payment_status,
            month,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Parameters for inserting a customer record.
///
/// Fields are already validated and the price already snapshotted by the
/// service layer.
#[derive(Debug)]
pub struct CreateCustomer {
    pub name: String,
    pub phone: String,
    pub package: PackageKind,
    pub price: Decimal,
    pub days: i32,
    pub payment_status: PaymentStatus,
    pub month: MonthKey,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for customer database operations.
pub struct CustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new customer record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the `(phone, month)` unique
    /// constraint fires (a concurrent create won the race).
    /// Returns `RepositoryError::Database` for any other query failure.
    pub async fn create(&self, params: CreateCustomer) -> Result<Customer, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r"
            INSERT INTO billing.customer
                (name, phone, package, price, days, payment_status, month)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, phone, package, price, days, payment_status,
                      month, created_at, updated_at
            ",
        )
        .bind(&params.name)
        .bind(&params.phone)
        .bind(params.package)
        .bind(params.price)
        .bind(params.days)
        .bind(params.payment_status)
        .bind(&params.month)
        .fetch_one(self.pool)
        .await
        .map_err(RepositoryError::from_insert)?;

        row.try_into()
    }

    /// Get a customer by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the row is invalid.
    pub async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r"
            SELECT id, name, phone, package, price, days, payment_status,
                   month, created_at, updated_at
            FROM billing.customer
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Whether a record already exists for this phone in this billing month.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists_for_phone_month(
        &self,
        phone: &str,
        month: &MonthKey,
    ) -> Result<bool, RepositoryError> {
        let row: (bool,) = sqlx::query_as(
            r"
            SELECT EXISTS(
                SELECT 1 FROM billing.customer
                WHERE phone = $1 AND month = $2
            )
            ",
        )
        .bind(phone)
        .bind(month)
        .fetch_one(self.pool)
        .await?;

        Ok(row.0)
    }

    /// Apply a partial update, returning the post-update record.
    ///
    /// Absent fields keep their current value. `updated_at` is bumped.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the row is invalid.
    pub async fn update_fields(
        &self,
        id: CustomerId,
        update: &CustomerUpdate,
    ) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r"
            UPDATE billing.customer
            SET days = COALESCE($2, days),
                payment_status = COALESCE($3, payment_status),
                package = COALESCE($4, package),
                price = COALESCE($5, price),
                updated_at = now()
            WHERE id = $1
            RETURNING id, name, phone, package, price, days, payment_status,
                      month, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(update.days)
        .bind(update.payment_status)
        .bind(update.package)
        .bind(update.price)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Set only the payment status (used by the auto-complete policy write).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the row is invalid.
    pub async fn set_payment_status(
        &self,
        id: CustomerId,
        status: PaymentStatus,
    ) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r"
            UPDATE billing.customer
            SET payment_status = $2,
                updated_at = now()
            WHERE id = $1
            RETURNING id, name, phone, package, price, days, payment_status,
                      month, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// List a month's customers in one bucket, newest first.
    ///
    /// `Active` returns PENDING and PAID records, `Completed` only
    /// COMPLETED ones.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row is invalid.
    pub async fn list_by_month_bucket(
        &self,
        month: &MonthKey,
        bucket: CustomerBucket,
    ) -> Result<Vec<Customer>, RepositoryError> {
        let sql = match bucket {
            CustomerBucket::Active => {
                r"
                SELECT id, name, phone, package, price, days, payment_status,
                       month, created_at, updated_at
                FROM billing.customer
                WHERE month = $1 AND payment_status IN ('PENDING', 'PAID')
                ORDER BY created_at DESC
                "
            }
            CustomerBucket::Completed => {
                r"
                SELECT id, name, phone, package, price, days, payment_status,
                       month, created_at, updated_at
                FROM billing.customer
                WHERE month = $1 AND payment_status = 'COMPLETED'
                ORDER BY created_at DESC
                "
            }
        };

        let rows = sqlx::query_as::<_, CustomerRow>(sql)
            .bind(month)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// All records for one billing month, regardless of status.
    ///
    /// Used by the monthly balance report.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row is invalid.
    pub async fn find_all_by_month(
        &self,
        month: &MonthKey,
    ) -> Result<Vec<Customer>, RepositoryError> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            r"
            SELECT id, name, phone, package, price, days, payment_status,
                   month, created_at, updated_at
            FROM billing.customer
            WHERE month = $1
            ",
        )
        .bind(month)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Distinct billing months present in the store, most recent first.
    ///
    /// `YYYY-MM` keys sort lexicographically in chronological order, so a
    /// plain descending sort gives newest-first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored month is invalid.
    pub async fn distinct_months(&self) -> Result<Vec<MonthKey>, RepositoryError> {
        let months: Vec<String> = sqlx::query_scalar(
            r"
            SELECT DISTINCT month FROM billing.customer
            ORDER BY month DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        months
            .into_iter()
            .map(|m| {
                MonthKey::parse(&m).map_err(|e| {
                    RepositoryError::DataCorruption(format!("invalid month in database: {e}"))
                })
            })
            .collect()
    }
}
