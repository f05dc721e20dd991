//! Customer write orchestration.
//!
//! Create and update go through this service so validation, duplicate
//! protection, audit recording, and the auto-complete policy all run in one
//! place. Reads go straight to the repository from the route handlers.

use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{instrument, warn};

use wavelink_core::{CustomerId, PaymentStatus};

use crate::db::customers::CreateCustomer;
use crate::db::{self, CustomerRepository, RepositoryError};
use crate::error::AppError;
use crate::models::customer::{Customer, CustomerUpdate, FieldChange, NewCustomer};
use crate::services::history::diff_changes;
use crate::services::lifecycle;

/// Actor recorded on audit entries when the request carries no identity.
const UPDATED_BY_SYSTEM: &str = "system";

const DUPLICATE_MESSAGE: &str =
    "Customer with this phone number already exists for this month";

/// Service for customer create and update flows.
#[derive(Debug, Clone)]
pub struct CustomerService {
    pool: PgPool,
}

impl CustomerService {
    /// Create a new customer service.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a customer record for a billing month.
    ///
    /// The price is snapshotted from the package unless the request carries
    /// an explicit override. At most one record may exist per `(phone,
    /// month)` pair; the pre-check gives a friendly message and the unique
    /// constraint backstops concurrent creates.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if a field fails validation.
    /// Returns `AppError::Conflict` if the `(phone, month)` pair exists.
    /// Returns `AppError::Database` if a query fails.
    #[instrument(skip(self, request), fields(phone = %request.phone, month = %request.month))]
    pub async fn create(&self, request: NewCustomer) -> Result<Customer, AppError> {
        validate_new_customer(&request)?;

        let repo = CustomerRepository::new(&self.pool);

        if repo
            .exists_for_phone_month(&request.phone, &request.month)
            .await?
        {
            return Err(AppError::Conflict(DUPLICATE_MESSAGE.to_string()));
        }

        let price = request
            .price
            .unwrap_or_else(|| request.package.price());
        let payment_status = request.payment_status.unwrap_or_default();

        let customer = repo
            .create(CreateCustomer {
                name: request.name,
                phone: request.phone,
                package: request.package,
                price,
                days: request.days,
                payment_status,
                month: request.month,
            })
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => {
                    AppError::Conflict(DUPLICATE_MESSAGE.to_string())
                }
                other => AppError::Database(other),
            })?;

        Ok(customer)
    }

    /// Apply a partial update to a customer.
    ///
    /// Changed fields are recorded in the audit trail before the
    /// auto-complete policy runs; when the policy fires it appends its own
    /// PAID → COMPLETED entry. The returned record reflects the final state,
    /// policy included. An update that changes nothing skips the primary
    /// write and its audit entry, but the policy still runs.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if a field fails validation or the
    /// status would move backwards.
    /// Returns `AppError::NotFound` if the customer does not exist.
    /// Returns `AppError::Database` if a query fails.
    #[instrument(skip(self, update), fields(customer_id = %id))]
    pub async fn update(
        &self,
        id: CustomerId,
        mut update: CustomerUpdate,
    ) -> Result<Customer, AppError> {
        validate_update(&update)?;

        let repo = CustomerRepository::new(&self.pool);

        let prior = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;

        if let Some(next) = update.payment_status
            && prior.payment_status.is_backward(next)
        {
            return Err(AppError::Validation(format!(
                "paymentStatus cannot move backwards from {} to {next}",
                prior.payment_status
            )));
        }

        // Re-snapshot the price when the package changes without an override
        if let Some(package) = update.package
            && package != prior.package
            && update.price.is_none()
        {
            update.price = Some(package.price());
        }

        // The policy below runs even for an empty diff: a record that is
        // already PAID with enough days accrued completes on its next touch.
        let changes = diff_changes(&prior, &update);
        let updated = if changes.is_empty() {
            prior
        } else {
            let updated = repo
                .update_fields(id, &update)
                .await?
                .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;

            self.record_history(id, &changes).await;
            updated
        };

        if lifecycle::auto_completes(updated.payment_status, updated.days) {
            let completed = repo
                .set_payment_status(id, PaymentStatus::Completed)
                .await?;

            if let Some(completed) = completed {
                let policy_change = FieldChange::new(
                    "paymentStatus",
                    &PaymentStatus::Paid,
                    &PaymentStatus::Completed,
                );
                self.record_history(id, &[policy_change]).await;
                return Ok(completed);
            }
        }

        Ok(updated)
    }

    /// Append an audit entry, logging instead of failing the request.
    ///
    /// The primary write has already committed by the time this runs, so a
    /// trail failure must not turn a successful update into an error.
    async fn record_history(&self, customer_id: CustomerId, changes: &[FieldChange]) {
        if let Err(e) =
            db::history::insert_entry(&self.pool, customer_id, changes, UPDATED_BY_SYSTEM).await
        {
            warn!(
                customer_id = %customer_id,
                error = %e,
                "Failed to append customer history entry"
            );
        }
    }
}

// =============================================================================
// Validation
// =============================================================================

fn validate_new_customer(request: &NewCustomer) -> Result<(), AppError> {
    if request.name.trim().chars().count() < 2 {
        return Err(AppError::Validation(
            "name must be at least 2 characters".to_string(),
        ));
    }
    if request.phone.trim().chars().count() < 11 {
        return Err(AppError::Validation(
            "phone must be at least 11 characters".to_string(),
        ));
    }
    validate_days(request.days)?;
    if let Some(price) = request.price {
        validate_price(price)?;
    }
    Ok(())
}

fn validate_update(update: &CustomerUpdate) -> Result<(), AppError> {
    if let Some(days) = update.days {
        validate_days(days)?;
    }
    if let Some(price) = update.price {
        validate_price(price)?;
    }
    Ok(())
}

fn validate_days(days: i32) -> Result<(), AppError> {
    if days < 1 {
        return Err(AppError::Validation("days must be at least 1".to_string()));
    }
    Ok(())
}

fn validate_price(price: Decimal) -> Result<(), AppError> {
    if price < Decimal::ZERO {
        return Err(AppError::Validation(
            "price must not be negative".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wavelink_core::{MonthKey, PackageKind};

    fn valid_request() -> NewCustomer {
        NewCustomer {
            name: "Rahim Uddin".to_string(),
            phone: "01712345678".to_string(),
            package: PackageKind::Standard,
            days: 30,
            month: MonthKey::parse("2024-03").unwrap(),
            price: None,
            payment_status: None,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(validate_new_customer(&valid_request()).is_ok());
    }

    #[test]
    fn test_short_name_rejected() {
        let mut request = valid_request();
        request.name = "R".to_string();
        assert!(matches!(
            validate_new_customer(&request),
            Err(AppError::Validation(_))
        ));

        // Whitespace padding does not count toward the minimum
        request.name = " R ".to_string();
        assert!(validate_new_customer(&request).is_err());
    }

    #[test]
    fn test_short_phone_rejected() {
        let mut request = valid_request();
        request.phone = "0171234567".to_string();
        assert!(matches!(
            validate_new_customer(&request),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_nonpositive_days_rejected() {
        let mut request = valid_request();
        request.days = 0;
        assert!(validate_new_customer(&request).is_err());
        request.days = -5;
        assert!(validate_new_customer(&request).is_err());
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut request = valid_request();
        request.price = Some(Decimal::from(-1));
        assert!(validate_new_customer(&request).is_err());

        request.price = Some(Decimal::ZERO);
        assert!(validate_new_customer(&request).is_ok());
    }

    #[test]
    fn test_update_validation_checks_present_fields_only() {
        assert!(validate_update(&CustomerUpdate::default()).is_ok());

        let update = CustomerUpdate {
            days: Some(0),
            ..Default::default()
        };
        assert!(validate_update(&update).is_err());

        let update = CustomerUpdate {
            price: Some(Decimal::from(-10)),
            ..Default::default()
        };
        assert!(validate_update(&update).is_err());
    }
}
