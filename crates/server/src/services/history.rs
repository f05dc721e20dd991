//! Change-set computation for the audit trail.
//!
//! Diffs are computed from the pre-update snapshot against the requested
//! fields, never reconstructed from the post-update row, so two concurrent
//! editors each record only their own deltas.

use crate::models::customer::{Customer, CustomerUpdate, FieldChange};

/// Compute the field deltas an update would apply to `prior`.
///
/// Only fields present in the request are considered, and a field whose
/// requested value equals the stored value produces no delta. Comparison is
/// on typed values, so `30` and `30.0` for days are the same value. Field
/// order is fixed: days, paymentStatus, package, price.
#[must_use]
pub fn diff_changes(prior: &Customer, update: &CustomerUpdate) -> Vec<FieldChange> {
    let mut changes = Vec::new();

    if let Some(days) = update.days
        && days != prior.days
    {
        changes.push(FieldChange::new("days", &prior.days, &days));
    }

    if let Some(status) = update.payment_status
        && status != prior.payment_status
    {
        changes.push(FieldChange::new(
            "paymentStatus",
            &prior.payment_status,
            &status,
        ));
    }

    if let Some(package) = update.package
        && package != prior.package
    {
        changes.push(FieldChange::new("package", &prior.package, &package));
    }

    if let Some(price) = update.price
        && price != prior.price
    {
        changes.push(FieldChange::new("price", &prior.price, &price));
    }

    changes
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use serde_json::json;
    use wavelink_core::{CustomerId, MonthKey, PackageKind, PaymentStatus};

    fn sample_customer() -> Customer {
        Customer {
            id: CustomerId::generate(),
            name: "Karim Mia".to_string(),
            phone: "01898765432".to_string(),
            package: PackageKind::Basic,
            price: Decimal::from(500_u32),
            days: 10,
            payment_status: PaymentStatus::Pending,
            month: MonthKey::parse("2024-05").unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_changed_fields_produce_deltas_in_order() {
        let prior = sample_customer();
        let update = CustomerUpdate {
            days: Some(30),
            payment_status: Some(PaymentStatus::Paid),
            ..Default::default()
        };

        let changes = diff_changes(&prior, &update);
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].field, "days");
        assert_eq!(changes[0].old_value, json!(10));
        assert_eq!(changes[0].new_value, json!(30));
        assert_eq!(changes[1].field, "paymentStatus");
        assert_eq!(changes[1].old_value, json!("PENDING"));
        assert_eq!(changes[1].new_value, json!("PAID"));
    }

    #[test]
    fn test_unchanged_value_produces_no_delta() {
        let prior = sample_customer();
        let update = CustomerUpdate {
            days: Some(10),
            payment_status: Some(PaymentStatus::Paid),
            ..Default::default()
        };

        let changes = diff_changes(&prior, &update);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].field, "paymentStatus");
    }

    #[test]
    fn test_absent_fields_are_ignored() {
        let prior = sample_customer();
        let changes = diff_changes(&prior, &CustomerUpdate::default());
        assert!(changes.is_empty());
    }

    #[test]
    fn test_identical_update_is_empty() {
        let prior = sample_customer();
        let update = CustomerUpdate {
            days: Some(prior.days),
            payment_status: Some(prior.payment_status),
            package: Some(prior.package),
            price: Some(prior.price),
        };
        assert!(diff_changes(&prior, &update).is_empty());
    }

    #[test]
    fn test_price_compared_as_decimal() {
        let prior = sample_customer();
        let update = CustomerUpdate {
            price: Some(Decimal::new(50000, 2)), // 500.00 == 500
            ..Default::default()
        };
        assert!(diff_changes(&prior, &update).is_empty());
    }
}
