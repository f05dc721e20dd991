//! Customer records and their audit history.
//!
//! Wire shapes are camelCase to match the dashboard frontend; the database
//! layer has its own row types in `crate::db`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use wavelink_core::{CustomerId, HistoryEntryId, MonthKey, PackageKind, PaymentStatus};

/// One customer subscription record for one billing month.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Store-generated identity.
    pub id: CustomerId,
    /// Customer display name (min 2 characters).
    pub name: String,
    /// Contact phone (min 11 characters); `(phone, month)` is unique.
    pub phone: String,
    /// Subscription tier.
    pub package: PackageKind,
    /// Price snapshotted from the package at write time, in TK.
    pub price: Decimal,
    /// Subscription duration in days; also accrues via edits.
    pub days: i32,
    /// Lifecycle state: PENDING → PAID → COMPLETED.
    pub payment_status: PaymentStatus,
    /// Billing period this record belongs to.
    pub month: MonthKey,
    /// Store-managed creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Store-managed last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a customer.
///
/// `price` is optional; when absent it is snapshotted from the package.
/// `paymentStatus` defaults to PENDING.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub name: String,
    pub phone: String,
    pub package: PackageKind,
    pub days: i32,
    pub month: MonthKey,
    pub price: Option<Decimal>,
    pub payment_status: Option<PaymentStatus>,
}

/// Partial update request for a customer.
///
/// Only the fields present are applied. Setting `package` without an
/// explicit `price` re-snapshots the price from the new package.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdate {
    pub days: Option<i32>,
    pub payment_status: Option<PaymentStatus>,
    pub package: Option<PackageKind>,
    pub price: Option<Decimal>,
}

impl CustomerUpdate {
    /// Whether the request carries no fields at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.days.is_none()
            && self.payment_status.is_none()
            && self.package.is_none()
            && self.price.is_none()
    }
}

/// Listing bucket for the customers table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerBucket {
    /// PENDING or PAID records.
    #[default]
    Active,
    /// COMPLETED records only.
    Completed,
}

/// One changed attribute within a single update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldChange {
    /// Wire name of the field ("days", "paymentStatus", "package", "price").
    pub field: String,
    /// Value before the update.
    pub old_value: serde_json::Value,
    /// Value after the update.
    pub new_value: serde_json::Value,
}

impl FieldChange {
    /// Build a change entry from any serializable old/new pair.
    ///
    /// Serialization of domain values (statuses, decimals) is infallible;
    /// a failure would be a programming error, so it degrades to `Null`
    /// rather than propagating.
    pub fn new<T: Serialize>(field: &str, old_value: &T, new_value: &T) -> Self {
        Self {
            field: field.to_string(),
            old_value: serde_json::to_value(old_value).unwrap_or(serde_json::Value::Null),
            new_value: serde_json::to_value(new_value).unwrap_or(serde_json::Value::Null),
        }
    }
}

/// Immutable audit record: all field deltas of one customer update.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerHistoryEntry {
    pub id: HistoryEntryId,
    /// Weak reference to the customer; entries outlive their customer.
    pub customer_id: CustomerId,
    /// Ordered deltas, one per changed attribute.
    pub changes: Vec<FieldChange>,
    /// Actor tag; "system" when no identity is attached to the request.
    pub updated_by: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_customer_serializes_camel_case() {
        let customer = Customer {
            id: CustomerId::generate(),
            name: "Rahim Uddin".to_string(),
            phone: "01712345678".to_string(),
            package: PackageKind::Standard,
            price: Decimal::from(700_u32),
            days: 30,
            payment_status: PaymentStatus::Paid,
            month: MonthKey::parse("2024-03").unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let value = serde_json::to_value(&customer).unwrap();
        assert_eq!(value["paymentStatus"], json!("PAID"));
        assert_eq!(value["package"], json!("STANDARD"));
        assert_eq!(value["month"], json!("2024-03"));
        assert!(value.get("createdAt").is_some());
        assert!(value.get("payment_status").is_none());
    }

    #[test]
    fn test_update_deserializes_partial_body() {
        let update: CustomerUpdate =
            serde_json::from_str(r#"{"paymentStatus": "PAID"}"#).unwrap();
        assert_eq!(update.payment_status, Some(PaymentStatus::Paid));
        assert!(update.days.is_none());
        assert!(!update.is_empty());

        let empty: CustomerUpdate = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_field_change_wire_shape() {
        let change = FieldChange::new("days", &10, &30);
        let value = serde_json::to_value(&change).unwrap();
        assert_eq!(value["field"], json!("days"));
        assert_eq!(value["oldValue"], json!(10));
        assert_eq!(value["newValue"], json!(30));
    }

    #[test]
    fn test_bucket_deserializes_lowercase() {
        let bucket: CustomerBucket = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(bucket, CustomerBucket::Completed);
        assert!(serde_json::from_str::<CustomerBucket>("\"COMPLETED\"").is_err());
    }
}
