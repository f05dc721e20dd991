//! Monthly balance reporting.

use rust_decimal::Decimal;
use serde::Serialize;

use wavelink_core::PaymentStatus;

use crate::models::customer::Customer;

/// Aggregate billing totals for one month.
///
/// PAID and COMPLETED records both count as collected revenue; a completed
/// subscription was necessarily paid first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBalance {
    /// Sum of prices across every record in the month.
    pub total_amount: Decimal,
    /// Sum of prices for PAID and COMPLETED records.
    pub paid_amount: Decimal,
    /// Sum of prices for PENDING records.
    pub pending_amount: Decimal,
    /// Number of records in the month.
    pub customer_count: u64,
    /// Number of PAID or COMPLETED records.
    pub paid_customers: u64,
}

/// Fold a month's records into its balance report.
///
/// An empty month yields all zeros.
#[must_use]
pub fn monthly_balance(customers: &[Customer]) -> MonthlyBalance {
    let mut balance = MonthlyBalance {
        total_amount: Decimal::ZERO,
        paid_amount: Decimal::ZERO,
        pending_amount: Decimal::ZERO,
        customer_count: 0,
        paid_customers: 0,
    };

    for customer in customers {
        balance.total_amount += customer.price;
        balance.customer_count += 1;

        match customer.payment_status {
            PaymentStatus::Paid | PaymentStatus::Completed => {
                balance.paid_amount += customer.price;
                balance.paid_customers += 1;
            }
            PaymentStatus::Pending => {
                balance.pending_amount += customer.price;
            }
        }
    }

    balance
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use wavelink_core::{CustomerId, MonthKey, PackageKind};

    fn customer(package: PackageKind, status: PaymentStatus) -> Customer {
        Customer {
            id: CustomerId::generate(),
            name: "Test Customer".to_string(),
            phone: "01712000000".to_string(),
            package,
            price: package.price(),
            days: 30,
            payment_status: status,
            month: MonthKey::parse("2024-06").unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_month_is_all_zeros() {
        let balance = monthly_balance(&[]);
        assert_eq!(balance.total_amount, Decimal::ZERO);
        assert_eq!(balance.paid_amount, Decimal::ZERO);
        assert_eq!(balance.pending_amount, Decimal::ZERO);
        assert_eq!(balance.customer_count, 0);
        assert_eq!(balance.paid_customers, 0);
    }

    #[test]
    fn test_totals_partition_by_status() {
        let customers = vec![
            customer(PackageKind::Basic, PaymentStatus::Paid),
            customer(PackageKind::Standard, PaymentStatus::Pending),
            customer(PackageKind::Premium, PaymentStatus::Completed),
        ];

        let balance = monthly_balance(&customers);
        assert_eq!(balance.total_amount, Decimal::from(2200_u32));
        assert_eq!(balance.paid_amount, Decimal::from(1500_u32));
        assert_eq!(balance.pending_amount, Decimal::from(700_u32));
        assert_eq!(balance.customer_count, 3);
        assert_eq!(balance.paid_customers, 2);
    }

    #[test]
    fn test_single_paid_record_among_pending() {
        let customers = vec![
            customer(PackageKind::Basic, PaymentStatus::Pending),
            customer(PackageKind::Standard, PaymentStatus::Paid),
            customer(PackageKind::Premium, PaymentStatus::Pending),
        ];

        let balance = monthly_balance(&customers);
        assert_eq!(balance.total_amount, Decimal::from(2200_u32));
        assert_eq!(balance.paid_amount, Decimal::from(700_u32));
        assert_eq!(balance.pending_amount, Decimal::from(1500_u32));
        assert_eq!(balance.customer_count, 3);
        assert_eq!(balance.paid_customers, 1);
    }

    #[test]
    fn test_paid_plus_pending_equals_total() {
        let customers = vec![
            customer(PackageKind::Basic, PaymentStatus::Pending),
            customer(PackageKind::Basic, PaymentStatus::Paid),
            customer(PackageKind::Standard, PaymentStatus::Paid),
            customer(PackageKind::Premium, PaymentStatus::Pending),
        ];

        let balance = monthly_balance(&customers);
        assert_eq!(
            balance.paid_amount + balance.pending_amount,
            balance.total_amount
        );
    }

    #[test]
    fn test_serializes_camel_case() {
        let balance = monthly_balance(&[customer(PackageKind::Basic, PaymentStatus::Paid)]);
        let value = serde_json::to_value(&balance).unwrap();
        assert!(value.get("totalAmount").is_some());
        assert!(value.get("paidCustomers").is_some());
        assert!(value.get("total_amount").is_none());
    }
}
