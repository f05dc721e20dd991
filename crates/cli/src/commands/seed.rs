//! Seed the database with demo customers.
//!
//! Intended for local development so the dashboard has something to render.
//! Seeding is idempotent per month: the `(phone, month)` unique constraint
//! makes a re-run skip customers that already exist.

use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use sqlx::PgPool;

use wavelink_core::{MonthKey, PackageKind, PaymentStatus};

use super::CommandError;

struct DemoCustomer {
    name: &'static str,
    phone: &'static str,
    package: PackageKind,
    days: i32,
    payment_status: PaymentStatus,
}

const DEMO_CUSTOMERS: &[DemoCustomer] = &[
    DemoCustomer {
        name: "Rahim Uddin",
        phone: "01712345678",
        package: PackageKind::Basic,
        days: 30,
        payment_status: PaymentStatus::Paid,
    },
    DemoCustomer {
        name: "Karim Mia",
        phone: "01898765432",
        package: PackageKind::Standard,
        days: 15,
        payment_status: PaymentStatus::Pending,
    },
    DemoCustomer {
        name: "Salma Khatun",
        phone: "01911223344",
        package: PackageKind::Premium,
        days: 45,
        payment_status: PaymentStatus::Completed,
    },
    DemoCustomer {
        name: "Jashim Ahmed",
        phone: "01655667788",
        package: PackageKind::Basic,
        days: 7,
        payment_status: PaymentStatus::Pending,
    },
];

/// Insert demo customers for one billing month.
///
/// # Errors
///
/// Returns `CommandError` if the month is invalid, the database URL is
/// missing, or an insert fails for anything other than a duplicate.
pub async fn run(month: &str) -> Result<(), CommandError> {
    let month: MonthKey = month
        .parse()
        .map_err(|e| CommandError::InvalidArgument(format!("month: {e}")))?;

    let database_url = super::database_url()?;
    let pool = PgPool::connect(database_url.expose_secret()).await?;

    tracing::info!(month = %month, "Seeding demo customers...");

    let mut inserted = 0_u32;
    for demo in DEMO_CUSTOMERS {
        let price: Decimal = demo.package.price();
        let result = sqlx::query(
            r"
            INSERT INTO billing.customer
                (name, phone, package, price, days, payment_status, month)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT ON CONSTRAINT customer_phone_month_key DO NOTHING
            ",
        )
        .bind(demo.name)
        .bind(demo.phone)
        .bind(demo.package)
        .bind(price)
        .bind(demo.days)
        .bind(demo.payment_status)
        .bind(&month)
        .execute(&pool)
        .await?;

        if result.rows_affected() > 0 {
            inserted += 1;
        } else {
            tracing::info!(phone = demo.phone, "Already seeded, skipping");
        }
    }

    tracing::info!(inserted, "Seeding complete!");
    Ok(())
}
