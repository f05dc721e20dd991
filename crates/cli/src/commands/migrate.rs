//! Database migration command.
//!
//! Migrations live in `crates/server/migrations/` and are embedded into the
//! CLI binary at compile time. The server never runs them on startup; this
//! command is the only migration path.
//!
//! # Environment Variables
//!
//! - `WAVELINK_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`)

use secrecy::ExposeSecret;
use sqlx::PgPool;

use super::CommandError;

/// Run billing database migrations.
///
/// # Errors
///
/// Returns `CommandError` if the database URL is missing, the connection
/// fails, or a migration fails to apply.
pub async fn run() -> Result<(), CommandError> {
    let database_url = super::database_url()?;

    tracing::info!("Connecting to billing database...");
    let pool = PgPool::connect(database_url.expose_secret()).await?;

    tracing::info!("Running billing migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    tracing::info!("Billing migrations complete!");
    Ok(())
}
