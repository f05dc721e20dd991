//! Integration tests for WaveLink Billing.
//!
//! # Running Tests
//!
//! ```bash
//! # Run migrations, then start the server
//! cargo run -p wavelink-cli -- migrate
//! cargo run -p wavelink-server
//!
//! # Run integration tests against it
//! cargo test -p wavelink-integration-tests -- --ignored
//! ```
//!
//! The base URL defaults to `http://localhost:3100` and can be overridden
//! with `WAVELINK_BASE_URL`. Tests generate unique phone numbers so they can
//! run repeatedly against the same database.

/// Base URL for the billing API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("WAVELINK_BASE_URL").unwrap_or_else(|_| "http://localhost:3100".to_string())
}
