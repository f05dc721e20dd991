//! HTTP route handlers for the billing API.

pub mod balance;
pub mod customers;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(customers::router())
        .merge(balance::router())
}
