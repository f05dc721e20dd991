//! Monthly balance endpoint.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;

use wavelink_core::MonthKey;

use crate::db::CustomerRepository;
use crate::error::AppError;
use crate::services::reporting::{self, MonthlyBalance};
use crate::state::AppState;

/// Build the balance routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/balance", get(monthly_balance))
}

/// Query parameters for the balance report.
#[derive(Debug, Deserialize)]
struct BalanceQuery {
    month: MonthKey,
}

/// GET /api/balance?month=YYYY-MM
///
/// Aggregates the month's records into collected, outstanding, and total
/// figures. A month with no records reports all zeros.
async fn monthly_balance(
    State(state): State<AppState>,
    Query(query): Query<BalanceQuery>,
) -> Result<Json<MonthlyBalance>, AppError> {
    let repo = CustomerRepository::new(state.pool());
    let customers = repo.find_all_by_month(&query.month).await?;
    Ok(Json(reporting::monthly_balance(&customers)))
}
