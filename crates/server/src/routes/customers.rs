//! Customer CRUD and audit trail endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
};
use serde::Deserialize;

use wavelink_core::{CustomerId, MonthKey};

use crate::db::{self, CustomerRepository};
use crate::error::AppError;
use crate::models::customer::{
    Customer, CustomerBucket, CustomerHistoryEntry, CustomerUpdate, NewCustomer,
};
use crate::services::CustomerService;
use crate::state::AppState;

/// Build the customer routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers).post(create_customer))
        .route("/customers/months", get(list_months))
        .route("/customers/{id}", patch(update_customer))
        .route("/customers/{id}/history", get(customer_history))
}

/// Query parameters for the customer listing.
#[derive(Debug, Deserialize)]
struct ListQuery {
    month: MonthKey,
    status: Option<CustomerBucket>,
}

/// GET /api/customers?month=YYYY-MM&status=active|completed
///
/// Lists a month's customers in one status bucket, newest first. The bucket
/// defaults to active (PENDING and PAID).
async fn list_customers(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Customer>>, AppError> {
    let repo = CustomerRepository::new(state.pool());
    let bucket = query.status.unwrap_or_default();
    let customers = repo.list_by_month_bucket(&query.month, bucket).await?;
    Ok(Json(customers))
}

/// POST /api/customers
///
/// Creates a customer record for a billing month.
async fn create_customer(
    State(state): State<AppState>,
    Json(request): Json<NewCustomer>,
) -> Result<(StatusCode, Json<Customer>), AppError> {
    let service = CustomerService::new(state.pool().clone());
    let customer = service.create(request).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// PATCH /api/customers/{id}
///
/// Applies a partial update and returns the final record, including any
/// automatic PAID → COMPLETED transition triggered by the update.
async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
    Json(update): Json<CustomerUpdate>,
) -> Result<Json<Customer>, AppError> {
    let service = CustomerService::new(state.pool().clone());
    let customer = service.update(id, update).await?;
    Ok(Json(customer))
}

/// GET /api/customers/{id}/history
///
/// The customer's audit trail, newest first. A customer with no recorded
/// changes (or a deleted one) yields an empty list rather than 404.
async fn customer_history(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
) -> Result<Json<Vec<CustomerHistoryEntry>>, AppError> {
    let entries = db::history::list_for_customer(state.pool(), id).await?;
    Ok(Json(entries))
}

/// GET /api/customers/months
///
/// Distinct billing months present in the store, most recent first.
async fn list_months(
    State(state): State<AppState>,
) -> Result<Json<Vec<MonthKey>>, AppError> {
    let repo = CustomerRepository::new(state.pool());
    let months = repo.distinct_months().await?;
    Ok(Json(months))
}
