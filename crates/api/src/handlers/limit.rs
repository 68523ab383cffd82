//! Handlers for explicit limit management at `/customer/limit`.
//!
//! Checkout never goes through here; it debits via the ledger.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use kredit_core::credit::TenorTable;
use kredit_core::error::CoreError;
use kredit_core::types::{DbId, Money, Tenor};
use kredit_db::models::customer_limit::{CreateCustomerLimit, CustomerLimit, UpdateCustomerLimit};
use kredit_db::repositories::CustomerLimitRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthCustomer;
use crate::query::LimitListParams;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Request body for `POST /customer/limit`.
#[derive(Debug, Deserialize)]
pub struct CreateLimitRequest {
    pub tenor: Tenor,
    pub limit_amount: Money,
}

/// Apply the tenor table rules (positive tenor, non-negative amount) to a
/// single entry.
fn check_entry(tenor: Tenor, amount: Money) -> AppResult<()> {
    TenorTable::new([(tenor, amount)])
        .map(|_| ())
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

/// POST /api/v1/customer/limit
pub async fn create(
    State(state): State<AppState>,
    auth: AuthCustomer,
    AppJson(input): AppJson<CreateLimitRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CustomerLimit>>)> {
    check_entry(input.tenor, input.limit_amount)?;

    let limit = CustomerLimitRepo::create(
        &state.pool,
        &CreateCustomerLimit {
            customer_id: auth.customer_id,
            tenor: input.tenor,
            limit_amount: input.limit_amount,
        },
    )
    .await?;
    tracing::info!(customer_id = auth.customer_id, tenor = limit.tenor, "Credit limit created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Limit created", limit)),
    ))
}

/// GET /api/v1/customer/limit?tenor=&limit=&offset=
pub async fn list(
    State(state): State<AppState>,
    auth: AuthCustomer,
    Query(params): Query<LimitListParams>,
) -> AppResult<Json<ApiResponse<Vec<CustomerLimit>>>> {
    let page = params.page();
    let (limit, offset) = page.resolve();

    let limits = CustomerLimitRepo::list_for_customer(
        &state.pool,
        auth.customer_id,
        params.tenor,
        limit,
        offset,
    )
    .await?;
    let total =
        CustomerLimitRepo::count_for_customer(&state.pool, auth.customer_id, params.tenor).await?;

    Ok(Json(ApiResponse::page("Limits found", limits, page.meta(total))))
}

/// GET /api/v1/customer/limit/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthCustomer,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<CustomerLimit>>> {
    let limit = CustomerLimitRepo::find_by_id(&state.pool, id, auth.customer_id)
        .await?
        .ok_or_else(|| CoreError::not_found("CustomerLimit", id))?;
    Ok(Json(ApiResponse::ok("Limit found", limit)))
}

/// PATCH /api/v1/customer/limit/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthCustomer,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateCustomerLimit>,
) -> AppResult<Json<ApiResponse<CustomerLimit>>> {
    check_entry(
        input.tenor.unwrap_or(1),
        input.limit_amount.unwrap_or_default(),
    )?;

    let limit = CustomerLimitRepo::update(&state.pool, id, auth.customer_id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("CustomerLimit", id))?;
    tracing::info!(
        customer_id = auth.customer_id,
        tenor = limit.tenor,
        amount = %limit.limit_amount,
        "Credit limit set",
    );
    Ok(Json(ApiResponse::ok("Limit updated", limit)))
}

/// DELETE /api/v1/customer/limit/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthCustomer,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !CustomerLimitRepo::delete(&state.pool, id, auth.customer_id).await? {
        return Err(CoreError::not_found("CustomerLimit", id).into());
    }
    Ok(Json(ApiResponse::ok("Limit deleted", ())))
}
