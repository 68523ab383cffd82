//! Handlers for the `/customer` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use kredit_core::error::CoreError;
use kredit_core::identity::normalize_phone;
use kredit_db::models::customer::{CustomerFilter, CustomerResponse, UpdateCustomer};
use kredit_db::repositories::CustomerRepo;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, ValidatedJson};
use crate::middleware::auth::AuthCustomer;
use crate::query::CustomerListParams;
use crate::response::ApiResponse;
use crate::services::account::SignupRequest;
use crate::state::AppState;

/// Request body for `PATCH /customer/{uuid}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCustomerRequest {
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Only the customer themself may change or remove their record.
fn ensure_self(auth: &AuthCustomer, uuid: Uuid) -> AppResult<()> {
    if auth.customer_uuid != uuid {
        return Err(AppError::Core(CoreError::Forbidden(
            "Customers may only modify their own record".into(),
        )));
    }
    Ok(())
}

/// POST /api/v1/customer
///
/// Same validation and hashing as signup, without seeding credit limits.
pub async fn create(
    State(state): State<AppState>,
    _auth: AuthCustomer,
    AppJson(input): AppJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CustomerResponse>>)> {
    let customer = state.accounts.create_customer(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Customer created", customer)),
    ))
}

/// GET /api/v1/customer?email=&phone=&limit=&offset=
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthCustomer,
    Query(params): Query<CustomerListParams>,
) -> AppResult<Json<ApiResponse<Vec<CustomerResponse>>>> {
    let page = params.page();
    let (limit, offset) = page.resolve();
    let filter = CustomerFilter {
        email: params.email.map(|e| e.trim().to_lowercase()),
        phone: params.phone.map(|p| normalize_phone(&p).unwrap_or(p)),
    };

    let customers = CustomerRepo::list(&state.pool, &filter, limit, offset).await?;
    let total = CustomerRepo::count(&state.pool, &filter).await?;

    Ok(Json(ApiResponse::page(
        "Customers found",
        customers.into_iter().map(CustomerResponse::from).collect(),
        page.meta(total),
    )))
}

/// GET /api/v1/customer/{uuid}
pub async fn get_by_uuid(
    State(state): State<AppState>,
    _auth: AuthCustomer,
    Path(uuid): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CustomerResponse>>> {
    let customer = CustomerRepo::find_by_uuid(&state.pool, uuid)
        .await?
        .ok_or_else(|| CoreError::not_found("Customer", uuid))?;
    Ok(Json(ApiResponse::ok("Customer found", customer.into())))
}

/// PATCH /api/v1/customer/{uuid}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthCustomer,
    Path(uuid): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<UpdateCustomerRequest>,
) -> AppResult<Json<ApiResponse<CustomerResponse>>> {
    ensure_self(&auth, uuid)?;

    let phone = match input.phone {
        Some(raw) => Some(
            normalize_phone(&raw)
                .ok_or_else(|| AppError::BadRequest("phone is invalid".into()))?,
        ),
        None => None,
    };
    let changes = UpdateCustomer {
        email: input.email.map(|e| e.trim().to_lowercase()),
        phone,
    };

    let customer = CustomerRepo::update(&state.pool, uuid, &changes)
        .await?
        .ok_or_else(|| CoreError::not_found("Customer", uuid))?;
    Ok(Json(ApiResponse::ok("Customer updated", customer.into())))
}

/// DELETE /api/v1/customer/{uuid}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthCustomer,
    Path(uuid): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    ensure_self(&auth, uuid)?;

    if !CustomerRepo::delete(&state.pool, uuid).await? {
        return Err(CoreError::not_found("Customer", uuid).into());
    }
    tracing::info!(%uuid, "Customer deleted");
    Ok(Json(ApiResponse::ok("Customer deleted", ())))
}
