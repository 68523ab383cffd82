//! Handlers for the caller's KYC profile at `/customer/profile`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use kredit_core::error::CoreError;
use kredit_core::pagination::MAX_PAGE_LIMIT;
use kredit_db::models::customer::CustomerResponse;
use kredit_db::models::customer_limit::CustomerLimit;
use kredit_db::models::customer_profile::{CustomerProfile, ProfileFields};
use kredit_db::models::customer_token::CustomerToken;
use kredit_db::repositories::{
    CustomerLimitRepo, CustomerProfileRepo, CustomerRepo, CustomerTokenRepo,
};
use serde::Serialize;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthCustomer;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Everything known about the caller, for `GET /customer/profile/detail`.
#[derive(Debug, Serialize)]
pub struct ProfileDetail {
    pub customer: CustomerResponse,
    pub profile: Option<CustomerProfile>,
    pub token: Option<CustomerToken>,
    pub limit: Vec<CustomerLimit>,
}

/// POST /api/v1/customer/profile
pub async fn create(
    State(state): State<AppState>,
    auth: AuthCustomer,
    AppJson(input): AppJson<ProfileFields>,
) -> AppResult<(StatusCode, Json<ApiResponse<CustomerProfile>>)> {
    let profile = CustomerProfileRepo::create(&state.pool, auth.customer_id, &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Profile created", profile)),
    ))
}

/// GET /api/v1/customer/profile
pub async fn get(
    State(state): State<AppState>,
    auth: AuthCustomer,
) -> AppResult<Json<ApiResponse<CustomerProfile>>> {
    let profile = CustomerProfileRepo::find_by_customer(&state.pool, auth.customer_id)
        .await?
        .ok_or_else(|| CoreError::not_found("CustomerProfile", auth.customer_uuid))?;
    Ok(Json(ApiResponse::ok("Profile found", profile)))
}

/// PATCH /api/v1/customer/profile
pub async fn update(
    State(state): State<AppState>,
    auth: AuthCustomer,
    AppJson(input): AppJson<ProfileFields>,
) -> AppResult<Json<ApiResponse<CustomerProfile>>> {
    let profile = CustomerProfileRepo::update(&state.pool, auth.customer_id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("CustomerProfile", auth.customer_uuid))?;
    Ok(Json(ApiResponse::ok("Profile updated", profile)))
}

/// DELETE /api/v1/customer/profile
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthCustomer,
) -> AppResult<Json<ApiResponse<()>>> {
    if !CustomerProfileRepo::delete(&state.pool, auth.customer_id).await? {
        return Err(CoreError::not_found("CustomerProfile", auth.customer_uuid).into());
    }
    Ok(Json(ApiResponse::ok("Profile deleted", ())))
}

/// GET /api/v1/customer/profile/detail
pub async fn detail(
    State(state): State<AppState>,
    auth: AuthCustomer,
) -> AppResult<Json<ApiResponse<ProfileDetail>>> {
    let customer = CustomerRepo::find_by_id(&state.pool, auth.customer_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Customer", auth.customer_uuid))?;
    let profile = CustomerProfileRepo::find_by_customer(&state.pool, auth.customer_id).await?;
    let token = CustomerTokenRepo::find_latest_for_customer(&state.pool, auth.customer_id).await?;
    let limit =
        CustomerLimitRepo::list_for_customer(&state.pool, auth.customer_id, None, MAX_PAGE_LIMIT, 0)
            .await?;

    Ok(Json(ApiResponse::ok(
        "Profile detail found",
        ProfileDetail {
            customer: customer.into(),
            profile,
            token,
            limit,
        },
    )))
}
