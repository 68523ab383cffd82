//! Handlers for the caller's sessions at `/customer/token`.

use axum::extract::{Path, Query, State};
use axum::Json;
use kredit_core::error::CoreError;
use kredit_core::types::DbId;
use kredit_db::models::customer_token::CustomerToken;
use kredit_db::repositories::CustomerTokenRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthCustomer;
use crate::query::PaginationParams;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/customer/token
pub async fn list(
    State(state): State<AppState>,
    auth: AuthCustomer,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<ApiResponse<Vec<CustomerToken>>>> {
    let (limit, offset) = params.resolve();
    let tokens =
        CustomerTokenRepo::list_for_customer(&state.pool, auth.customer_id, limit, offset).await?;
    let total = CustomerTokenRepo::count_for_customer(&state.pool, auth.customer_id).await?;
    Ok(Json(ApiResponse::page("Tokens found", tokens, params.meta(total))))
}

/// GET /api/v1/customer/token/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthCustomer,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<CustomerToken>>> {
    let token = CustomerTokenRepo::find_by_id(&state.pool, id, auth.customer_id)
        .await?
        .ok_or_else(|| CoreError::not_found("CustomerToken", id))?;
    Ok(Json(ApiResponse::ok("Token found", token)))
}

/// DELETE /api/v1/customer/token/{id}
///
/// Revokes one session. Deleting the caller's current session signs them out.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthCustomer,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !CustomerTokenRepo::delete(&state.pool, id, auth.customer_id).await? {
        return Err(CoreError::not_found("CustomerToken", id).into());
    }
    Ok(Json(ApiResponse::ok("Token deleted", ())))
}
