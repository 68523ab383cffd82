//! Handlers for the account lifecycle (signup, signin, signout, refresh).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use kredit_db::models::customer::CustomerResponse;
use serde_json::json;

use crate::auth::jwt::TokenDetails;
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthCustomer;
use crate::middleware::client::ClientMeta;
use crate::response::ApiResponse;
use crate::services::account::{RefreshTokenRequest, SigninRequest, SignupRequest};
use crate::state::AppState;

/// POST /api/v1/customer/signup
pub async fn signup(
    State(state): State<AppState>,
    AppJson(input): AppJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CustomerResponse>>)> {
    let customer = state.accounts.signup(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Signup success", customer)),
    ))
}

/// POST /api/v1/customer/signin
pub async fn signin(
    State(state): State<AppState>,
    client: ClientMeta,
    AppJson(input): AppJson<SigninRequest>,
) -> AppResult<Json<ApiResponse<TokenDetails>>> {
    let tokens = state.accounts.signin(input, client).await?;
    Ok(Json(ApiResponse::ok("Signin success", tokens)))
}

/// POST /api/v1/customer/signout
pub async fn signout(
    State(state): State<AppState>,
    auth: AuthCustomer,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let revoked = state.accounts.signout(&auth).await?;
    Ok(Json(ApiResponse::ok(
        "Signout success",
        json!({ "revoked_sessions": revoked }),
    )))
}

/// POST /api/v1/customer/refresh-token
pub async fn refresh_token(
    State(state): State<AppState>,
    client: ClientMeta,
    AppJson(input): AppJson<RefreshTokenRequest>,
) -> AppResult<Json<ApiResponse<TokenDetails>>> {
    let tokens = state.accounts.refresh(input, client).await?;
    Ok(Json(ApiResponse::ok("Token refreshed", tokens)))
}
