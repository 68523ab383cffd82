//! Handlers for the `/transaction` resource.
//!
//! Transactions are only ever created through checkout.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use kredit_core::error::CoreError;
use kredit_db::models::transaction::{Transaction, TransactionDetail, UpdateTransaction};
use kredit_db::repositories::{AssetRepo, TransactionRepo};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppResult;
use crate::extract::{AppJson, ValidatedJson};
use crate::middleware::auth::AuthCustomer;
use crate::query::PaginationParams;
use crate::response::ApiResponse;
use crate::services::checkout::CheckoutRequest;
use crate::state::AppState;

/// Request body for `PATCH /transaction/{uuid}`. Same length rules as checkout.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTransactionRequest {
    #[validate(length(min = 1, max = 100, message = "contract_number must not be empty"))]
    pub contract_number: Option<String>,
    #[validate(length(min = 1, max = 50, message = "sales_channel must not be empty"))]
    pub sales_channel: Option<String>,
}

/// POST /api/v1/transaction/checkout
pub async fn checkout(
    State(state): State<AppState>,
    auth: AuthCustomer,
    AppJson(input): AppJson<CheckoutRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Transaction>>)> {
    let transaction = state.checkout.checkout(&auth, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Checkout success", transaction)),
    ))
}

/// GET /api/v1/transaction
pub async fn list(
    State(state): State<AppState>,
    auth: AuthCustomer,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<ApiResponse<Vec<Transaction>>>> {
    let (limit, offset) = params.resolve();
    let transactions =
        TransactionRepo::list_for_customer(&state.pool, auth.customer_id, limit, offset).await?;
    let total = TransactionRepo::count_for_customer(&state.pool, auth.customer_id).await?;
    Ok(Json(ApiResponse::page(
        "Transactions found",
        transactions,
        params.meta(total),
    )))
}

/// GET /api/v1/transaction/detail
///
/// Same page as [`list`], each entry paired with its asset.
pub async fn list_detail(
    State(state): State<AppState>,
    auth: AuthCustomer,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<ApiResponse<Vec<TransactionDetail>>>> {
    let (limit, offset) = params.resolve();
    let transactions =
        TransactionRepo::list_for_customer(&state.pool, auth.customer_id, limit, offset).await?;
    let total = TransactionRepo::count_for_customer(&state.pool, auth.customer_id).await?;

    let asset_ids: Vec<_> = transactions.iter().filter_map(|t| t.asset_id).collect();
    let mut assets: HashMap<_, _> = AssetRepo::find_by_ids(&state.pool, &asset_ids)
        .await?
        .into_iter()
        .map(|a| (a.id, a))
        .collect();

    let details = transactions
        .into_iter()
        .map(|transaction| TransactionDetail {
            asset: transaction.asset_id.and_then(|id| assets.remove(&id)),
            transaction,
        })
        .collect();

    Ok(Json(ApiResponse::page(
        "Transactions found",
        details,
        params.meta(total),
    )))
}

/// GET /api/v1/transaction/{uuid}
pub async fn get_by_uuid(
    State(state): State<AppState>,
    auth: AuthCustomer,
    Path(uuid): Path<Uuid>,
) -> AppResult<Json<ApiResponse<TransactionDetail>>> {
    let transaction = TransactionRepo::find_for_customer(&state.pool, uuid, auth.customer_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Transaction", uuid))?;
    let asset = match transaction.asset_id {
        Some(id) => AssetRepo::find_by_id(&state.pool, id).await?,
        None => None,
    };
    Ok(Json(ApiResponse::ok(
        "Transaction found",
        TransactionDetail { transaction, asset },
    )))
}

/// PATCH /api/v1/transaction/{uuid}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthCustomer,
    Path(uuid): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<UpdateTransactionRequest>,
) -> AppResult<Json<ApiResponse<Transaction>>> {
    let changes = UpdateTransaction {
        contract_number: input.contract_number,
        sales_channel: input.sales_channel,
    };
    let transaction = TransactionRepo::update(&state.pool, uuid, auth.customer_id, &changes)
        .await?
        .ok_or_else(|| CoreError::not_found("Transaction", uuid))?;
    Ok(Json(ApiResponse::ok("Transaction updated", transaction)))
}

/// DELETE /api/v1/transaction/{uuid}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthCustomer,
    Path(uuid): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !TransactionRepo::delete(&state.pool, uuid, auth.customer_id).await? {
        return Err(CoreError::not_found("Transaction", uuid).into());
    }
    Ok(Json(ApiResponse::ok("Transaction deleted", ())))
}
