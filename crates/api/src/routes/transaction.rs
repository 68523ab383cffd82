//! Route definitions for the `/transaction` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::transaction;
use crate::state::AppState;

/// Routes mounted at `/transaction`. All require auth.
///
/// ```text
/// POST   /checkout   -> checkout
/// GET    /           -> list
/// GET    /detail     -> list_detail
/// GET    /{uuid}     -> get_by_uuid
/// PATCH  /{uuid}     -> update
/// DELETE /{uuid}     -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/checkout", post(transaction::checkout))
        .route("/", get(transaction::list))
        .route("/detail", get(transaction::list_detail))
        .route(
            "/{uuid}",
            get(transaction::get_by_uuid)
                .patch(transaction::update)
                .delete(transaction::delete),
        )
}
