pub mod customer;
pub mod health;
pub mod transaction;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /customer/...       signup, signin, signout, refresh-token, customer CRUD,
///                     profile, limit, token
/// /transaction/...    checkout, list, detail, get, patch, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/customer", customer::router())
        .nest("/transaction", transaction::router())
}
