//! Route definitions for the `/customer` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{account, customer, limit, profile, token};
use crate::state::AppState;

/// Routes mounted at `/customer`.
///
/// ```text
/// POST   /signup           -> account::signup
/// POST   /signin           -> account::signin
/// POST   /signout          -> account::signout (requires auth)
/// POST   /refresh-token    -> account::refresh_token
///
/// POST   /                 -> customer::create
/// GET    /                 -> customer::list
/// GET    /{uuid}           -> customer::get_by_uuid
/// PATCH  /{uuid}           -> customer::update
/// DELETE /{uuid}           -> customer::delete
///
/// POST   /profile          -> profile::create
/// GET    /profile          -> profile::get
/// PATCH  /profile          -> profile::update
/// DELETE /profile          -> profile::delete
/// GET    /profile/detail   -> profile::detail
///
/// POST   /limit            -> limit::create
/// GET    /limit            -> limit::list
/// GET    /limit/{id}       -> limit::get_by_id
/// PATCH  /limit/{id}       -> limit::update
/// DELETE /limit/{id}       -> limit::delete
///
/// GET    /token            -> token::list
/// GET    /token/{id}       -> token::get_by_id
/// DELETE /token/{id}       -> token::delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(account::signup))
        .route("/signin", post(account::signin))
        .route("/signout", post(account::signout))
        .route("/refresh-token", post(account::refresh_token))
        .route("/", post(customer::create).get(customer::list))
        .route(
            "/profile",
            post(profile::create)
                .get(profile::get)
                .patch(profile::update)
                .delete(profile::delete),
        )
        .route("/profile/detail", get(profile::detail))
        .route("/limit", post(limit::create).get(limit::list))
        .route(
            "/limit/{id}",
            get(limit::get_by_id)
                .patch(limit::update)
                .delete(limit::delete),
        )
        .route("/token", get(token::list))
        .route("/token/{id}", get(token::get_by_id).delete(token::delete))
        .route(
            "/{uuid}",
            get(customer::get_by_uuid)
                .patch(customer::update)
                .delete(customer::delete),
        )
}
