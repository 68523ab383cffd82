//! Session-backed authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::Utc;
use kredit_core::error::CoreError;
use kredit_core::types::DbId;
use kredit_db::repositories::CustomerTokenRepo;
use uuid::Uuid;

use crate::auth::jwt::{hash_token, validate_access_token};
use crate::error::AppError;
use crate::state::AppState;

/// The authenticated customer behind an `Authorization: Bearer <jwt>` header.
///
/// A token is accepted only if its signature and expiry are valid *and* the
/// session row it belongs to still exists and has not expired. Sign-in and
/// refresh delete older rows, so superseded tokens stop working immediately.
///
/// ```ignore
/// async fn my_handler(auth: AuthCustomer) -> AppResult<Json<()>> {
///     tracing::info!(customer_id = auth.customer_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AuthCustomer {
    /// Internal database id of the customer.
    pub customer_id: DbId,
    /// Public UUID of the customer (from `claims.sub`).
    pub customer_uuid: Uuid,
}

fn unauthenticated(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthenticated(msg.into()))
}

impl FromRequestParts<AppState> for AuthCustomer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthenticated("Missing Authorization header"))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            unauthenticated("Invalid Authorization format. Expected: Bearer <token>")
        })?;

        let claims = validate_access_token(token, &state.config.jwt)
            .map_err(|_| unauthenticated("Invalid or expired token"))?;
        let customer_uuid = claims
            .customer_uuid()
            .ok_or_else(|| unauthenticated("Invalid token subject"))?;

        let session = CustomerTokenRepo::find_by_access_token_hash(&state.pool, &hash_token(token))
            .await?
            .ok_or_else(|| unauthenticated("Session not found"))?;

        if session.access_token_expired_at <= Utc::now() {
            return Err(unauthenticated("Session expired"));
        }

        Ok(AuthCustomer {
            customer_id: session.customer_id,
            customer_uuid,
        })
    }
}
