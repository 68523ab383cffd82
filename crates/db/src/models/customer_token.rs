//! Session rows issued at sign-in and rotated on refresh.

use kredit_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `customer_tokens` table.
///
/// Only SHA-256 digests of the tokens are stored; they are never serialized.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CustomerToken {
    pub id: DbId,
    pub customer_id: DbId,
    #[serde(skip_serializing)]
    pub access_token_hash: String,
    #[serde(skip_serializing)]
    pub refresh_token_hash: String,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub access_token_expired_at: Timestamp,
    pub refresh_token_expired_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for persisting a freshly minted token pair.
#[derive(Debug)]
pub struct CreateCustomerToken {
    pub customer_id: DbId,
    pub access_token_hash: String,
    pub refresh_token_hash: String,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub access_token_expired_at: Timestamp,
    pub refresh_token_expired_at: Timestamp,
}
