//! Customer entity model and DTOs.

use kredit_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Full customer row from the `customers` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`CustomerResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Customer {
    pub id: DbId,
    pub uuid: Uuid,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe customer representation for API responses (no id, no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct CustomerResponse {
    pub uuid: Uuid,
    pub email: String,
    pub phone: String,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Customer> for CustomerResponse {
    fn from(c: Customer) -> Self {
        Self {
            uuid: c.uuid,
            email: c.email,
            phone: c.phone,
            last_login_at: c.last_login_at,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// DTO for creating a new customer. The password must already be hashed.
#[derive(Debug)]
pub struct CreateCustomer {
    pub uuid: Uuid,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
}

/// DTO for updating an existing customer. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCustomer {
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Equality filters for listing customers.
#[derive(Debug, Default, Deserialize)]
pub struct CustomerFilter {
    pub email: Option<String>,
    pub phone: Option<String>,
}
