//! Credit limit ledger rows: one per (customer, tenor).

use kredit_core::types::{DbId, Money, Tenor, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `customer_limits` table.
///
/// `limit_amount` is the credit still available at `tenor`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CustomerLimit {
    pub id: DbId,
    pub customer_id: DbId,
    pub tenor: Tenor,
    pub limit_amount: Money,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for provisioning a limit at a tenor.
#[derive(Debug)]
pub struct CreateCustomerLimit {
    pub customer_id: DbId,
    pub tenor: Tenor,
    pub limit_amount: Money,
}

/// DTO for explicit limit management. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCustomerLimit {
    pub tenor: Option<Tenor>,
    pub limit_amount: Option<Money>,
}
