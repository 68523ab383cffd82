//! Checkout transaction model and DTOs.

use kredit_core::types::{DbId, Money, Tenor, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::asset::Asset;

/// A row from the `transactions` table.
///
/// `asset_id` is `None` only between the insert and the asset link, both of
/// which happen inside the checkout's database transaction.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Transaction {
    #[serde(skip_serializing)]
    pub id: DbId,
    pub uuid: Uuid,
    pub customer_id: DbId,
    pub asset_id: Option<DbId>,
    pub contract_number: String,
    pub otr_amount: Money,
    pub admin_fee: Money,
    pub installment_amount: Money,
    pub installment_period: Tenor,
    pub interest_amount: Money,
    pub sales_channel: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a transaction before its asset exists.
#[derive(Debug)]
pub struct CreateTransaction {
    pub uuid: Uuid,
    pub customer_id: DbId,
    pub contract_number: String,
    pub otr_amount: Money,
    pub admin_fee: Money,
    pub installment_amount: Money,
    pub installment_period: Tenor,
    pub interest_amount: Money,
    pub sales_channel: String,
}

/// Administrative edits. Amounts and tenor are immutable after checkout.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTransaction {
    pub contract_number: Option<String>,
    pub sales_channel: Option<String>,
}

/// A transaction together with its linked asset.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionDetail {
    pub transaction: Transaction,
    pub asset: Option<Asset>,
}
