//! Financed asset model.

use kredit_core::types::{DbId, Money, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `assets` table. Created once per successful checkout.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Asset {
    pub id: DbId,
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: String,
    pub description: Option<String>,
    pub price: Money,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an asset.
#[derive(Debug)]
pub struct CreateAsset {
    pub name: String,
    pub asset_type: String,
    pub description: Option<String>,
    pub price: Money,
}
