//! Repository for the `assets` table.

use kredit_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::asset::{Asset, CreateAsset};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, asset_type, description, price, created_at, updated_at";

/// Provides persistence for financed assets.
pub struct AssetRepo;

impl AssetRepo {
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &CreateAsset,
    ) -> Result<Asset, sqlx::Error> {
        let query = format!(
            "INSERT INTO assets (name, asset_type, description, price)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(&input.name)
            .bind(&input.asset_type)
            .bind(&input.description)
            .bind(input.price)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assets WHERE id = $1");
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Batch lookup used to attach assets to a page of transactions.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Asset>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM assets WHERE id = ANY($1)");
        sqlx::query_as::<_, Asset>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM assets")
            .fetch_one(pool)
            .await
    }
}
