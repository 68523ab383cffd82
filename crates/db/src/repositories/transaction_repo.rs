//! Repository for the `transactions` table.

use kredit_core::types::DbId;
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::models::transaction::{CreateTransaction, Transaction, UpdateTransaction};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, uuid, customer_id, asset_id, contract_number, otr_amount, \
                       admin_fee, installment_amount, installment_period, interest_amount, \
                       sales_channel, created_at, updated_at";

/// Provides persistence for checkout transactions.
pub struct TransactionRepo;

impl TransactionRepo {
    /// Insert a transaction with no asset linked yet.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &CreateTransaction,
    ) -> Result<Transaction, sqlx::Error> {
        let query = format!(
            "INSERT INTO transactions
                (uuid, customer_id, contract_number, otr_amount, admin_fee,
                 installment_amount, installment_period, interest_amount, sales_channel)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Transaction>(&query)
            .bind(input.uuid)
            .bind(input.customer_id)
            .bind(&input.contract_number)
            .bind(input.otr_amount)
            .bind(input.admin_fee)
            .bind(input.installment_amount)
            .bind(input.installment_period)
            .bind(input.interest_amount)
            .bind(&input.sales_channel)
            .fetch_one(executor)
            .await
    }

    /// Point a transaction at its asset, returning the updated row.
    pub async fn link_asset<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
        asset_id: DbId,
    ) -> Result<Transaction, sqlx::Error> {
        let query = format!(
            "UPDATE transactions SET asset_id = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Transaction>(&query)
            .bind(id)
            .bind(asset_id)
            .fetch_one(executor)
            .await
    }

    /// Find a transaction by UUID regardless of owner.
    pub async fn find_by_uuid(
        pool: &PgPool,
        uuid: Uuid,
    ) -> Result<Option<Transaction>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM transactions WHERE uuid = $1");
        sqlx::query_as::<_, Transaction>(&query)
            .bind(uuid)
            .fetch_optional(pool)
            .await
    }

    /// Find a transaction by UUID, scoped to its owner.
    pub async fn find_for_customer(
        pool: &PgPool,
        uuid: Uuid,
        customer_id: DbId,
    ) -> Result<Option<Transaction>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM transactions WHERE uuid = $1 AND customer_id = $2");
        sqlx::query_as::<_, Transaction>(&query)
            .bind(uuid)
            .bind(customer_id)
            .fetch_optional(pool)
            .await
    }

    /// List a customer's transactions, newest first.
    pub async fn list_for_customer(
        pool: &PgPool,
        customer_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transaction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM transactions
             WHERE customer_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Transaction>(&query)
            .bind(customer_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count_for_customer(pool: &PgPool, customer_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE customer_id = $1")
            .bind(customer_id)
            .fetch_one(pool)
            .await
    }

    /// Count every transaction row, regardless of owner.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(pool)
            .await
    }

    /// Administrative edit. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        uuid: Uuid,
        customer_id: DbId,
        input: &UpdateTransaction,
    ) -> Result<Option<Transaction>, sqlx::Error> {
        let query = format!(
            "UPDATE transactions SET
                contract_number = COALESCE($3, contract_number),
                sales_channel = COALESCE($4, sales_channel)
             WHERE uuid = $1 AND customer_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Transaction>(&query)
            .bind(uuid)
            .bind(customer_id)
            .bind(&input.contract_number)
            .bind(&input.sales_channel)
            .fetch_optional(pool)
            .await
    }

    /// Delete a transaction. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, uuid: Uuid, customer_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM transactions WHERE uuid = $1 AND customer_id = $2")
            .bind(uuid)
            .bind(customer_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
