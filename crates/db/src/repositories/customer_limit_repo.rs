//! Repository for the `customer_limits` table.
//!
//! [`CustomerLimitRepo::reserve`] is the only write path used by checkout.
//! It debits with a single conditional `UPDATE`, so the row lock plus the
//! re-checked `limit_amount >= $3` predicate serialize concurrent debits
//! against the same (customer, tenor) pair.

use kredit_core::types::{DbId, Money, Tenor};
use sqlx::{PgExecutor, PgPool};

use crate::models::customer_limit::{CreateCustomerLimit, CustomerLimit, UpdateCustomerLimit};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, customer_id, tenor, limit_amount, created_at, updated_at";

/// Provides ledger and CRUD operations for per-tenor credit limits.
pub struct CustomerLimitRepo;

impl CustomerLimitRepo {
    /// Insert a limit row. Fails with a unique violation on
    /// `uq_customer_limits_customer_tenor` if the pair already exists.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &CreateCustomerLimit,
    ) -> Result<CustomerLimit, sqlx::Error> {
        let query = format!(
            "INSERT INTO customer_limits (customer_id, tenor, limit_amount)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CustomerLimit>(&query)
            .bind(input.customer_id)
            .bind(input.tenor)
            .bind(input.limit_amount)
            .fetch_one(executor)
            .await
    }

    /// Current row for a (customer, tenor) pair.
    pub async fn find_for_tenor<'e, E: PgExecutor<'e>>(
        executor: E,
        customer_id: DbId,
        tenor: Tenor,
    ) -> Result<Option<CustomerLimit>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM customer_limits WHERE customer_id = $1 AND tenor = $2"
        );
        sqlx::query_as::<_, CustomerLimit>(&query)
            .bind(customer_id)
            .bind(tenor)
            .fetch_optional(executor)
            .await
    }

    /// Find a limit by ID, scoped to its owner.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        customer_id: DbId,
    ) -> Result<Option<CustomerLimit>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM customer_limits WHERE id = $1 AND customer_id = $2");
        sqlx::query_as::<_, CustomerLimit>(&query)
            .bind(id)
            .bind(customer_id)
            .fetch_optional(pool)
            .await
    }

    /// List a customer's limits in ascending tenor order, optionally for one tenor.
    pub async fn list_for_customer(
        pool: &PgPool,
        customer_id: DbId,
        tenor: Option<Tenor>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CustomerLimit>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM customer_limits
             WHERE customer_id = $1 AND ($2::INTEGER IS NULL OR tenor = $2)
             ORDER BY tenor ASC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, CustomerLimit>(&query)
            .bind(customer_id)
            .bind(tenor)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count rows matching the same filter as [`Self::list_for_customer`].
    pub async fn count_for_customer(
        pool: &PgPool,
        customer_id: DbId,
        tenor: Option<Tenor>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM customer_limits
             WHERE customer_id = $1 AND ($2::INTEGER IS NULL OR tenor = $2)",
        )
        .bind(customer_id)
        .bind(tenor)
        .fetch_one(pool)
        .await
    }

    /// Atomically debit `amount` from the (customer, tenor) row.
    ///
    /// Returns the updated row, or `None` when the pair does not exist or the
    /// available amount is smaller than `amount`. Nothing is written in the
    /// `None` case.
    pub async fn reserve<'e, E: PgExecutor<'e>>(
        executor: E,
        customer_id: DbId,
        tenor: Tenor,
        amount: Money,
    ) -> Result<Option<CustomerLimit>, sqlx::Error> {
        let query = format!(
            "UPDATE customer_limits SET limit_amount = limit_amount - $3
             WHERE customer_id = $1 AND tenor = $2 AND limit_amount >= $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CustomerLimit>(&query)
            .bind(customer_id)
            .bind(tenor)
            .bind(amount)
            .fetch_optional(executor)
            .await
    }

    /// Explicit limit management. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        customer_id: DbId,
        input: &UpdateCustomerLimit,
    ) -> Result<Option<CustomerLimit>, sqlx::Error> {
        let query = format!(
            "UPDATE customer_limits SET
                tenor = COALESCE($3, tenor),
                limit_amount = COALESCE($4, limit_amount)
             WHERE id = $1 AND customer_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CustomerLimit>(&query)
            .bind(id)
            .bind(customer_id)
            .bind(input.tenor)
            .bind(input.limit_amount)
            .fetch_optional(pool)
            .await
    }

    /// Delete a limit row. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, customer_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM customer_limits WHERE id = $1 AND customer_id = $2")
            .bind(id)
            .bind(customer_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
