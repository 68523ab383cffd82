//! Repository for the `customers` table.

use kredit_core::types::DbId;
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::models::customer::{CreateCustomer, Customer, CustomerFilter, UpdateCustomer};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, uuid, email, phone, password_hash, last_login_at, created_at, updated_at";

/// Provides CRUD operations for customers.
pub struct CustomerRepo;

impl CustomerRepo {
    /// Insert a new customer, returning the created row.
    ///
    /// Fails with a unique violation on `uq_customers_email`,
    /// `uq_customers_phone` or `uq_customers_uuid`.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &CreateCustomer,
    ) -> Result<Customer, sqlx::Error> {
        let query = format!(
            "INSERT INTO customers (uuid, email, phone, password_hash)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(input.uuid)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.password_hash)
            .fetch_one(executor)
            .await
    }

    /// Find a customer by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers WHERE id = $1");
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a customer by public UUID.
    pub async fn find_by_uuid(pool: &PgPool, uuid: Uuid) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers WHERE uuid = $1");
        sqlx::query_as::<_, Customer>(&query)
            .bind(uuid)
            .fetch_optional(pool)
            .await
    }

    /// Find a customer by email address.
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers WHERE email = $1");
        sqlx::query_as::<_, Customer>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find a customer by normalized phone number.
    pub async fn find_by_phone(
        pool: &PgPool,
        phone: &str,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers WHERE phone = $1");
        sqlx::query_as::<_, Customer>(&query)
            .bind(phone)
            .fetch_optional(pool)
            .await
    }

    /// List customers, newest first, optionally filtered by exact email/phone.
    pub async fn list(
        pool: &PgPool,
        filter: &CustomerFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Customer>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM customers
             WHERE ($1::TEXT IS NULL OR email = $1)
               AND ($2::TEXT IS NULL OR phone = $2)
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(&filter.email)
            .bind(&filter.phone)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count customers matching the same filter as [`Self::list`].
    pub async fn count(pool: &PgPool, filter: &CustomerFilter) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM customers
             WHERE ($1::TEXT IS NULL OR email = $1)
               AND ($2::TEXT IS NULL OR phone = $2)",
        )
        .bind(&filter.email)
        .bind(&filter.phone)
        .fetch_one(pool)
        .await
    }

    /// Update a customer's contact details. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no customer with the given UUID exists.
    pub async fn update(
        pool: &PgPool,
        uuid: Uuid,
        input: &UpdateCustomer,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!(
            "UPDATE customers SET
                email = COALESCE($2, email),
                phone = COALESCE($3, phone)
             WHERE uuid = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(uuid)
            .bind(&input.email)
            .bind(&input.phone)
            .fetch_optional(pool)
            .await
    }

    /// Stamp `last_login_at` with the current time.
    pub async fn record_login<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE customers SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Lock the customer row until the surrounding transaction ends.
    ///
    /// Session replacement takes this lock first so concurrent signins and
    /// refreshes for one customer run one after another. Returns `false` if
    /// the customer no longer exists.
    pub async fn lock_for_update<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let locked =
            sqlx::query_scalar::<_, DbId>("SELECT id FROM customers WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(executor)
                .await?;
        Ok(locked.is_some())
    }

    /// Delete a customer and, through cascades, everything they own.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, uuid: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM customers WHERE uuid = $1")
            .bind(uuid)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
