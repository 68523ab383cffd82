//! Repository for the `customer_tokens` table.

use kredit_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::customer_token::{CreateCustomerToken, CustomerToken};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, customer_id, access_token_hash, refresh_token_hash, user_agent, \
                       ip_address, access_token_expired_at, refresh_token_expired_at, \
                       created_at, updated_at";

/// Provides session persistence for issued token pairs.
pub struct CustomerTokenRepo;

impl CustomerTokenRepo {
    /// Persist a new token pair.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &CreateCustomerToken,
    ) -> Result<CustomerToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO customer_tokens
                (customer_id, access_token_hash, refresh_token_hash, user_agent,
                 ip_address, access_token_expired_at, refresh_token_expired_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CustomerToken>(&query)
            .bind(input.customer_id)
            .bind(&input.access_token_hash)
            .bind(&input.refresh_token_hash)
            .bind(&input.user_agent)
            .bind(&input.ip_address)
            .bind(input.access_token_expired_at)
            .bind(input.refresh_token_expired_at)
            .fetch_one(executor)
            .await
    }

    /// Look up a session by the SHA-256 digest of its access token.
    pub async fn find_by_access_token_hash(
        pool: &PgPool,
        hash: &str,
    ) -> Result<Option<CustomerToken>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customer_tokens WHERE access_token_hash = $1");
        sqlx::query_as::<_, CustomerToken>(&query)
            .bind(hash)
            .fetch_optional(pool)
            .await
    }

    /// Look up a session by the SHA-256 digest of its refresh token.
    pub async fn find_by_refresh_token_hash(
        pool: &PgPool,
        hash: &str,
    ) -> Result<Option<CustomerToken>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customer_tokens WHERE refresh_token_hash = $1");
        sqlx::query_as::<_, CustomerToken>(&query)
            .bind(hash)
            .fetch_optional(pool)
            .await
    }

    /// Find a session by ID, scoped to its owner.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        customer_id: DbId,
    ) -> Result<Option<CustomerToken>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM customer_tokens WHERE id = $1 AND customer_id = $2");
        sqlx::query_as::<_, CustomerToken>(&query)
            .bind(id)
            .bind(customer_id)
            .fetch_optional(pool)
            .await
    }

    /// Most recently issued session for a customer.
    pub async fn find_latest_for_customer(
        pool: &PgPool,
        customer_id: DbId,
    ) -> Result<Option<CustomerToken>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM customer_tokens
             WHERE customer_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, CustomerToken>(&query)
            .bind(customer_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_for_customer(
        pool: &PgPool,
        customer_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CustomerToken>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM customer_tokens
             WHERE customer_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, CustomerToken>(&query)
            .bind(customer_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count_for_customer(pool: &PgPool, customer_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM customer_tokens WHERE customer_id = $1")
            .bind(customer_id)
            .fetch_one(pool)
            .await
    }

    /// Revoke every session of a customer. Returns the number of rows removed.
    pub async fn delete_all_for_customer<'e, E: PgExecutor<'e>>(
        executor: E,
        customer_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM customer_tokens WHERE customer_id = $1")
            .bind(customer_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Revoke one session. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, customer_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM customer_tokens WHERE id = $1 AND customer_id = $2")
            .bind(id)
            .bind(customer_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
