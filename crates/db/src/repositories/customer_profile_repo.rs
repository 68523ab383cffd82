//! Repository for the `customer_profiles` table.

use kredit_core::types::DbId;
use sqlx::PgPool;

use crate::models::customer_profile::{CustomerProfile, ProfileFields};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, customer_id, nik, full_name, legal_name, place_of_birth, \
                       date_of_birth, salary, ktp_image, selfie_image, created_at, updated_at";

/// Provides CRUD operations for the single profile a customer may own.
pub struct CustomerProfileRepo;

impl CustomerProfileRepo {
    /// Create the customer's profile. Fails with a unique violation on
    /// `uq_customer_profiles_customer` if one already exists.
    pub async fn create(
        pool: &PgPool,
        customer_id: DbId,
        input: &ProfileFields,
    ) -> Result<CustomerProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO customer_profiles
                (customer_id, nik, full_name, legal_name, place_of_birth,
                 date_of_birth, salary, ktp_image, selfie_image)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CustomerProfile>(&query)
            .bind(customer_id)
            .bind(&input.nik)
            .bind(&input.full_name)
            .bind(&input.legal_name)
            .bind(&input.place_of_birth)
            .bind(input.date_of_birth)
            .bind(input.salary)
            .bind(&input.ktp_image)
            .bind(&input.selfie_image)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_customer(
        pool: &PgPool,
        customer_id: DbId,
    ) -> Result<Option<CustomerProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customer_profiles WHERE customer_id = $1");
        sqlx::query_as::<_, CustomerProfile>(&query)
            .bind(customer_id)
            .fetch_optional(pool)
            .await
    }

    /// Update the customer's profile. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        customer_id: DbId,
        input: &ProfileFields,
    ) -> Result<Option<CustomerProfile>, sqlx::Error> {
        let query = format!(
            "UPDATE customer_profiles SET
                nik = COALESCE($2, nik),
                full_name = COALESCE($3, full_name),
                legal_name = COALESCE($4, legal_name),
                place_of_birth = COALESCE($5, place_of_birth),
                date_of_birth = COALESCE($6, date_of_birth),
                salary = COALESCE($7, salary),
                ktp_image = COALESCE($8, ktp_image),
                selfie_image = COALESCE($9, selfie_image)
             WHERE customer_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CustomerProfile>(&query)
            .bind(customer_id)
            .bind(&input.nik)
            .bind(&input.full_name)
            .bind(&input.legal_name)
            .bind(&input.place_of_birth)
            .bind(input.date_of_birth)
            .bind(input.salary)
            .bind(&input.ktp_image)
            .bind(&input.selfie_image)
            .fetch_optional(pool)
            .await
    }

    /// Delete the customer's profile. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, customer_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM customer_profiles WHERE customer_id = $1")
            .bind(customer_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
