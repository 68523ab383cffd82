//! Customer KYC profile model and DTOs.

use chrono::NaiveDate;
use kredit_core::types::{DbId, Money, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `customer_profiles` table. At most one per customer.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CustomerProfile {
    pub id: DbId,
    pub customer_id: DbId,
    pub nik: Option<String>,
    pub full_name: Option<String>,
    pub legal_name: Option<String>,
    pub place_of_birth: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub salary: Option<Money>,
    pub ktp_image: Option<String>,
    pub selfie_image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Profile fields accepted on create and update. All fields are optional.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ProfileFields {
    pub nik: Option<String>,
    pub full_name: Option<String>,
    pub legal_name: Option<String>,
    pub place_of_birth: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub salary: Option<Money>,
    pub ktp_image: Option<String>,
    pub selfie_image: Option<String>,
}
