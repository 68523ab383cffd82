//! Account lifecycle: signup, signin, signout, and token refresh.
//!
//! A customer holds at most one live session. Signin and refresh replace
//! every existing `customer_tokens` row inside the same database transaction
//! that stores the new pair.

use std::sync::Arc;

use chrono::Utc;
use kredit_core::error::CoreError;
use kredit_core::identity::{is_valid_phone, normalize_phone, SigninIdentifier};
use kredit_core::types::DbId;
use kredit_db::models::customer::{CreateCustomer, Customer, CustomerResponse};
use kredit_db::models::customer_token::CreateCustomerToken;
use kredit_db::repositories::{CustomerRepo, CustomerTokenRepo};
use serde::Deserialize;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::auth::jwt::{
    generate_token_pair, hash_token, validate_refresh_token, JwtConfig, TokenDetails,
};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthCustomer;
use crate::middleware::client::ClientMeta;
use crate::services::ledger::CreditLedger;

const WRONG_CREDENTIALS: &str = "Wrong credentials";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /customer/signup` and `POST /customer`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    pub password: String,
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if is_valid_phone(phone) {
        Ok(())
    } else {
        Err(ValidationError::new("phone")
            .with_message("phone must be 10-13 digits starting with 08 or +62".into()))
    }
}

/// Request body for `POST /customer/signin`. Exactly one of `email`/`phone`.
#[derive(Debug, Clone, Deserialize)]
pub struct SigninRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub password: String,
}

/// Request body for `POST /customer/refresh-token`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "refresh_token is required"))]
    pub refresh_token: String,
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

pub struct AccountLifecycle {
    pool: PgPool,
    jwt: JwtConfig,
    ledger: Arc<CreditLedger>,
}

impl AccountLifecycle {
    pub fn new(pool: PgPool, jwt: JwtConfig, ledger: Arc<CreditLedger>) -> Self {
        Self { pool, jwt, ledger }
    }

    /// Register a customer and seed their default credit limits.
    ///
    /// The customer row and every limit row commit together or not at all.
    pub async fn signup(&self, request: SignupRequest) -> AppResult<CustomerResponse> {
        let input = self.prepare_customer(&request)?;

        let mut tx = self.pool.begin().await?;
        let customer = CustomerRepo::create(&mut *tx, &input).await?;
        self.ledger.initialize(&mut *tx, customer.id).await?;
        tx.commit().await?;

        tracing::info!(customer_id = customer.id, uuid = %customer.uuid, "Customer signed up");
        Ok(customer.into())
    }

    /// Register a customer without seeding credit limits.
    pub async fn create_customer(&self, request: SignupRequest) -> AppResult<CustomerResponse> {
        let input = self.prepare_customer(&request)?;
        let customer = CustomerRepo::create(&self.pool, &input).await?;

        tracing::info!(customer_id = customer.id, uuid = %customer.uuid, "Customer created");
        Ok(customer.into())
    }

    /// Authenticate by email or phone and password, replacing any existing
    /// session with a fresh token pair.
    pub async fn signin(
        &self,
        request: SigninRequest,
        client: ClientMeta,
    ) -> AppResult<TokenDetails> {
        let identifier =
            SigninIdentifier::resolve(request.email.as_deref(), request.phone.as_deref())?;
        if request.password.is_empty() {
            return Err(AppError::BadRequest("password is required".into()));
        }

        let customer = match &identifier {
            SigninIdentifier::Email(email) => {
                CustomerRepo::find_by_email(&self.pool, &email.to_lowercase()).await?
            }
            SigninIdentifier::Phone(phone) => {
                let phone = normalize_phone(phone).unwrap_or_else(|| phone.clone());
                CustomerRepo::find_by_phone(&self.pool, &phone).await?
            }
        }
        .ok_or_else(|| CoreError::Unauthorized(WRONG_CREDENTIALS.into()))?;

        let matches = verify_password(&request.password, &customer.password_hash)
            .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
        if !matches {
            tracing::info!(customer_id = customer.id, "Signin rejected: wrong password");
            return Err(AppError::Core(CoreError::Unauthorized(
                WRONG_CREDENTIALS.into(),
            )));
        }

        let tokens = self.mint(&customer)?;

        let mut tx = self.pool.begin().await?;
        lock_customer(&mut *tx, customer.id).await?;
        CustomerRepo::record_login(&mut *tx, customer.id).await?;
        self.replace_sessions(&mut *tx, customer.id, &tokens, client).await?;
        tx.commit().await?;

        tracing::info!(customer_id = customer.id, "Customer signed in");
        Ok(tokens)
    }

    /// Revoke every session of the authenticated customer.
    pub async fn signout(&self, identity: &AuthCustomer) -> AppResult<u64> {
        let revoked =
            CustomerTokenRepo::delete_all_for_customer(&self.pool, identity.customer_id).await?;
        tracing::info!(customer_id = identity.customer_id, revoked, "Customer signed out");
        Ok(revoked)
    }

    /// Exchange a live refresh token for a new pair.
    ///
    /// An unknown or expired refresh token is rejected without touching the
    /// stored session.
    pub async fn refresh(
        &self,
        request: RefreshTokenRequest,
        client: ClientMeta,
    ) -> AppResult<TokenDetails> {
        request.validate()?;

        let session = CustomerTokenRepo::find_by_refresh_token_hash(
            &self.pool,
            &hash_token(&request.refresh_token),
        )
        .await?
        .ok_or_else(|| CoreError::Unauthorized("Refresh token not recognised".into()))?;

        if session.refresh_token_expired_at <= Utc::now() {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Refresh token expired".into(),
            )));
        }

        let claims = validate_refresh_token(&request.refresh_token, &self.jwt)
            .map_err(|_| CoreError::Unauthorized("Invalid refresh token".into()))?;

        let customer = CustomerRepo::find_by_id(&self.pool, session.customer_id)
            .await?
            .filter(|c| claims.customer_uuid() == Some(c.uuid))
            .ok_or_else(|| CoreError::Unauthorized("Invalid refresh token".into()))?;

        let tokens = self.mint(&customer)?;

        let mut tx = self.pool.begin().await?;
        lock_customer(&mut *tx, customer.id).await?;
        self.replace_sessions(&mut *tx, customer.id, &tokens, client).await?;
        tx.commit().await?;

        tracing::info!(customer_id = customer.id, "Session refreshed");
        Ok(tokens)
    }

    fn prepare_customer(&self, request: &SignupRequest) -> AppResult<CreateCustomer> {
        request.validate()?;
        validate_password_strength(&request.password)?;

        let phone = normalize_phone(&request.phone)
            .ok_or_else(|| AppError::BadRequest("phone is invalid".into()))?;
        let password_hash = hash_password(&request.password)
            .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

        Ok(CreateCustomer {
            uuid: Uuid::new_v4(),
            email: request.email.trim().to_lowercase(),
            phone,
            password_hash,
        })
    }

    fn mint(&self, customer: &Customer) -> AppResult<TokenDetails> {
        generate_token_pair(customer.uuid, &self.jwt)
            .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))
    }

    async fn replace_sessions(
        &self,
        conn: &mut PgConnection,
        customer_id: DbId,
        tokens: &TokenDetails,
        client: ClientMeta,
    ) -> Result<(), sqlx::Error> {
        CustomerTokenRepo::delete_all_for_customer(&mut *conn, customer_id).await?;
        CustomerTokenRepo::create(
            &mut *conn,
            &CreateCustomerToken {
                customer_id,
                access_token_hash: hash_token(&tokens.access_token),
                refresh_token_hash: hash_token(&tokens.refresh_token),
                user_agent: client.user_agent,
                ip_address: client.ip_address,
                access_token_expired_at: tokens.access_expires_at(),
                refresh_token_expired_at: tokens.refresh_expires_at(),
            },
        )
        .await?;
        Ok(())
    }
}

/// Serialize session replacement for one customer. A customer deleted in
/// the meantime can no longer sign in.
async fn lock_customer(conn: &mut PgConnection, customer_id: DbId) -> AppResult<()> {
    if !CustomerRepo::lock_for_update(&mut *conn, customer_id).await? {
        return Err(AppError::Core(CoreError::Unauthorized(
            WRONG_CREDENTIALS.into(),
        )));
    }
    Ok(())
}
