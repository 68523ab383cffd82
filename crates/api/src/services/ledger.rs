//! Credit limit ledger: one balance per (customer, tenor).

use kredit_core::credit::{check_money_scale, check_reservation, TenorTable};
use kredit_core::error::CoreError;
use kredit_core::types::{DbId, Money, Tenor};
use kredit_db::models::customer_limit::{CreateCustomerLimit, CustomerLimit};
use kredit_db::repositories::CustomerLimitRepo;
use sqlx::{PgConnection, PgPool};

use crate::error::{AppError, AppResult};

/// Seeds and debits customer credit limits.
///
/// Write operations take a `&mut PgConnection` so callers can run them inside
/// their own database transaction (`&mut *tx`).
#[derive(Debug, Clone)]
pub struct CreditLedger {
    tenor_limits: TenorTable,
}

impl CreditLedger {
    pub fn new(tenor_limits: TenorTable) -> Self {
        Self { tenor_limits }
    }

    /// Default ceilings applied by [`Self::initialize`].
    pub fn tenor_limits(&self) -> &TenorTable {
        &self.tenor_limits
    }

    /// Insert one limit row per configured tenor for a new customer.
    pub async fn initialize(
        &self,
        conn: &mut PgConnection,
        customer_id: DbId,
    ) -> Result<Vec<CustomerLimit>, sqlx::Error> {
        let mut rows = Vec::with_capacity(self.tenor_limits.len());
        for (tenor, limit_amount) in self.tenor_limits.iter() {
            let row = CustomerLimitRepo::create(
                &mut *conn,
                &CreateCustomerLimit {
                    customer_id,
                    tenor,
                    limit_amount,
                },
            )
            .await?;
            rows.push(row);
        }
        tracing::debug!(customer_id, tenors = rows.len(), "Credit limits initialized");
        Ok(rows)
    }

    /// Current limit for a tenor, or `None` if it was never provisioned.
    pub async fn available(
        &self,
        pool: &PgPool,
        customer_id: DbId,
        tenor: Tenor,
    ) -> Result<Option<CustomerLimit>, sqlx::Error> {
        CustomerLimitRepo::find_for_tenor(pool, customer_id, tenor).await
    }

    /// Debit `amount` from the customer's limit at `tenor`.
    ///
    /// The debit is a single conditional update; concurrent calls against the
    /// same pair can never take the balance below zero. On failure nothing is
    /// written and the error says why:
    ///
    /// - `Validation` when `amount` is not positive or finer than a cent
    /// - `NotFound` when the tenor is not provisioned for the customer
    /// - `InsufficientLimit` when the balance is smaller than `amount`
    pub async fn reserve(
        &self,
        conn: &mut PgConnection,
        customer_id: DbId,
        tenor: Tenor,
        amount: Money,
    ) -> AppResult<CustomerLimit> {
        if amount.is_sign_negative() || amount.is_zero() {
            return Err(AppError::Core(CoreError::Validation(
                "Reservation amount must be greater than zero".into(),
            )));
        }
        check_money_scale("amount", amount)?;

        if let Some(row) = CustomerLimitRepo::reserve(&mut *conn, customer_id, tenor, amount).await? {
            tracing::info!(
                customer_id,
                tenor,
                %amount,
                remaining = %row.limit_amount,
                "Credit reserved",
            );
            return Ok(row);
        }

        let current = CustomerLimitRepo::find_for_tenor(&mut *conn, customer_id, tenor)
            .await?
            .ok_or_else(|| {
                CoreError::not_found("CustomerLimit", format!("tenor {tenor} of customer {customer_id}"))
            })?;

        check_reservation(tenor, current.limit_amount, amount)?;

        // The balance grew between the update and the re-read.
        Err(AppError::Core(CoreError::Conflict(
            "Credit limit changed during reservation, retry the request".into(),
        )))
    }
}
