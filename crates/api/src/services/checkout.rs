//! Checkout: turn an installment request into a committed transaction and
//! asset, debiting the customer's credit limit at the requested tenor.

use std::sync::Arc;

use kredit_core::checkout::InstallmentTerms;
use kredit_core::error::CoreError;
use kredit_core::types::{Money, Tenor};
use kredit_db::models::asset::CreateAsset;
use kredit_db::models::transaction::{CreateTransaction, Transaction};
use kredit_db::repositories::{AssetRepo, CustomerRepo, TransactionRepo};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthCustomer;
use crate::services::ledger::CreditLedger;

/// Request body for `POST /transaction/checkout`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CheckoutRequest {
    #[validate(length(min = 1, max = 100, message = "contract_number is required"))]
    pub contract_number: String,
    pub otr_amount: Money,
    pub admin_fee: Money,
    pub installment_amount: Money,
    pub installment_period: Tenor,
    pub interest_amount: Money,
    #[validate(length(min = 1, max = 50, message = "sales_channel is required"))]
    pub sales_channel: String,
    #[validate(length(min = 1, max = 255, message = "asset_name is required"))]
    pub asset_name: String,
    #[validate(length(min = 1, max = 100, message = "asset_type is required"))]
    pub asset_type: String,
    #[serde(default)]
    pub asset_description: Option<String>,
    pub asset_price: Money,
}

impl CheckoutRequest {
    fn terms(&self) -> InstallmentTerms {
        InstallmentTerms {
            installment_period: self.installment_period,
            installment_amount: self.installment_amount,
            otr_amount: self.otr_amount,
            admin_fee: self.admin_fee,
            interest_amount: self.interest_amount,
            asset_price: self.asset_price,
        }
    }
}

/// Runs the checkout protocol.
///
/// The limit debit, the transaction insert, the asset insert and the link
/// all share one database transaction. Any failure rolls every write back,
/// including the debit.
pub struct CheckoutOrchestrator {
    pool: PgPool,
    ledger: Arc<CreditLedger>,
}

impl CheckoutOrchestrator {
    pub fn new(pool: PgPool, ledger: Arc<CreditLedger>) -> Self {
        Self { pool, ledger }
    }

    /// Debit the caller's limit at `installment_period` by `installment_amount`
    /// and persist the transaction with its asset linked.
    pub async fn checkout(
        &self,
        identity: &AuthCustomer,
        request: CheckoutRequest,
    ) -> AppResult<Transaction> {
        let customer = CustomerRepo::find_by_uuid(&self.pool, identity.customer_uuid)
            .await?
            .ok_or_else(|| CoreError::not_found("Customer", identity.customer_uuid))?;

        request.validate()?;
        request.terms().validate()?;

        let tenor = request.installment_period;
        let mut tx = self.pool.begin().await?;

        self.ledger
            .reserve(&mut *tx, customer.id, tenor, request.installment_amount)
            .await
            .map_err(|err| match err {
                AppError::Core(CoreError::NotFound { .. }) => AppError::Core(
                    CoreError::Forbidden(format!("No credit limit for tenor {tenor}")),
                ),
                other => other,
            })?;

        let transaction = TransactionRepo::create(
            &mut *tx,
            &CreateTransaction {
                uuid: Uuid::new_v4(),
                customer_id: customer.id,
                contract_number: request.contract_number,
                otr_amount: request.otr_amount,
                admin_fee: request.admin_fee,
                installment_amount: request.installment_amount,
                installment_period: tenor,
                interest_amount: request.interest_amount,
                sales_channel: request.sales_channel,
            },
        )
        .await?;

        let asset = AssetRepo::create(
            &mut *tx,
            &CreateAsset {
                name: request.asset_name,
                asset_type: request.asset_type,
                description: request.asset_description,
                price: request.asset_price,
            },
        )
        .await?;

        let transaction = TransactionRepo::link_asset(&mut *tx, transaction.id, asset.id).await?;

        tx.commit().await?;

        tracing::info!(
            customer_id = customer.id,
            transaction_uuid = %transaction.uuid,
            asset_id = asset.id,
            tenor,
            amount = %transaction.installment_amount,
            "Checkout committed",
        );

        Ok(transaction)
    }
}
