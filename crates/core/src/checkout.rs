//! Monetary rules for an installment checkout, independent of transport.

use rust_decimal::Decimal;

use crate::credit::check_money_scale;
use crate::error::CoreError;
use crate::types::{Money, Tenor};

/// The numeric terms of a checkout request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallmentTerms {
    pub installment_period: Tenor,
    pub installment_amount: Money,
    pub otr_amount: Money,
    pub admin_fee: Money,
    pub interest_amount: Money,
    pub asset_price: Money,
}

impl InstallmentTerms {
    /// Validate the terms. The first violated rule is reported.
    ///
    /// - `installment_period` must be a positive number of months.
    /// - `installment_amount` and `asset_price` must be greater than zero.
    /// - `otr_amount`, `admin_fee`, and `interest_amount` must not be negative.
    /// - No amount may carry more than two decimal places.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.installment_period <= 0 {
            return Err(CoreError::Validation(
                "installment_period must be a positive number of months".into(),
            ));
        }
        require_positive("installment_amount", self.installment_amount)?;
        require_positive("asset_price", self.asset_price)?;
        require_non_negative("otr_amount", self.otr_amount)?;
        require_non_negative("admin_fee", self.admin_fee)?;
        require_non_negative("interest_amount", self.interest_amount)?;
        for (field, value) in [
            ("installment_amount", self.installment_amount),
            ("asset_price", self.asset_price),
            ("otr_amount", self.otr_amount),
            ("admin_fee", self.admin_fee),
            ("interest_amount", self.interest_amount),
        ] {
            check_money_scale(field, value)?;
        }
        Ok(())
    }
}

fn require_positive(field: &str, value: Money) -> Result<(), CoreError> {
    if value <= Decimal::ZERO {
        return Err(CoreError::Validation(format!(
            "{field} must be greater than zero"
        )));
    }
    Ok(())
}

fn require_non_negative(field: &str, value: Money) -> Result<(), CoreError> {
    if value < Decimal::ZERO {
        return Err(CoreError::Validation(format!("{field} must not be negative")));
    }
    Ok(())
}
