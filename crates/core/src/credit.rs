//! Per-tenor credit ceilings and ledger arithmetic.
//!
//! A customer owns one credit limit per tenor (repayment period in months).
//! [`TenorTable`] describes the ceilings provisioned at signup, and
//! [`check_reservation`] is the single rule every debit must pass: the
//! amount is positive and never exceeds what is still available.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::CoreError;
use crate::types::{Money, Tenor};

/// Decimal places kept for every stored amount (`NUMERIC(15,2)`).
pub const MONEY_SCALE: u32 = 2;

/// Default tenor table in its textual configuration form.
pub const DEFAULT_TENOR_LIMITS: &str = "1:100000.00,2:200000.00,3:500000.00,6:700000.00";

/// Errors produced while building a [`TenorTable`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TenorTableError {
    #[error("malformed tenor entry '{0}', expected <months>:<amount>")]
    Malformed(String),

    #[error("invalid tenor '{0}'")]
    InvalidTenor(String),

    #[error("invalid amount '{0}'")]
    InvalidAmount(String),

    #[error("tenor {0} must be a positive number of months")]
    NonPositiveTenor(Tenor),

    #[error("ceiling for tenor {0} must not be negative")]
    NegativeCeiling(Tenor),

    #[error("ceiling for tenor {0} has more than 2 decimal places")]
    SubCentCeiling(Tenor),

    #[error("tenor {0} is listed more than once")]
    DuplicateTenor(Tenor),

    #[error("tenor table must contain at least one entry")]
    Empty,
}

/// Mapping of tenor to the default credit ceiling seeded for new customers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenorTable(BTreeMap<Tenor, Money>);

impl TenorTable {
    /// Build a table from `(tenor, ceiling)` pairs.
    ///
    /// Rejects empty tables, non-positive tenors, negative or sub-cent
    /// ceilings, and duplicate tenors.
    pub fn new(entries: impl IntoIterator<Item = (Tenor, Money)>) -> Result<Self, TenorTableError> {
        let mut table = BTreeMap::new();
        for (tenor, ceiling) in entries {
            if tenor <= 0 {
                return Err(TenorTableError::NonPositiveTenor(tenor));
            }
            if ceiling.is_sign_negative() && !ceiling.is_zero() {
                return Err(TenorTableError::NegativeCeiling(tenor));
            }
            if exceeds_money_scale(ceiling) {
                return Err(TenorTableError::SubCentCeiling(tenor));
            }
            if table.insert(tenor, ceiling).is_some() {
                return Err(TenorTableError::DuplicateTenor(tenor));
            }
        }
        if table.is_empty() {
            return Err(TenorTableError::Empty);
        }
        Ok(Self(table))
    }

    /// Ceiling configured for `tenor`, if that tenor is provisioned.
    pub fn ceiling(&self, tenor: Tenor) -> Option<Money> {
        self.0.get(&tenor).copied()
    }

    /// Provisioned tenors in ascending order.
    pub fn tenors(&self) -> impl Iterator<Item = Tenor> + '_ {
        self.0.keys().copied()
    }

    /// `(tenor, ceiling)` pairs in ascending tenor order.
    pub fn iter(&self) -> impl Iterator<Item = (Tenor, Money)> + '_ {
        self.0.iter().map(|(tenor, ceiling)| (*tenor, *ceiling))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for TenorTable {
    /// 1 → 100000.00, 2 → 200000.00, 3 → 500000.00, 6 → 700000.00.
    fn default() -> Self {
        Self(BTreeMap::from([
            (1, Decimal::new(10_000_000, 2)),
            (2, Decimal::new(20_000_000, 2)),
            (3, Decimal::new(50_000_000, 2)),
            (6, Decimal::new(70_000_000, 2)),
        ]))
    }
}

impl FromStr for TenorTable {
    type Err = TenorTableError;

    /// Parse `"<months>:<amount>,<months>:<amount>,..."`. Whitespace around
    /// entries and separators is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut entries = Vec::new();
        for raw in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (tenor, amount) = raw
                .split_once(':')
                .ok_or_else(|| TenorTableError::Malformed(raw.to_string()))?;
            let tenor: Tenor = tenor
                .trim()
                .parse()
                .map_err(|_| TenorTableError::InvalidTenor(tenor.trim().to_string()))?;
            let amount = Decimal::from_str(amount.trim())
                .map_err(|_| TenorTableError::InvalidAmount(amount.trim().to_string()))?;
            entries.push((tenor, amount));
        }
        Self::new(entries)
    }
}

impl fmt::Display for TenorTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (tenor, ceiling) in self.iter() {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{tenor}:{ceiling}")?;
            first = false;
        }
        Ok(())
    }
}

fn exceeds_money_scale(value: Money) -> bool {
    value.normalize().scale() > MONEY_SCALE
}

/// Reject amounts finer than a cent. Storage would round them silently.
/// Trailing zeros do not count (`1.500` is accepted).
pub fn check_money_scale(field: &str, value: Money) -> Result<(), CoreError> {
    if exceeds_money_scale(value) {
        return Err(CoreError::Validation(format!(
            "{field} must have at most {MONEY_SCALE} decimal places"
        )));
    }
    Ok(())
}

/// Decide whether `amount` can be debited from `available` at `tenor`.
///
/// Returns the remaining amount after the debit. The result is never
/// negative.
pub fn check_reservation(tenor: Tenor, available: Money, amount: Money) -> Result<Money, CoreError> {
    if amount <= Decimal::ZERO {
        return Err(CoreError::Validation(
            "Reservation amount must be greater than zero".into(),
        ));
    }
    if available < amount {
        return Err(CoreError::InsufficientLimit {
            tenor,
            requested: amount,
            available,
        });
    }
    Ok(available - amount)
}
