//! Domain services that coordinate repositories inside database transactions.
//!
//! - [`ledger::CreditLedger`] -- per-tenor credit limits and atomic debits.
//! - [`checkout::CheckoutOrchestrator`] -- debit + transaction + asset as one unit.
//! - [`account::AccountLifecycle`] -- signup, signin, signout, token refresh.

pub mod account;
pub mod checkout;
pub mod ledger;
