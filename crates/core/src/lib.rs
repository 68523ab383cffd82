//! Domain logic for the Kredit installment-credit backend.
//!
//! Everything here is pure: no database, no HTTP. The `db` and `api` crates
//! build on these types and rules.

pub mod checkout;
pub mod credit;
pub mod error;
pub mod identity;
pub mod pagination;
pub mod types;
