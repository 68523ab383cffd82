//! Row models and DTOs, one module per table.

pub mod asset;
pub mod customer;
pub mod customer_limit;
pub mod customer_profile;
pub mod customer_token;
pub mod transaction;
