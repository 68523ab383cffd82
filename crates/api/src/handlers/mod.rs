pub mod account;
pub mod customer;
pub mod limit;
pub mod profile;
pub mod token;
pub mod transaction;
