//! Repositories: one zero-sized struct per table.
//!
//! Methods that must participate in a caller's database transaction are
//! generic over [`sqlx::PgExecutor`], so they accept either `&PgPool` or
//! `&mut *tx`. Everything else takes `&PgPool` directly.

pub mod asset_repo;
pub mod customer_limit_repo;
pub mod customer_profile_repo;
pub mod customer_repo;
pub mod customer_token_repo;
pub mod transaction_repo;

pub use asset_repo::AssetRepo;
pub use customer_limit_repo::CustomerLimitRepo;
pub use customer_profile_repo::CustomerProfileRepo;
pub use customer_repo::CustomerRepo;
pub use customer_token_repo::CustomerTokenRepo;
pub use transaction_repo::TransactionRepo;
