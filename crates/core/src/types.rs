/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Monetary amounts are fixed-point decimals (`NUMERIC(15,2)` in storage).
pub type Money = rust_decimal::Decimal;

/// Repayment period in months. Also the partition key of a customer's credit limits.
pub type Tenor = i32;
