//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- access/refresh token pair minting, validation, and storage digests.

pub mod jwt;
pub mod password;
