//! Request extractors shared by handlers.
//!
//! - [`auth::AuthCustomer`] -- the customer behind a live Bearer session.
//! - [`client::ClientMeta`] -- user agent and IP recorded with new sessions.

pub mod auth;
pub mod client;
