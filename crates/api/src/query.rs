//! Shared query parameter types for API handlers.

use kredit_core::pagination::page_window;
use kredit_core::types::Tenor;
use serde::Deserialize;

use crate::response::PageMeta;

/// Generic pagination parameters (`?limit=&offset=`).
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Clamped `(limit, offset)` ready to bind into a query.
    pub fn resolve(&self) -> (i64, i64) {
        page_window(self.limit, self.offset)
    }

    pub fn meta(&self, total_count: i64) -> PageMeta {
        let (limit, offset) = self.resolve();
        PageMeta {
            limit,
            offset,
            total_count,
        }
    }
}

/// `GET /customer?email=&phone=&limit=&offset=`
#[derive(Debug, Default, Deserialize)]
pub struct CustomerListParams {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl CustomerListParams {
    pub fn page(&self) -> PaginationParams {
        PaginationParams {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

/// `GET /customer/limit?tenor=&limit=&offset=`
#[derive(Debug, Default, Deserialize)]
pub struct LimitListParams {
    pub tenor: Option<Tenor>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl LimitListParams {
    pub fn page(&self) -> PaginationParams {
        PaginationParams {
            limit: self.limit,
            offset: self.offset,
        }
    }
}
