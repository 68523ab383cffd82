//! Shared response envelope for API handlers.
//!
//! Every response, success or failure, has the shape
//! `{ "success": bool, "message": string, "data": T, "meta"?: PageMeta }`.
//! Errors are rendered by [`crate::error::AppError`]; handlers build
//! successes with [`ApiResponse::ok`] or [`ApiResponse::page`].

use serde::Serialize;

/// Standard response envelope.
///
/// ```ignore
/// Ok(Json(ApiResponse::ok("Customer found", customer)))
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
            meta: None,
        }
    }

    /// A list page with its pagination metadata.
    pub fn page(message: impl Into<String>, data: T, meta: PageMeta) -> Self {
        Self {
            meta: Some(meta),
            ..Self::ok(message, data)
        }
    }
}

/// Pagination metadata attached to list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub limit: i64,
    pub offset: i64,
    pub total_count: i64,
}
