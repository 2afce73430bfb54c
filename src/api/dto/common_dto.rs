//! Shared DTO types used across multiple endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Hard cap on the page size any list endpoint will serve.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// `limit`/`offset` query parameters for list endpoints.
///
/// Endpoints differ in their default page size, so the default is
/// supplied at resolution time rather than baked into the struct.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Maximum number of items returned. Defaults per endpoint.
    #[serde(default)]
    pub limit: Option<u32>,
    /// Number of items skipped before the page starts. Defaults to 0.
    #[serde(default)]
    pub offset: u32,
}

impl PageParams {
    /// Resolves to a concrete `(limit, offset)` pair, clamping the limit
    /// between 1 and [`MAX_PAGE_LIMIT`].
    #[must_use]
    pub fn resolve(&self, default_limit: u32) -> (usize, usize) {
        let limit = self.limit.unwrap_or(default_limit).clamp(1, MAX_PAGE_LIMIT);
        (limit as usize, self.offset as usize)
    }
}

/// Pagination metadata included in list responses.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct PageMeta {
    /// Page size actually applied.
    pub limit: u32,
    /// Offset actually applied.
    pub offset: u32,
    /// Total number of items matching the filter.
    pub total: u32,
}
