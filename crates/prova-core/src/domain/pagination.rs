//! Offset/limit pagination math.
//!
//! Pure calculations shared by every listing flow: resolve a page request
//! into an offset window, and derive accurate page metadata from a grand
//! total. Out-of-range pages are never errors here; a page past the end
//! yields an empty window with truthful metadata.

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

// ============================================================================
// PAGE REQUEST
// ============================================================================

/// A validated page request: 1-based page number plus page size.
///
/// Construction assumes the values already passed shape validation
/// (`page >= 1`, `1 <= limit <= MAX_LIMIT`); the listing use case collects
/// violations before building one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u32,
    /// Page size
    pub limit: u32,
}

impl PageRequest {
    /// Page used when the caller sends none.
    pub const DEFAULT_PAGE: u32 = 1;
    /// Page size used when the caller sends none.
    pub const DEFAULT_LIMIT: u32 = 10;
    /// Largest accepted page size.
    pub const MAX_LIMIT: u32 = 100;

    /// Build a request from validated values.
    #[must_use]
    pub const fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    /// Fill absent values with the defaults. No validation happens here.
    #[must_use]
    pub fn resolve(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(Self::DEFAULT_PAGE),
            limit: limit.unwrap_or(Self::DEFAULT_LIMIT),
        }
    }

    /// Number of items skipped before this page starts.
    #[must_use]
    pub const fn offset(self) -> usize {
        (self.page.saturating_sub(1) as usize) * (self.limit as usize)
    }

    /// Page size as a `usize` for slicing.
    #[must_use]
    pub const fn limit_usize(self) -> usize {
        self.limit as usize
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAGE, Self::DEFAULT_LIMIT)
    }
}

// ============================================================================
// PAGE METADATA
// ============================================================================

/// Metadata describing one page of a larger result set.
///
/// `total_pages` is `ceil(total / limit)` and `0` for an empty set, so
/// `has_next = page < total_pages` is `false` both on the last page and past
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// 1-based page number that was requested
    pub page: u32,
    /// Requested page size
    pub limit: u32,
    /// Total number of items across all pages
    pub total: usize,
    /// Total number of pages (`0` when `total` is `0`)
    pub total_pages: u32,
    /// Whether a later page exists
    pub has_next: bool,
    /// Whether an earlier page exists
    pub has_previous: bool,
}

impl PageMeta {
    /// Derive the metadata for a request against a grand total.
    #[must_use]
    pub fn compute(request: PageRequest, total: usize) -> Self {
        let total_pages = total
            .div_ceil(request.limit_usize().max(1))
            .try_into()
            .unwrap_or(u32::MAX);

        Self {
            page: request.page,
            limit: request.limit,
            total,
            total_pages,
            has_next: request.page < total_pages,
            has_previous: request.page > 1,
        }
    }
}

// ============================================================================
// WINDOWING
// ============================================================================

/// Slice one page out of an already-sorted item list.
///
/// A window starting past the end is simply empty.
#[must_use]
pub fn page_window<T>(items: Vec<T>, request: PageRequest) -> Vec<T> {
    items
        .into_iter()
        .skip(request.offset())
        .take(request.limit_usize())
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
