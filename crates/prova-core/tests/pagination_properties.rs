#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

//! Property-based tests for the pagination math.
//!
//! Invariants covered:
//! - a window never exceeds the requested limit
//! - windows taken page by page partition the list exactly
//! - page metadata is a minimal cover of the total
//! - `has_next` / `has_previous` agree with the window arithmetic

use proptest::prelude::*;

use prova_core::domain::pagination::{page_window, PageMeta, PageRequest};

/// Shared proptest config for the pagination properties.
fn pagination_config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        max_shrink_iters: 512,
        ..ProptestConfig::default()
    }
}

// ============================================================================
// STRATEGIES
// ============================================================================

/// Any request a validated listing call could produce.
fn request_strategy() -> impl Strategy<Value = PageRequest> {
    (1..=40_u32, 1..=PageRequest::MAX_LIMIT).prop_map(|(page, limit)| PageRequest::new(page, limit))
}

/// Item lists up to a few pages long.
fn items_strategy() -> impl Strategy<Value = Vec<u32>> {
    proptest::collection::vec(any::<u32>(), 0..400)
}

// ============================================================================
// WINDOWING PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(pagination_config())]

    /// A window is never larger than the limit that asked for it.
    #[test]
    fn prop_window_never_exceeds_limit(
        items in items_strategy(),
        request in request_strategy(),
    ) {
        let window = page_window(items, request);
        prop_assert!(window.len() <= request.limit_usize());
    }

    /// A window is exactly the manual slice at `offset..offset + limit`.
    #[test]
    fn prop_window_matches_manual_slice(
        items in items_strategy(),
        request in request_strategy(),
    ) {
        let offset = request.offset();
        let expected: Vec<u32> = items
            .iter()
            .copied()
            .skip(offset)
            .take(request.limit_usize())
            .collect();

        prop_assert_eq!(page_window(items, request), expected);
    }

    /// Walking every page reassembles the original list, nothing lost,
    /// nothing repeated.
    #[test]
    fn prop_windows_partition_the_list(
        items in items_strategy(),
        limit in 1..=PageRequest::MAX_LIMIT,
    ) {
        let meta = PageMeta::compute(PageRequest::new(1, limit), items.len());

        let mut reassembled = Vec::with_capacity(items.len());
        for page in 1..=meta.total_pages.max(1) {
            let window = page_window(items.clone(), PageRequest::new(page, limit));
            reassembled.extend(window);
        }

        prop_assert_eq!(reassembled, items);
    }

    /// The page past the last one is always empty.
    #[test]
    fn prop_page_past_the_end_is_empty(
        items in items_strategy(),
        limit in 1..=PageRequest::MAX_LIMIT,
    ) {
        let meta = PageMeta::compute(PageRequest::new(1, limit), items.len());
        let beyond = page_window(items, PageRequest::new(meta.total_pages + 1, limit));

        prop_assert!(beyond.is_empty());
    }
}

// ============================================================================
// METADATA PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(pagination_config())]

    /// `total_pages` is the smallest page count that covers the total.
    #[test]
    fn prop_total_pages_is_a_minimal_cover(
        total in 0..5000_usize,
        request in request_strategy(),
    ) {
        let meta = PageMeta::compute(request, total);
        let pages = meta.total_pages as usize;
        let limit = request.limit_usize();

        if total == 0 {
            prop_assert_eq!(pages, 0);
        } else {
            prop_assert!(pages * limit >= total, "pages must cover the total");
            prop_assert!(
                (pages - 1) * limit < total,
                "one page fewer must not cover the total"
            );
        }
    }

    /// `has_next` holds exactly when items exist past this window, and
    /// `has_previous` exactly when the page is not the first.
    #[test]
    fn prop_navigation_flags_agree_with_the_window(
        total in 0..5000_usize,
        request in request_strategy(),
    ) {
        let meta = PageMeta::compute(request, total);

        let items_through_window =
            (request.offset() + request.limit_usize()).min(total);

        prop_assert_eq!(meta.has_next, items_through_window < total);
        prop_assert_eq!(meta.has_previous, request.offset() > 0);
    }

    /// Metadata echoes the request untouched.
    #[test]
    fn prop_meta_echoes_the_request(
        total in 0..5000_usize,
        request in request_strategy(),
    ) {
        let meta = PageMeta::compute(request, total);

        prop_assert_eq!(meta.page, request.page);
        prop_assert_eq!(meta.limit, request.limit);
        prop_assert_eq!(meta.total, total);
    }
}

// ============================================================================
// REQUEST RESOLUTION PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(pagination_config())]

    /// Absent fields fall back to the defaults, present ones pass through.
    #[test]
    fn prop_resolve_fills_only_absent_fields(
        page in proptest::option::of(1..=1000_u32),
        limit in proptest::option::of(1..=PageRequest::MAX_LIMIT),
    ) {
        let request = PageRequest::resolve(page, limit);

        prop_assert_eq!(request.page, page.unwrap_or(PageRequest::DEFAULT_PAGE));
        prop_assert_eq!(request.limit, limit.unwrap_or(PageRequest::DEFAULT_LIMIT));
    }

    /// The offset is always `(page - 1) * limit`.
    #[test]
    fn prop_offset_is_page_minus_one_times_limit(request in request_strategy()) {
        let expected = (request.page as usize - 1) * request.limit as usize;
        prop_assert_eq!(request.offset(), expected);
    }
}
