//! # Catalog Query Engine
//!
//! Derives the visible product list from the full catalog and a
//! [`FilterSpec`].
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   products ──► filter ──► stable sort ──► paginate ──► QueryResult     │
//! │   (&[Product])  (AND/OR)   (ties keep        (1-based,    items         │
//! │                             catalog order)    no clamp)   total_matched │
//! │                                                           total_pages   │
//! │                                                                         │
//! │   Pure: inputs are borrowed, never mutated. Results are fresh clones,   │
//! │   so any number of callers can query with different specs at once.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Pagination Contract
//! Pages are 1-based. Page 0, a page past the end, or a page size of 0
//! yield an empty slice. The engine never clamps and never fails: clamping
//! to a valid page is the caller's job.
//!
//! ## Usage
//! ```rust
//! use boutique_core::{query, FilterSpec, Money, Product};
//!
//! let catalog = vec![
//!     Product::new("1", "Wrap Dress", Money::from_cents(8999)),
//!     Product::new("2", "Denim Jacket", Money::from_cents(7900)),
//! ];
//! let result = query(&catalog, &FilterSpec::default(), 1, 12);
//! assert_eq!(result.total_matched, 2);
//! assert_eq!(result.total_pages, 1);
//! ```

use serde::Serialize;
use std::cmp::Ordering;
use ts_rs::TS;

use crate::filters::{FilterSpec, SortBy};
use crate::types::Product;

/// One page of catalog results.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QueryResult {
    /// Products on the requested page, in display order.
    pub items: Vec<Product>,

    /// Products matching the filters across all pages.
    pub total_matched: usize,

    /// `ceil(total_matched / page_size)`.
    pub total_pages: usize,

    /// The page that was requested (echoed back, not clamped).
    pub page: usize,
}

impl QueryResult {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous_page(&self) -> bool {
        self.page > 1
    }
}

/// Filters, sorts and paginates `products`.
pub fn query(products: &[Product], spec: &FilterSpec, page: usize, page_size: usize) -> QueryResult {
    let matched = filter_and_sort(products, spec);
    let total_matched = matched.len();

    let items = page_bounds(total_matched, page, page_size)
        .map(|(start, end)| matched[start..end].iter().map(|p| (*p).clone()).collect())
        .unwrap_or_default();

    QueryResult {
        items,
        total_matched,
        total_pages: total_pages(total_matched, page_size),
        page,
    }
}

/// The filter and sort stages without pagination, borrowing from `products`.
pub fn filter_and_sort<'a>(products: &'a [Product], spec: &FilterSpec) -> Vec<&'a Product> {
    let mut matched: Vec<&Product> = products.iter().filter(|p| spec.matches(p)).collect();

    // `sort_by` is stable: equal keys keep catalog order.
    match spec.sort_by {
        SortBy::Featured => {}
        SortBy::PriceLow => matched.sort_by(|a, b| a.price.cmp(&b.price)),
        SortBy::PriceHigh => matched.sort_by(|a, b| b.price.cmp(&a.price)),
        SortBy::Newest => matched.sort_by(|a, b| b.id.cmp(&a.id)),
        SortBy::Rating => matched.sort_by(|a, b| by_rating_desc(a, b)),
    }

    matched
}

fn by_rating_desc(a: &Product, b: &Product) -> Ordering {
    b.rating.total_cmp(&a.rating)
}

/// `ceil(matched / page_size)`; zero when `page_size` is zero.
pub fn total_pages(matched: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        matched.div_ceil(page_size)
    }
}

/// Slice bounds for a 1-based `page`, or `None` if the page is empty.
fn page_bounds(len: usize, page: usize, page_size: usize) -> Option<(usize, usize)> {
    if page == 0 || page_size == 0 {
        return None;
    }

    let start = (page - 1).checked_mul(page_size)?;
    if start >= len {
        return None;
    }

    Some((start, start.saturating_add(page_size).min(len)))
}

// =============================================================================
// Unit Tests
// =============================================================================
