//! # Catalog Filters
//!
//! The user-chosen constraints applied to the catalog, and the partial patch
//! used to change them.
//!
//! ## Filter Combination
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  A product is visible iff EVERY active dimension matches:              │
//! │                                                                         │
//! │    price     min <= price <= max            (inclusive)                 │
//! │      AND                                                                │
//! │    sizes     empty OR offers any requested size                         │
//! │      AND                                                                │
//! │    colors    empty OR offers any requested color                        │
//! │      AND                                                                │
//! │    category  "All" OR equals product.category                           │
//! │                                                                         │
//! │  brands: stored and round-tripped but never filters (catalog has no    │
//! │  brand field)                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;
use crate::{ALL_CATEGORIES, DEFAULT_MAX_PRICE};

// =============================================================================
// Sort Order
// =============================================================================

/// Catalog sort order, named on the wire exactly as the filter UI names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum SortBy {
    /// Catalog order, untouched.
    #[default]
    Featured,
    /// Ascending price.
    PriceLow,
    /// Descending price.
    PriceHigh,
    /// Descending id, used as a recency proxy.
    ///
    /// Only meaningful when ids are assigned in creation order.
    Newest,
    /// Descending rating.
    Rating,
}

impl SortBy {
    /// All sort orders in the order the UI lists them.
    pub const ALL: [SortBy; 5] = [
        SortBy::Featured,
        SortBy::PriceLow,
        SortBy::PriceHigh,
        SortBy::Newest,
        SortBy::Rating,
    ];

    /// Wire name, e.g. `"price-low"`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SortBy::Featured => "featured",
            SortBy::PriceLow => "price-low",
            SortBy::PriceHigh => "price-high",
            SortBy::Newest => "newest",
            SortBy::Rating => "rating",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = CoreError;

    /// Parses a wire name.
    ///
    /// ## Example
    /// ```rust
    /// use boutique_core::SortBy;
    ///
    /// assert_eq!("price-high".parse::<SortBy>().unwrap(), SortBy::PriceHigh);
    /// assert!("popular".parse::<SortBy>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortBy::ALL
            .into_iter()
            .find(|sort| sort.as_str() == s.trim())
            .ok_or_else(|| CoreError::UnknownSortOrder(s.to_string()))
    }
}

// =============================================================================
// Price Range
// =============================================================================

/// Inclusive price bounds. `min <= max` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceRange {
    #[ts(as = "f64")]
    pub min: Money,
    #[ts(as = "f64")]
    pub max: Money,
}

impl PriceRange {
    /// Creates a range, rejecting negative or inverted bounds.
    pub fn new(min: Money, max: Money) -> CoreResult<Self> {
        if min.is_negative() || min > max {
            return Err(CoreError::InvalidPriceRange { min, max });
        }

        Ok(PriceRange { min, max })
    }

    /// Creates a range from bounds in either order.
    pub fn normalized(a: Money, b: Money) -> Self {
        PriceRange {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// True if `price` lies within the bounds (inclusive on both ends).
    pub fn contains(&self, price: Money) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceRange {
    /// $0 to $1,000.
    fn default() -> Self {
        PriceRange {
            min: Money::zero(),
            max: DEFAULT_MAX_PRICE,
        }
    }
}

// =============================================================================
// Filter Spec
// =============================================================================

/// The full set of active catalog filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FilterSpec {
    pub price_range: PriceRange,

    /// Requested sizes, OR-matched. Empty means "any".
    pub sizes: Vec<String>,

    /// Requested colors, OR-matched. Empty means "any".
    pub colors: Vec<String>,

    /// Requested brands. Accepted for UI compatibility, never applied.
    pub brands: Vec<String>,

    /// Category name, or "All".
    pub category: String,

    pub sort_by: SortBy,
}

impl Default for FilterSpec {
    fn default() -> Self {
        FilterSpec {
            price_range: PriceRange::default(),
            sizes: Vec::new(),
            colors: Vec::new(),
            brands: Vec::new(),
            category: ALL_CATEGORIES.to_string(),
            sort_by: SortBy::Featured,
        }
    }
}

impl FilterSpec {
    /// True if `product` passes every active filter dimension.
    pub fn matches(&self, product: &Product) -> bool {
        self.price_range.contains(product.price)
            && any_requested(&self.sizes, |s| product.offers_size(s))
            && any_requested(&self.colors, |c| product.offers_color(c))
            && self.matches_category(&product.category)
    }

    fn matches_category(&self, category: &str) -> bool {
        self.category.eq_ignore_ascii_case(ALL_CATEGORIES) || self.category == category
    }

    /// Shallow-merges `patch`: fields the patch leaves unset keep their
    /// current value. An inverted price range is normalized.
    pub fn apply(&self, patch: FilterPatch) -> FilterSpec {
        FilterSpec {
            price_range: patch
                .price_range
                .map(|r| PriceRange::normalized(r.min, r.max))
                .unwrap_or(self.price_range),
            sizes: patch.sizes.unwrap_or_else(|| self.sizes.clone()),
            colors: patch.colors.unwrap_or_else(|| self.colors.clone()),
            brands: patch.brands.unwrap_or_else(|| self.brands.clone()),
            category: patch.category.unwrap_or_else(|| self.category.clone()),
            sort_by: patch.sort_by.unwrap_or(self.sort_by),
        }
    }
}

/// Empty request list matches everything; otherwise any requested value must hit.
fn any_requested(requested: &[String], offers: impl Fn(&str) -> bool) -> bool {
    requested.is_empty() || requested.iter().any(|r| offers(r))
}

// =============================================================================
// Filter Patch
// =============================================================================

/// A partial [`FilterSpec`] carried by `SetFilters`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FilterPatch {
    pub price_range: Option<PriceRange>,
    pub sizes: Option<Vec<String>>,
    pub colors: Option<Vec<String>>,
    pub brands: Option<Vec<String>>,
    pub category: Option<String>,
    pub sort_by: Option<SortBy>,
}

impl FilterPatch {
    pub fn sort_by(sort_by: SortBy) -> Self {
        FilterPatch {
            sort_by: Some(sort_by),
            ..Default::default()
        }
    }

    pub fn category(category: impl Into<String>) -> Self {
        FilterPatch {
            category: Some(category.into()),
            ..Default::default()
        }
    }

    /// True if the patch sets nothing.
    pub fn is_empty(&self) -> bool {
        *self == FilterPatch::default()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
