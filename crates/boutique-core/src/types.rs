//! # Domain Types
//!
//! Core domain types used throughout Boutique.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────────┐   ┌─────────────────┐  │
//! │  │    Product      │   │      CartLine        │   │  CartLineKey    │  │
//! │  │  ─────────────  │   │  ──────────────────  │   │  ─────────────  │  │
//! │  │  id             │◄──│  product (flattened) │──►│  product_id     │  │
//! │  │  name, price    │   │  quantity ≥ 1        │   │  size           │  │
//! │  │  sizes, colors  │   │  selected_size       │   │  color          │  │
//! │  │  rating         │   │  selected_color      │   │                 │  │
//! │  └─────────────────┘   └──────────────────────┘   └─────────────────┘  │
//! │                                                                         │
//! │  Wishlist entries are plain Products, unique by id.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Composite-Key Identity
//! A cart line is identified by (product id, size, color), not by product id
//! alone: the same dress in M/Black and L/Black are two lines. The key is a
//! real struct compared field by field, so sizes or colors containing `-`
//! (e.g. "Navy-Blue") can never collide.
//!
//! ## Wire Shape
//! Field names are camelCase and a `CartLine` serializes as ONE flat object
//! (product fields + `quantity`, `selectedSize`, `selectedColor`), which is
//! exactly what the durable cart entry stores.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
///
/// Immutable once loaded: the store replaces the catalog wholesale and never
/// edits a product in place.
///
/// Descriptive fields (`image`, `category`, `sizes`, `colors`, `description`,
/// `rating`, `reviews`) default when absent so older persisted entries still
/// parse. `id`, `name`, `price` and `inStock` are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique product identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Current selling price.
    #[ts(as = "f64")]
    pub price: Money,

    /// Price before markdown, shown struck through.
    #[serde(default)]
    #[ts(as = "Option<f64>")]
    pub original_price: Option<Money>,

    /// Image reference (URL or asset path).
    #[serde(default)]
    pub image: String,

    /// Category name, e.g. "Dresses".
    #[serde(default)]
    pub category: String,

    /// Offered sizes in display order.
    #[serde(default)]
    pub sizes: Vec<String>,

    /// Offered colors in display order.
    #[serde(default)]
    pub colors: Vec<String>,

    #[serde(default)]
    pub description: String,

    pub in_stock: bool,

    /// Average rating, 0 to 5.
    #[serde(default)]
    pub rating: f64,

    /// Number of reviews behind `rating`.
    #[serde(default)]
    pub reviews: u32,
}

impl Product {
    /// Creates an in-stock product with the required fields set and every
    /// descriptive field empty.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Money) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            price,
            original_price: None,
            image: String::new(),
            category: String::new(),
            sizes: Vec::new(),
            colors: Vec::new(),
            description: String::new(),
            in_stock: true,
            rating: 0.0,
            reviews: 0,
        }
    }

    /// Sets the offered sizes.
    pub fn with_sizes<I, S>(mut self, sizes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sizes = sizes.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the offered colors.
    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the rating and review count.
    pub fn with_rating(mut self, rating: f64, reviews: u32) -> Self {
        self.rating = rating;
        self.reviews = reviews;
        self
    }

    /// Sets the pre-markdown price.
    pub fn with_original_price(mut self, original: Money) -> Self {
        self.original_price = Some(original);
        self
    }

    /// Returns true if the product is offered in `size`.
    pub fn offers_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    /// Returns true if the product is offered in `color`.
    pub fn offers_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }

    /// Whole-percent markdown against `original_price` (0 when not on sale).
    ///
    /// ## Example
    /// ```rust
    /// use boutique_core::{Money, Product};
    ///
    /// let dress = Product::new("1", "Wrap Dress", Money::from_cents(8999))
    ///     .with_original_price(Money::from_cents(12999));
    /// assert_eq!(dress.discount_percentage(), 31);
    /// ```
    pub fn discount_percentage(&self) -> u32 {
        self.original_price
            .map(|original| self.price.percent_off(original))
            .unwrap_or(0)
    }

    /// Returns true when the product is marked down.
    pub fn is_on_sale(&self) -> bool {
        self.discount_percentage() > 0
    }

    /// The "quick add" selection: first listed size and first listed color.
    ///
    /// Returns `None` if the product lists no sizes or no colors.
    pub fn default_selection(&self) -> Option<(&str, &str)> {
        let size = self.sizes.first()?;
        let color = self.colors.first()?;
        Some((size.as_str(), color.as_str()))
    }
}

// =============================================================================
// Cart Line Key
// =============================================================================

/// Composite identity of a cart line: (product id, size, color).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLineKey {
    pub product_id: String,
    pub size: String,
    pub color: String,
}

impl CartLineKey {
    pub fn new(
        product_id: impl Into<String>,
        size: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        CartLineKey {
            product_id: product_id.into(),
            size: size.into(),
            color: color.into(),
        }
    }
}

impl std::fmt::Display for CartLineKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} / {})", self.product_id, self.size, self.color)
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// A line in the shopping cart.
///
/// ## Snapshot Pattern
/// The line carries a full copy of the product as it was when added, so the
/// cart keeps rendering (and pricing) consistently even if the catalog is
/// replaced afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    /// Product fields, flattened into the line object.
    #[serde(flatten)]
    pub product: Product,

    /// Units of this selection. Always ≥ 1 inside a cart.
    pub quantity: i64,

    pub selected_size: String,

    pub selected_color: String,
}

impl CartLine {
    /// Creates a line for `product` in the given selection.
    pub fn new(
        product: Product,
        size: impl Into<String>,
        color: impl Into<String>,
        quantity: i64,
    ) -> Self {
        CartLine {
            product,
            quantity,
            selected_size: size.into(),
            selected_color: color.into(),
        }
    }

    /// Returns this line's composite key.
    pub fn key(&self) -> CartLineKey {
        CartLineKey::new(
            self.product.id.clone(),
            self.selected_size.clone(),
            self.selected_color.clone(),
        )
    }

    /// Compares against a key without allocating.
    pub fn matches(&self, key: &CartLineKey) -> bool {
        self.matches_parts(&key.product_id, &key.size, &key.color)
    }

    pub(crate) fn matches_parts(&self, product_id: &str, size: &str, color: &str) -> bool {
        self.product.id == product_id && self.selected_size == size && self.selected_color == color
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn dress() -> Product {
        Product::new("dress-1", "Silk Slip Dress", Money::from_cents(8999))
            .with_sizes(["XS", "S", "M"])
            .with_colors(["Black", "Navy-Blue"])
            .with_category("Dresses")
    }

    #[test]
    fn test_default_selection_uses_first_options() {
        assert_eq!(dress().default_selection(), Some(("XS", "Black")));

        let no_sizes = Product::new("x", "Scarf", Money::from_cents(1500)).with_colors(["Red"]);
        assert_eq!(no_sizes.default_selection(), None);
    }

    #[test]
    fn test_cart_line_key_is_structured() {
        // A delimiter inside a color must not confuse identity.
        let line = CartLine::new(dress(), "M", "Navy-Blue", 1);
        assert!(line.matches(&CartLineKey::new("dress-1", "M", "Navy-Blue")));
        assert!(!line.matches(&CartLineKey::new("dress-1", "M", "Navy")));
        assert_eq!(line.key(), CartLineKey::new("dress-1", "M", "Navy-Blue"));
    }

    #[test]
    fn test_line_total() {
        let line = CartLine::new(dress(), "M", "Black", 3);
        assert_eq!(line.line_total().cents(), 26997);
    }

    #[test]
    fn test_cart_line_serializes_flat() {
        let line = CartLine::new(dress(), "M", "Black", 2);
        let value = serde_json::to_value(&line).unwrap();

        assert_eq!(value["id"], "dress-1");
        assert_eq!(value["price"], 89.99);
        assert_eq!(value["quantity"], 2);
        assert_eq!(value["selectedSize"], "M");
        assert_eq!(value["selectedColor"], "Black");
        assert!(value.get("product").is_none());

        let back: CartLine = serde_json::from_value(value).unwrap();
        assert_eq!(back, line);
    }

    #[test]
    fn test_product_parses_storefront_json() {
        let json = r#"{
            "id": "1",
            "name": "Elegant Evening Dress",
            "price": 129.99,
            "originalPrice": 179.99,
            "image": "/img/1.jpg",
            "category": "Dresses",
            "sizes": ["S", "M", "L"],
            "colors": ["Black", "Burgundy"],
            "description": "Floor length",
            "inStock": true,
            "rating": 4.8,
            "reviews": 124
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price.cents(), 12999);
        assert_eq!(product.original_price, Some(Money::from_cents(17999)));
        assert_eq!(product.discount_percentage(), 28);
        assert!(product.is_on_sale());
        assert!(product.offers_size("M"));
        assert!(!product.offers_color("Pink"));
    }

    #[test]
    fn test_product_missing_required_field_fails() {
        let json = r#"{ "id": "1", "price": 10, "inStock": true }"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }
}
