//! # Catalog Files
//!
//! Reads and writes the product catalog as a JSON array of products, the
//! same shape the storefront's static data uses.
//!
//! Loading is strict: unlike hydration, a catalog with a bad product is an
//! error, because it is authored data rather than user state.

use std::fs;
use std::path::Path;

use boutique_core::validation::validate_product;
use boutique_core::Product;
use tracing::info;

use crate::error::StoreResult;

/// Loads and validates a catalog file.
///
/// ## Errors
/// - `Io` if the file cannot be read
/// - `Serialization` if it is not a JSON array of products
/// - `Core(Validation)` for the first product that fails validation
pub fn load_catalog(path: impl AsRef<Path>) -> StoreResult<Vec<Product>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let products = parse_catalog(&contents)?;

    info!(?path, count = products.len(), "Catalog loaded");
    Ok(products)
}

/// Parses and validates catalog JSON.
pub fn parse_catalog(json: &str) -> StoreResult<Vec<Product>> {
    let products: Vec<Product> = serde_json::from_str(json)?;
    for product in &products {
        validate_product(product)?;
    }
    Ok(products)
}

/// Writes a catalog file, creating parent directories as needed.
pub fn save_catalog(path: impl AsRef<Path>, products: &[Product]) -> StoreResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, serde_json::to_string_pretty(products)?)?;
    info!(?path, count = products.len(), "Catalog saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use boutique_core::Money;
    use tempfile::TempDir;

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog/products.json");
        let products = vec![
            Product::new("1", "Midi Skirt", Money::from_cents(5900)).with_category("Bottoms"),
            Product::new("2", "Ankle Boots", Money::from_cents(12900)).with_category("Shoes"),
        ];

        save_catalog(&path, &products).unwrap();
        assert_eq!(load_catalog(&path).unwrap(), products);
    }

    #[test]
    fn test_invalid_product_rejects_catalog() {
        let json = r#"[{ "id": "", "name": "Nameless", "price": 10, "inStock": true }]"#;
        assert!(matches!(parse_catalog(json), Err(StoreError::Core(_))));

        assert!(matches!(
            parse_catalog(r#"{ "products": [] }"#),
            Err(StoreError::Serialization(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            load_catalog(dir.path().join("absent.json")),
            Err(StoreError::Io(_))
        ));
    }
}
