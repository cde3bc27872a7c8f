//! # Seed Data Generator
//!
//! Writes a sample fashion catalog and, optionally, a starter cart and
//! wishlist into the data directory for development.
//!
//! ## Usage
//! ```bash
//! # Generate 24 products into the configured data directory
//! cargo run -p boutique-store --bin seed
//!
//! # Generate custom amount into a specific directory
//! cargo run -p boutique-store --bin seed -- --count 60 --data-dir ./data
//!
//! # Also persist a starter cart and wishlist
//! cargo run -p boutique-store --bin seed -- --with-cart
//! ```
//!
//! ## Generated Products
//! Products are spread across the storefront categories (Dresses, Tops,
//! Bottoms, Outerwear, Shoes, Accessories). Each product has:
//! - Sequential id: `1`, `2`, ...
//! - Name from the category's sample list
//! - Price: $19.00 - $198.00, every third product on sale
//! - Rating: 3.5 - 5.0 with 4 - 400 reviews
//! - The category's sizes and a rotating pick of colors

use std::env;
use std::path::PathBuf;

use boutique_core::{Action, FilterPatch, Money, Product, SortBy};
use boutique_store::{commands, init_tracing, save_catalog, Session, StoreConfig};

/// Catalog file written inside the data directory.
const CATALOG_FILE: &str = "products.json";

/// Sample names per category.
const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Dresses",
        &[
            "Wrap Midi Dress",
            "Linen Shirt Dress",
            "Slip Dress",
            "Tiered Maxi Dress",
            "Knit Sweater Dress",
        ],
    ),
    (
        "Tops",
        &[
            "Classic White Tee",
            "Silk Camisole",
            "Oversized Oxford Shirt",
            "Ribbed Tank",
            "Cashmere Crewneck",
        ],
    ),
    (
        "Bottoms",
        &[
            "High-Rise Straight Jeans",
            "Pleated Midi Skirt",
            "Wide-Leg Trousers",
            "Cargo Pants",
            "Denim Shorts",
        ],
    ),
    (
        "Outerwear",
        &[
            "Wool Overcoat",
            "Cropped Denim Jacket",
            "Quilted Puffer",
            "Trench Coat",
        ],
    ),
    (
        "Shoes",
        &[
            "Leather Ankle Boots",
            "Canvas Sneakers",
            "Strappy Sandals",
            "Pointed Flats",
        ],
    ),
    (
        "Accessories",
        &[
            "Leather Tote",
            "Silk Scarf",
            "Wool Beanie",
            "Gold Hoop Earrings",
        ],
    ),
];

const CLOTHING_SIZES: &[&str] = &["XS", "S", "M", "L", "XL"];
const SHOE_SIZES: &[&str] = &["6", "7", "8", "9", "10"];
const ONE_SIZE: &[&str] = &["One Size"];

const COLORS: &[&str] = &["Black", "White", "Navy", "Camel", "Olive", "Blush", "Grey"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 24;
    let mut data_dir: Option<PathBuf> = None;
    let mut with_cart = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(24);
                    i += 1;
                }
            }
            "--data-dir" | "-d" => {
                if i + 1 < args.len() {
                    data_dir = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--with-cart" => with_cart = true,
            "--help" | "-h" => {
                println!("Boutique Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>        Number of products to generate (default: 24)");
                println!("  -d, --data-dir <PATH>  Data directory (default: from boutique.toml)");
                println!("      --with-cart        Persist a starter cart and wishlist");
                println!("  -h, --help             Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let mut config = StoreConfig::load_or_default(None);
    if data_dir.is_some() {
        config.storage.data_dir = data_dir;
    }
    let data_dir = config
        .data_dir()
        .ok_or("no data directory configured; pass --data-dir")?;

    println!("🌱 Boutique Seed Data Generator");
    println!("==============================");
    println!("Data dir: {}", data_dir.display());
    println!("Products: {}", count);
    println!();

    // Generate products
    let products = generate_catalog(count);
    let catalog_path = data_dir.join(CATALOG_FILE);
    save_catalog(&catalog_path, &products)?;
    println!("✓ Wrote {} products to {}", products.len(), catalog_path.display());

    let mut session = Session::open(&config)?;
    session.dispatch(Action::SetProducts(products.clone()));

    // Verify the query engine over the fresh catalog
    println!();
    println!("Verifying catalog queries...");
    let first = session.page(1);
    println!(
        "  Page 1: {} of {} products ({} pages)",
        first.items.len(),
        first.total_matched,
        first.total_pages
    );

    session.dispatch(Action::SetFilters(FilterPatch {
        category: Some("Shoes".to_string()),
        sort_by: Some(SortBy::PriceLow),
        ..Default::default()
    }));
    let shoes = session.page(1);
    println!("  Shoes, price-low: {} results", shoes.total_matched);
    if let Some(cheapest) = shoes.items.first() {
        println!("    cheapest: {} ({})", cheapest.name, cheapest.price);
    }

    if with_cart {
        println!();
        println!("Seeding starter cart...");
        for product in products.iter().take(3) {
            if let Err(e) = commands::quick_add(session.store_mut(), product) {
                eprintln!("Failed to add {}: {}", product.id, e);
            }
        }
        for product in products.iter().skip(3).take(2) {
            commands::toggle_wishlist(session.store_mut(), product);
        }

        let view = session.cart_view();
        println!(
            "  Cart: {} lines, subtotal {}, shipping {}, total {}",
            view.totals.line_count, view.totals.subtotal, view.totals.shipping, view.totals.total
        );
        println!("  Wishlist: {} products", session.state().wishlist_count());
    }

    session.flush().await?;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Walks the categories round-robin until `count` products exist.
fn generate_catalog(count: usize) -> Vec<Product> {
    let longest = CATEGORIES
        .iter()
        .map(|(_, names)| names.len())
        .max()
        .unwrap_or(0);

    let mut products = Vec::with_capacity(count);
    let mut round = 0;
    while products.len() < count && longest > 0 {
        for (category, names) in CATEGORIES {
            if products.len() >= count {
                break;
            }
            let name = names[round % names.len()];
            products.push(generate_product(
                category,
                name,
                round,
                names.len(),
                products.len() + 1,
            ));
        }
        round += 1;
    }
    products
}

/// Generates a single product with deterministic, realistic data.
fn generate_product(category: &str, name: &str, round: usize, names: usize, seed: usize) -> Product {
    let sizes = match category {
        "Shoes" => SHOE_SIZES,
        "Accessories" => ONE_SIZE,
        _ => CLOTHING_SIZES,
    };
    let colors: Vec<&str> = (0..3).map(|k| COLORS[(seed + k * 2) % COLORS.len()]).collect();

    // Price: whole dollars $19 - $198
    let dollars = 19 + ((seed * 37) % 180) as i64;
    let price = Money::from_major_minor(dollars, 0);

    // Rating 3.5 - 5.0 in tenths
    let rating = 3.5 + ((seed * 7) % 16) as f64 / 10.0;
    let reviews = 4 + ((seed * 53) % 397) as u32;

    // Repeat rounds get a season suffix so names stay distinct
    let full_name = if round < names {
        name.to_string()
    } else {
        format!("{} (Season {})", name, round / names + 1)
    };

    let mut product = Product::new(seed.to_string(), full_name, price)
        .with_category(category)
        .with_sizes(sizes.iter().copied())
        .with_colors(colors)
        .with_rating(rating, reviews);

    if seed % 3 == 0 {
        product = product.with_original_price(Money::from_major_minor(dollars + dollars / 4, 99));
    }

    product.image = format!("/images/products/{}.jpg", seed);
    product.description = format!("{} from the {} collection.", name, category.to_lowercase());
    product.in_stock = seed % 11 != 0;
    product
}
