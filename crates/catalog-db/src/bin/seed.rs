//! # Seed Data Generator
//!
//! Creates the `producto` table and fills it with sample phones.
//!
//! ## Usage
//! ```bash
//! # Seed the database described by CATALOG_DB_* (MySQL, falling back to SQLite)
//! cargo run -p catalog-db --bin seed
//!
//! # Seed a local SQLite file
//! cargo run -p catalog-db --bin seed -- --db ./catalog_dev.db
//!
//! # Load products from a JSON array instead of the built-in list
//! cargo run -p catalog-db --bin seed -- --file phones.json
//! ```
//!
//! ## Fixture Format
//! ```json
//! [
//!   { "model": "X1", "price": "599.99", "storage": "128GB", "color": "black", "stock": 10 },
//!   { "model": "X1 Mini", "stock": 0 }
//! ]
//! ```

use std::env;
use std::fs;

use anyhow::{bail, Context};
use catalog_core::{Money, Product};
use catalog_db::{Database, DbConfig};
use tracing_subscriber::EnvFilter;

/// Built-in sample phones: (model, price in cents, storage, color, stock)
const SAMPLE_PHONES: &[(&str, Option<i64>, &str, &str, i32)] = &[
    ("X1", Some(59999), "128GB", "black", 10),
    ("X1", Some(64999), "256GB", "silver", 6),
    ("X1 Pro", Some(89999), "256GB", "graphite", 4),
    ("X1 Pro", Some(99999), "512GB", "blue", 2),
    ("Nova 8", Some(32950), "128GB", "green", 15),
    ("Nova 8 Lite", Some(19900), "64GB", "white", 25),
    ("Pixelate 7", Some(54900), "128GB", "obsidian", 8),
    ("Pixelate 7a", Some(39900), "128GB", "coral", 12),
    ("Galaxia A35", Some(27999), "128GB", "navy", 20),
    ("Galaxia S24", None, "256GB", "violet", 0),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,catalog=info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut db_path: Option<String> = None;
    let mut fixture: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--file" | "-f" => {
                if i + 1 < args.len() {
                    fixture = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Phone Catalog Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>     SQLite file to seed (default: CATALOG_DB_* settings)");
                println!("  -f, --file <PATH>   JSON array of products to insert");
                println!("  -h, --help          Show this help message");
                return Ok(());
            }
            other => bail!("unknown argument: {other}"),
        }
        i += 1;
    }

    let config = match &db_path {
        Some(path) => DbConfig::sqlite(path),
        None => DbConfig::from_env()?.ensure_schema(true),
    };

    let products = match &fixture {
        Some(path) => load_fixture(path)?,
        None => sample_products(),
    };

    println!("Phone Catalog Seed Data Generator");
    println!("=================================");
    println!("Drivers:  {:?}", config.drivers);
    println!("Database: {}", config.database);
    println!("Products: {}", products.len());
    println!();

    let db = Database::new(config).await?;
    let repo = db.products();

    let existing = repo.count().await?;
    if existing > 0 {
        println!("Catalog already has {} products, skipping seed.", existing);
        return Ok(());
    }

    let mut inserted = 0;
    for mut product in products {
        match repo.create(&mut product).await {
            Ok(id) => {
                println!("  #{:<4} {}", id, product.model);
                inserted += 1;
            }
            Err(e) => eprintln!("Failed to insert {}: {}", product.model, e),
        }
    }

    println!();
    println!("Inserted {} products, catalog now has {}", inserted, repo.count().await?);

    Ok(())
}

/// Reads a JSON array of products from disk.
fn load_fixture(path: &str) -> anyhow::Result<Vec<Product>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let products: Vec<Product> =
        serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
    Ok(products)
}

/// Turns the built-in table into unsaved products.
fn sample_products() -> Vec<Product> {
    SAMPLE_PHONES
        .iter()
        .map(|&(model, cents, storage, color, stock)| {
            Product::new(model, cents.map(Money::from_cents), Some(storage), Some(color), stock)
        })
        .collect()
}
