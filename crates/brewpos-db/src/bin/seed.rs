//! # Seed Data Generator
//!
//! Populates the database with a café catalog for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p brewpos-db --bin seed
//!
//! # Specify database path
//! cargo run -p brewpos-db --bin seed -- --db ./data/brewpos.db
//! ```
//!
//! ## Generated Catalog
//! A fixed café menu across categories:
//! - Coffee (espresso drinks)
//! - Tea
//! - Pastries
//! - Sandwiches
//! - Cold Drinks
//!
//! Each product has a fixed price in cents and an opening stock level,
//! so seeded databases are identical run to run.

use chrono::Utc;
use std::env;
use uuid::Uuid;

use brewpos_core::{Category, Product};
use brewpos_db::{Database, DbConfig};

/// Café menu: (category, [(product, price_cents, stock)]).
const MENU: &[(&str, &[(&str, i64, i64)])] = &[
    (
        "Coffee",
        &[
            ("Espresso", 1500, 50),
            ("Double Espresso", 1900, 50),
            ("Americano", 1800, 50),
            ("Cappuccino", 2300, 50),
            ("Latte", 2500, 50),
            ("Flat White", 2400, 50),
            ("Mocha", 2700, 40),
            ("Cortado", 2100, 40),
        ],
    ),
    (
        "Tea",
        &[
            ("English Breakfast", 1600, 40),
            ("Earl Grey", 1600, 40),
            ("Green Tea", 1600, 40),
            ("Chamomile", 1500, 30),
            ("Chai Latte", 2400, 30),
        ],
    ),
    (
        "Pastries",
        &[
            ("Croissant", 1400, 24),
            ("Pain au Chocolat", 1700, 24),
            ("Blueberry Muffin", 1500, 18),
            ("Cinnamon Roll", 1800, 18),
            ("Scone", 1300, 18),
            ("Brownie", 1600, 20),
        ],
    ),
    (
        "Sandwiches",
        &[
            ("Ham & Cheese", 3900, 15),
            ("Turkey Club", 4500, 15),
            ("Caprese", 4200, 12),
            ("Grilled Veggie", 4000, 12),
        ],
    ),
    (
        "Cold Drinks",
        &[
            ("Iced Latte", 2600, 40),
            ("Cold Brew", 2400, 40),
            ("Fresh Orange Juice", 2800, 20),
            ("Sparkling Water", 1200, 48),
            ("Lemonade", 1800, 30),
        ],
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./brewpos_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("BrewPOS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./brewpos_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 BrewPOS Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing products
    let existing = db.catalog().count_products().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding café catalog...");

    let now = Utc::now();
    let mut product_count = 0;

    for (category_name, items) in MENU {
        let category = Category {
            id: Uuid::new_v4().to_string(),
            name: category_name.to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        db.catalog().insert_category(&category).await?;

        for (name, price_cents, stock) in *items {
            let product = Product {
                id: Uuid::new_v4().to_string(),
                name: name.to_string(),
                category_id: category.id.clone(),
                price_cents: *price_cents,
                stock: *stock,
                is_active: true,
                created_at: now,
                updated_at: now,
            };
            db.catalog().insert_product(&product).await?;
            product_count += 1;
        }

        println!("  ✓ {} ({} products)", category_name, items.len());
    }

    println!();
    println!(
        "✓ Seeded {} categories, {} products",
        MENU.len(),
        product_count
    );

    db.close().await;

    Ok(())
}
