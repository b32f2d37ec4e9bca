//! # Seed Data Generator
//!
//! Populates the database with sample discount tiers for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default dev database
//! cargo run -p ladder-db --bin seed
//!
//! # Specify database path and shop
//! cargo run -p ladder-db --bin seed -- --db ./data/ladder.db --shop demo.myshopify.com
//! ```
//!
//! ## Generated Tiers
//! A representative spread for one shop:
//! - An open percentage ladder (10% at 3+, 20% at 10+)
//! - A capped fixed-amount tier (only quantities 2-5)
//! - A product-filtered tier
//! - An inactive tier (should never influence resolution)
//!
//! Finishes by resolving a sample cart so the output can be eyeballed.

use std::env;

use ladder_core::{DiscountTier, DiscountType, LineItem};
use ladder_db::{resolve_cart_discount, Database, DbConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./ladder_dev.db");
    let mut shop = String::from("demo.myshopify.com");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--shop" | "-s" => {
                if i + 1 < args.len() {
                    shop = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Ladder Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./ladder_dev.db)");
                println!("  -s, --shop <SHOP>  Shop domain to seed (default: demo.myshopify.com)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Ladder Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!("Shop:     {}", shop);
    println!();

    // Connect to database
    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing tiers
    let existing = db.tiers().count(&shop).await?;
    if existing > 0 {
        println!("⚠ Shop already has {} tiers", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Creating tiers...");

    for tier in sample_tiers(&shop) {
        db.tiers().insert(&tier).await?;
        println!(
            "  + {} ({} {}, min {}{})",
            tier.title,
            tier.discount_type.as_str(),
            tier.discount_value,
            tier.min_quantity,
            tier
                .max_quantity
                .map(|m| format!(", max {m}"))
                .unwrap_or_default()
        );
    }

    // Resolve a sample cart against what we just wrote
    println!();
    println!("Sample resolution (5 × $10.00 of Product/1001):");
    let cart = vec![LineItem::new("gid://shopify/Product/1001", 5, 10.0)];
    let outcome = resolve_cart_discount(&db, &shop, &cart).await?;

    println!("  discount_amount: {:.2}", outcome.discount_amount);
    match outcome.applied {
        Some(applied) => println!("  applied:         {}", applied.title),
        None => println!("  applied:         (none)"),
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// A representative spread of tiers for one shop.
fn sample_tiers(shop: &str) -> Vec<DiscountTier> {
    let with_shop = |mut tier: DiscountTier| {
        tier.shop = shop.to_string();
        tier
    };

    let mut ladder_low = DiscountTier::sample(
        "Buy 3 Get 10% Off",
        DiscountType::Percentage,
        10.0,
        3,
    );
    ladder_low.description = Some("Entry tier of the volume ladder".to_string());

    let ladder_high = DiscountTier::sample(
        "Buy 10 Get 20% Off",
        DiscountType::Percentage,
        20.0,
        10,
    );

    let mut capped = DiscountTier::sample("$5 Off Small Bundles", DiscountType::FixedAmount, 5.0, 2);
    capped.max_quantity = Some(5);

    let mut filtered = DiscountTier::sample(
        "15% Off Featured Product",
        DiscountType::Percentage,
        15.0,
        2,
    );
    filtered.product_ids = Some(vec!["gid://shopify/Product/1001".to_string()]);
    filtered.discount_code = Some("FEATURED15".to_string());

    let mut retired = DiscountTier::sample("Retired Promo", DiscountType::Percentage, 30.0, 1);
    retired.is_active = false;

    vec![
        with_shop(ladder_low),
        with_shop(ladder_high),
        with_shop(capped),
        with_shop(filtered),
        with_shop(retired),
    ]
}
