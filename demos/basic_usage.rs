//! Basic usage example for restodb-rs
//!
//! This example demonstrates how to:
//! - Load and normalize a restaurant dataset
//! - Inspect load statistics and the category palette
//! - Page through the map view
//! - Fuzzy search titles
//!
//! Run with a dataset path (or URL) as the first argument:
//!
//! ```text
//! cargo run --example basic_usage -- data/restaurants.csv
//! ```

use restodb_rs::prelude::*;

fn main() -> Result<()> {
    let source = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data/restaurants.csv".to_string());

    println!("=== restodb Basic Usage Example ===\n");

    println!("Loading {source}...");
    let db = RestaurantDb::load(&source)?;
    let load = db.load_stats();
    println!(
        "✓ {} restaurants kept of {} rows ({} dropped)\n",
        load.kept,
        load.rows_read,
        load.dropped()
    );

    // Example 1: Categories and their colors
    println!("--- Example 1: First categories of the palette ---");
    for (category, color) in db.palette().entries().iter().take(5) {
        println!("  {} {category}", color.to_hex());
    }
    println!("  ... {} categories in total\n", db.palette().len());

    // Example 2: Pagination
    println!("--- Example 2: Map pages ---");
    let pages = Paginator::new(db.len(), 1000)?;
    println!("  {} pages of up to 1000 markers", pages.page_count());
    if let View::Map(map) = render(&db, &ViewState::Map(MapMode::Page(1)), &RenderContext::default())? {
        for marker in map.markers.iter().take(3) {
            println!("  {}", marker.tooltip.replace("<br>", " | "));
        }
    }
    println!();

    // Example 3: Fuzzy search
    println!("--- Example 3: Fuzzy search ---");
    let hits = db.find_matches("McDnalds", &SearchOptions::default())?;
    if hits.is_empty() {
        println!("  No restaurants found");
    }
    for m in &hits.matches {
        println!("  {} (score {:.2}, {} locations)", m.title, m.score, m.records.len());
    }

    Ok(())
}
