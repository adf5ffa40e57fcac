//! Category analytics example for restodb-rs
//!
//! Prints the numbers behind the analytics charts for one category.
//!
//! ```text
//! cargo run --example category_report -- data/restaurants.csv "Pizza restaurant" 15
//! ```

use restodb_rs::prelude::*;

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let source = args.next().unwrap_or_else(|| "data/restaurants.csv".to_string());
    let db = RestaurantDb::load(&source)?;

    let category = match args.next() {
        Some(c) => c,
        None => match db.categories().first() {
            Some(c) => c.to_string(),
            None => {
                println!("Dataset is empty");
                return Ok(());
            }
        },
    };
    let top_n = args.next().and_then(|n| n.parse().ok()).unwrap_or(10);

    let report = db.category_report(&category, top_n)?;
    println!("=== {} ({} restaurants) ===", report.category, report.record_count);
    if let Some(mean) = report.mean_rating {
        println!("Mean rating: {mean:.2}");
    }
    let (w, h) = report.figure_size();
    println!("Suggested figure size: {w} x {h}\n");

    println!("Top titles:");
    for t in &report.top_titles {
        println!("  {} {:>5}  {}", t.color.to_hex(), t.count, t.title);
    }

    println!("\nRating shares:");
    for rc in &report.rating_counts {
        println!("  {:>4}  {:>5.1}%", rc.rating, rc.percent);
    }

    Ok(())
}
