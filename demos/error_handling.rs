//! Error handling example for restodb-rs
//!
//! This example demonstrates the fatal and recoverable failure paths.

use restodb_rs::prelude::*;

fn main() -> Result<()> {
    println!("=== restodb Error Handling Example ===\n");

    // Example 1: A missing dataset aborts the load
    println!("--- Example 1: Loading a missing file ---");
    match RestaurantDb::load("does/not/exist.csv") {
        Ok(db) => println!("  Unexpectedly loaded {} rows", db.len()),
        Err(e) => println!("  ✗ {e}"),
    }
    println!();

    // Example 2: Required columns are checked up front
    println!("--- Example 2: Missing columns ---");
    let csv = "Title,Category,Latitude\nJoe's,Pizza,40.7\n";
    if let Err(e) = RestaurantDb::load_from_reader(csv.as_bytes()) {
        println!("  ✗ {e}");
    }
    println!();

    // Example 3: Bad cells drop rows instead of failing
    println!("--- Example 3: Bad cells ---");
    let csv = "\
Title,Category,Rating,Latitude,Longitude,Phone,Address
Joe's,Pizza,4.5,40.73,-73.98,,
No Rating,Pizza,n/a,40.73,-73.98,,
No Coords,Pizza,4.0,,,,
";
    let db = RestaurantDb::load_from_reader(csv.as_bytes())?;
    let stats = db.load_stats();
    println!(
        "  kept {}, dropped {} (rating) + {} (coordinates)",
        stats.kept, stats.dropped_missing_rating, stats.dropped_missing_coordinates
    );
    println!();

    // Example 4: Searches never fail for lack of matches
    println!("--- Example 4: No matches ---");
    let hits = db.find_matches("Zzzqx", &SearchOptions::default())?;
    println!("  {} matches", hits.matches.len());
    println!();

    // Example 5: A failed geocode degrades to "location unknown"
    println!("--- Example 5: Geocoder unavailable ---");
    let geocoder = StaticGeocoder::unavailable();
    let ctx = RenderContext {
        geocoder: Some(&geocoder),
        ..RenderContext::default()
    };
    let state = ViewState::Search {
        query: "Joes".into(),
        pick: None,
    };
    if let View::Search(view) = render(&db, &state, &ctx)? {
        if let restodb_rs::view::SearchOutcome::Matches { picked, location, .. } = view.outcome {
            println!("  {picked}: {}", location.label());
        }
    }

    // Example 6: Invalid arguments are rejected
    println!("\n--- Example 6: Invalid arguments ---");
    if let Err(e) = db.category_report("Pizza", 0) {
        println!("  ✗ {e}");
    }

    Ok(())
}
