//! restodb: command-line interface for restodb-core
//!
//! Loads a restaurant dataset once per invocation and renders one view of it
//! to the terminal.
//!
//! Usage examples
//! --------------
//!
//! - Show overall stats
//!   $ restodb --source data/restaurants.csv stats
//!
//! - Second page of the map, printed as a table
//!   $ restodb map --page 2
//!
//! - Category analytics, top 20 titles
//!   $ restodb analytics pizza --top 20
//!
//! - Fuzzy search and locate the second match
//!   $ restodb search "McDnalds" --pick 2
//!
//! Configuration
//! -------------
//!
//! Built-in defaults, then `--config <file.toml>`, then `RESTODB_*`
//! environment variables, then flags. `--snapshot <path>` caches the parsed
//! dataset in a binary file and reuses it while it is newer than the source.
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::{bail, Context};
use clap::Parser;
use restodb_core::analytics::CategoryReport;
use restodb_core::geocode::ReverseGeocoder;
use restodb_core::loader::snapshot::snapshot_is_fresh;
use restodb_core::view::{self, MapMode, MapView, RenderContext, SearchOutcome, SearchView, View, ViewState};
use restodb_core::{RestaurantDb, Settings};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.debug);

    let mut settings = Settings::load(args.config.as_deref()).context("loading settings")?;
    if let Some(source) = args.source {
        settings.dataset.source = source;
    }
    let snapshot: Option<PathBuf> = args
        .snapshot
        .or_else(|| settings.dataset.snapshot.as_ref().map(PathBuf::from));

    let mut search = settings.search_options();
    let mut geocode = settings.geocoder.enabled;

    let state = match &args.command {
        Commands::Stats | Commands::Categories => None,
        Commands::Map { page, category } => Some(ViewState::Map(match (page, category) {
            (Some(p), _) => MapMode::Page(*p),
            (None, Some(c)) => MapMode::Category(c.clone()),
            (None, None) => MapMode::All,
        })),
        Commands::Analytics { category, top } => Some(ViewState::Analytics {
            category: category.clone(),
            top_n: *top,
        }),
        Commands::Search {
            query,
            pick,
            limit,
            min_similarity,
            fold,
            no_geocode,
        } => {
            if let Some(limit) = limit {
                search.limit = *limit;
            }
            if let Some(min) = min_similarity {
                search.min_similarity = *min;
            }
            search.fold |= *fold;
            geocode &= !*no_geocode;
            let pick = match *pick {
                Some(0) => bail!("--pick is 1-based"),
                Some(p) => Some(p - 1),
                None => None,
            };
            Some(ViewState::Search {
                query: query.clone(),
                pick,
            })
        }
    };

    let db = load_dataset(&settings, snapshot.as_deref())?;

    let Some(state) = state else {
        match &args.command {
            Commands::Categories => print_categories(&db),
            _ => print_stats(&db),
        }
        return Ok(());
    };

    let geocoder = if geocode { build_geocoder(&settings)? } else { None };
    let ctx = RenderContext {
        page_size: settings.dataset.page_size,
        search,
        geocoder: geocoder.as_deref(),
    };

    match view::render(&db, &state, &ctx)? {
        View::Map(map) => print_map(&map),
        View::Analytics(report) => print_report(&report),
        View::Search(found) => print_search(&found),
    }
    Ok(())
}

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .init();
}

/// Loads the dataset, going through the binary snapshot when one is configured.
fn load_dataset(settings: &Settings, snapshot: Option<&Path>) -> anyhow::Result<RestaurantDb> {
    let source = settings.dataset.source.as_str();

    if let Some(snap) = snapshot {
        if snapshot_is_fresh(source, snap) {
            match RestaurantDb::load_snapshot(snap) {
                Ok(db) => return Ok(db),
                Err(e) => tracing::warn!(path = %snap.display(), error = %e, "ignoring unreadable snapshot"),
            }
        }
    }

    let db = RestaurantDb::load_with(source, &settings.load_options())
        .with_context(|| format!("loading dataset from {source}"))?;

    if let Some(snap) = snapshot {
        if let Err(e) = db.save_snapshot(snap) {
            tracing::warn!(path = %snap.display(), error = %e, "could not write snapshot");
        }
    }
    Ok(db)
}

#[cfg(feature = "remote")]
fn build_geocoder(settings: &Settings) -> anyhow::Result<Option<Box<dyn ReverseGeocoder>>> {
    let geocoder = restodb_core::geocode::NominatimGeocoder::new(
        &settings.geocoder.endpoint,
        &settings.http.user_agent,
        settings.timeout(),
    )?;
    Ok(Some(Box::new(geocoder)))
}

#[cfg(not(feature = "remote"))]
fn build_geocoder(_settings: &Settings) -> anyhow::Result<Option<Box<dyn ReverseGeocoder>>> {
    tracing::info!("built without `remote`, reverse geocoding disabled");
    Ok(None)
}

fn print_stats(db: &RestaurantDb) {
    let stats = db.stats();
    let load = db.load_stats();
    println!("Dataset statistics:");
    println!("  Restaurants: {}", stats.restaurants);
    println!("  Categories: {}", stats.categories);
    println!("  Distinct titles: {}", stats.distinct_titles);
    println!("  Rows read: {}", load.rows_read);
    println!("  Dropped (no rating): {}", load.dropped_missing_rating);
    println!("  Dropped (no coordinates): {}", load.dropped_missing_coordinates);
    println!("  Dropped (unreadable): {}", load.dropped_unreadable);
}

fn print_categories(db: &RestaurantDb) {
    for (category, color) in db.palette().entries() {
        let count = db.by_category(category).count();
        println!("{} {category} ({count})", color.to_hex());
    }
}

fn print_map(map: &MapView<'_>) {
    println!(
        "Center: {:.5}, {:.5}  zoom {}",
        map.center.0, map.center.1, map.zoom
    );
    if let Some((page, pages)) = map.page {
        println!("Page {page} of {pages}");
    }
    match &map.table {
        Some(rows) => {
            println!(
                "{:<40} {:<24} {:>6} {:<16} {:<40} {:>10} {:>11}",
                "Title", "Category", "Rating", "Phone", "Address", "Latitude", "Longitude"
            );
            for r in rows {
                println!(
                    "{:<40} {:<24} {:>6} {:<16} {:<40} {:>10.5} {:>11.5}",
                    r.title(),
                    r.category(),
                    view::format_rating(r.rating),
                    r.phone(),
                    r.address(),
                    r.latitude,
                    r.longitude
                );
            }
        }
        None => {
            for m in &map.markers {
                println!(
                    "{:>10.5} {:>11.5}  {} ({}, {})",
                    m.latitude,
                    m.longitude,
                    m.record.title(),
                    m.record.category(),
                    view::format_rating(m.record.rating)
                );
            }
        }
    }
    println!("{} markers", map.markers.len());
}

fn print_report(report: &CategoryReport<'_>) {
    println!("Category: {} ({} restaurants)", report.category, report.record_count);
    if let Some(mean) = report.mean_rating {
        println!("Mean rating: {mean:.2}");
    }

    println!("\nTop {} titles:", report.top_n);
    for t in &report.top_titles {
        println!("  {:>5}  {}", t.count, t.title);
    }

    println!("\nRatings:");
    for rc in &report.rating_counts {
        println!(
            "  {:>4}  {:>5}  {:>5.1}%",
            view::format_rating(rc.rating),
            rc.count,
            rc.percent
        );
    }

    println!("\nRating histogram:");
    for bin in report.rating_histogram.iter().filter(|b| b.count > 0) {
        println!("  [{:.2}, {:.2})  {}", bin.lower, bin.upper, bin.count);
    }

    println!("\nAverage rating by title:");
    for a in &report.average_by_title {
        println!("  {:.2}  {}", a.mean_rating, a.title);
    }
}

fn print_search(out: &SearchView<'_>) {
    print!("{}", search_report(out));
}

/// Text for the search view: ranked titles, every matched record, then the
/// picked title's location.
fn search_report(out: &SearchView<'_>) -> String {
    let mut text = String::new();
    match &out.outcome {
        SearchOutcome::NoResults => {
            let _ = writeln!(text, "No restaurants found matching: {}", out.query);
        }
        SearchOutcome::Matches {
            result,
            picked,
            picked_records,
            location,
        } => {
            let _ = writeln!(text, "Matches for \"{}\":", out.query);
            for (i, m) in result.matches.iter().enumerate() {
                let marker = if m.title == *picked { '*' } else { ' ' };
                let _ = writeln!(
                    text,
                    "{marker} {}. {} (score {:.2}, {} locations)",
                    i + 1,
                    m.title,
                    m.score,
                    m.records.len()
                );
            }

            let _ = writeln!(text, "\nNumber of restaurants found: {}", result.record_count());
            for r in result.records() {
                let _ = writeln!(
                    text,
                    "  {:>10.5} {:>11.5}  {:<40} {:>4}  {}",
                    r.latitude,
                    r.longitude,
                    r.title(),
                    view::format_rating(r.rating),
                    r.address()
                );
            }

            let _ = writeln!(
                text,
                "\n{picked} ({} locations): {}",
                picked_records.len(),
                location.label()
            );
        }
    }
    text
}
