use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for restodb
#[derive(Debug, Parser)]
#[command(
    name = "restodb",
    version,
    about = "CLI for exploring a restaurant dataset: maps, category analytics and fuzzy search"
)]
pub struct CliArgs {
    /// Dataset location: local path, file:// or http(s):// URL (overrides the config file)
    #[arg(short = 's', long = "source", global = true)]
    pub source: Option<String>,

    /// TOML settings file layered over the built-in defaults
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Binary snapshot reused while it is newer than the source
    #[arg(long = "snapshot", global = true)]
    pub snapshot: Option<PathBuf>,

    /// Verbose logging (same as RUST_LOG=debug)
    #[arg(long = "debug", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the loaded dataset
    Stats,

    /// List all categories with their palette colors
    Categories,

    /// Print map markers (all records, one page, or one category)
    Map {
        /// 1-based page number; also prints the page as a table
        #[arg(short = 'p', long = "page", conflicts_with = "category")]
        page: Option<usize>,

        /// Only markers of this category (case-insensitive)
        #[arg(long = "category")]
        category: Option<String>,
    },

    /// Per-category statistics
    Analytics {
        /// Category name (case-insensitive)
        category: String,

        /// Number of most frequent titles to show (1-50)
        #[arg(short = 'n', long = "top", default_value_t = 10)]
        top: usize,
    },

    /// Fuzzy search restaurant titles and locate the best match
    Search {
        /// Free-text query (typos are fine)
        query: String,

        /// Which match to locate, 1-based (default: the best one)
        #[arg(long = "pick")]
        pick: Option<usize>,

        /// Maximum number of matched titles
        #[arg(short = 'l', long = "limit")]
        limit: Option<usize>,

        /// Similarity cutoff in [0, 1]
        #[arg(long = "min-similarity")]
        min_similarity: Option<f64>,

        /// Compare case- and accent-insensitively
        #[arg(long = "fold")]
        fold: bool,

        /// Skip reverse geocoding
        #[arg(long = "no-geocode")]
        no_geocode: bool,
    },
}
