//! restodb-cli
//! ===========
//!
//! Command-line interface for the `restodb-core` restaurant dataset library.
//!
//! The binary (`restodb`) is the deliverable; this library target only
//! carries the crate documentation.
//!
//! Quick start
//! -----------
//!
//! ```text
//! restodb --help
//! restodb --source data/restaurants.csv stats
//! restodb categories
//! restodb map --page 1
//! restodb analytics "Pizza restaurant" --top 15
//! restodb search "McDnalds" --min-similarity 0.5 --pick 1
//! ```
//!
//! For programmatic access use the `restodb-core` crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]
