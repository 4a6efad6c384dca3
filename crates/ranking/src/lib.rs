//! Rank classification for the soldrank system.
//!
//! This crate handles:
//! - Time-window filter construction (base time +/- tolerance)
//! - Locating a target listing in a price-sorted page and classifying its rank

pub mod classifier;
pub mod window;

pub use classifier::RankClassifier;
pub use window::{build_filter, format_filter_time, parse_base_time, SalesFilter};
