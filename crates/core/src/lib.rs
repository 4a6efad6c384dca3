//! Core types and configuration for the soldrank system.
//!
//! This crate provides shared types used across all other crates:
//! - Sale records, money amounts and time windows
//! - Rank results and status classification
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, Credentials, Endpoints, Environment};
pub use error::{Error, Result};
pub use types::*;
