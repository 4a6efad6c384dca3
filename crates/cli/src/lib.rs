//! Command-line front end for the soldrank system.
//!
//! Wires configuration, the marketplace client, the rank classifier and the
//! report writer into one run.

pub mod cli;
pub mod run;

pub use cli::Cli;
pub use run::{check_listing, resolve_base_time, run, run_with};
