//! HTTP collaborators for the soldrank system.
//!
//! This crate handles:
//! - OAuth client-credentials token exchange
//! - Item sales search requests and response decoding
//! - The `SalesSearch` seam the run pipeline is written against

pub mod auth;
pub mod client;
pub mod search;

#[cfg(any(test, feature = "stub"))]
pub mod stub;

pub use auth::{fetch_access_token, AccessToken};
pub use client::{MarketplaceClient, SalesSearch};
pub use search::{ItemSalesPage, SearchRequest};
