//! Configuration structures for the soldrank system.

use crate::error::{Error, Result};
use crate::types::{Rank, StatusLabels};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Largest page the search endpoint will return in one request.
pub const MAX_PAGE_SIZE: u32 = 200;

/// Default OAuth scope for the marketplace insights API.
pub const DEFAULT_SCOPE: &str = "https://api.ebay.com/oauth/api_scope/buy.marketplace.insights";

/// Main configuration for a single rank check.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Which API environment to talk to.
    pub environment: Environment,
    /// Token exchange configuration.
    pub auth: AuthConfig,
    /// Search request configuration.
    pub search: SearchConfig,
    /// Rank threshold configuration.
    pub ranking: RankingConfig,
    /// Output file configuration.
    pub output: OutputConfig,
}

impl Config {
    /// Check cross-field constraints. Called once at startup.
    pub fn validate(&self) -> Result<()> {
        if self.search.query.trim().is_empty() {
            return Err(Error::config("query label must not be empty"));
        }
        if self.ranking.target_item_id.trim().is_empty() {
            return Err(Error::config("target item id must not be empty"));
        }
        if self.ranking.max_rank == 0 {
            return Err(Error::config("max rank must be at least 1"));
        }
        if self.search.limit == 0 || self.search.limit > MAX_PAGE_SIZE {
            return Err(Error::config(format!(
                "page size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.search.limit
            )));
        }
        if self.search.marketplace_id.trim().is_empty() {
            return Err(Error::config("marketplace id must not be empty"));
        }
        Ok(())
    }
}

/// API environment selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Sandbox,
    #[default]
    Production,
}

impl Environment {
    /// Resolve the endpoint URLs for this environment.
    pub fn endpoints(self) -> Endpoints {
        let host = match self {
            Environment::Sandbox => "https://api.sandbox.ebay.com",
            Environment::Production => "https://api.ebay.com",
        };
        Endpoints {
            token_url: format!("{host}/identity/v1/oauth2/token"),
            api_base: host.to_string(),
        }
    }

    /// Prefix of the credential environment variables for this environment.
    pub fn credential_prefix(self) -> &'static str {
        match self {
            Environment::Sandbox => "SANDBOX",
            Environment::Production => "PROD",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Sandbox => f.write_str("sandbox"),
            Environment::Production => f.write_str("prod"),
        }
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" => Ok(Environment::Sandbox),
            "prod" | "production" => Ok(Environment::Production),
            other => Err(Error::config(format!(
                "unknown environment '{other}' (expected 'sandbox' or 'prod')"
            ))),
        }
    }
}

/// Resolved endpoint URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    /// OAuth client-credentials token URL.
    pub token_url: String,
    /// Base URL the search path is appended to.
    pub api_base: String,
}

/// Token exchange configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// OAuth scope requested.
    pub scope: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            scope: DEFAULT_SCOPE.to_string(),
        }
    }
}

/// Search request configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Query label (e.g. a custom label or model number).
    pub query: String,
    /// Base sale time, `YYYY-MM-DDTHH:MM:SSZ`. `None` means now.
    pub base_time: Option<String>,
    /// Symmetric tolerance around the base time, in seconds.
    pub tolerance_seconds: u32,
    /// Page size (1..=200).
    pub limit: u32,
    /// Value of the marketplace-id header.
    pub marketplace_id: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            query: String::new(),
            base_time: None,
            tolerance_seconds: 30,
            limit: MAX_PAGE_SIZE,
            marketplace_id: "EBAY_US".to_string(),
        }
    }
}

/// Rank threshold configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Listing identifier to look for.
    pub target_item_id: String,
    /// Highest rank still counted as in range.
    pub max_rank: Rank,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            target_item_id: String::new(),
            max_rank: 20,
        }
    }
}

/// Output file configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Path of the CSV file to write.
    pub path: PathBuf,
    /// Display strings for the status column.
    pub labels: StatusLabels,
    /// Record search failures in the output row instead of aborting.
    pub degraded: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("result.csv"),
            labels: StatusLabels::Codes,
            degraded: false,
        }
    }
}

/// OAuth client credentials. Never serialized.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Read credentials from the process environment.
    ///
    /// Looks up `<PREFIX>_CLIENT_ID` / `<PREFIX>_CLIENT_SECRET` first, then the
    /// unprefixed `CLIENT_ID` / `CLIENT_SECRET`.
    pub fn from_env(environment: Environment) -> Result<Self> {
        Self::from_lookup(environment, |key| std::env::var(key).ok())
    }

    /// Same as [`Credentials::from_env`] with an injectable variable lookup.
    pub fn from_lookup<F>(environment: Environment, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let prefix = environment.credential_prefix();
        let non_empty = |v: &String| !v.trim().is_empty();
        let find = |name: &str| {
            lookup(&format!("{prefix}_{name}"))
                .filter(non_empty)
                .or_else(|| lookup(name).filter(non_empty))
        };

        let client_id = find("CLIENT_ID").ok_or_else(|| {
            Error::config(format!("missing client id ({prefix}_CLIENT_ID or CLIENT_ID)"))
        })?;
        let client_secret = find("CLIENT_SECRET").ok_or_else(|| {
            Error::config(format!(
                "missing client secret ({prefix}_CLIENT_SECRET or CLIENT_SECRET)"
            ))
        })?;

        Ok(Self {
            client_id,
            client_secret,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}
