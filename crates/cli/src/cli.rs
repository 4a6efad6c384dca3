//! Command-line arguments.

use clap::Parser;
use soldrank_core::config::{
    AuthConfig, Config, Environment, OutputConfig, RankingConfig, SearchConfig, DEFAULT_SCOPE,
};
use soldrank_core::StatusLabels;
use std::path::PathBuf;

/// Check where a sold listing ranks among the cheapest sales of a query.
///
/// Every option can also be supplied through the environment variable shown
/// in `--help`; a `.env` file in the working directory is loaded first.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Cli {
    /// Query label (custom label, model number, keywords)
    #[arg(long, env = "SOLDRANK_QUERY")]
    pub query: String,

    /// Listing identifier to look for (e.g. "v1|1234567890|0")
    #[arg(long, env = "SOLDRANK_ITEM_ID")]
    pub item_id: String,

    /// Base sale time, YYYY-MM-DDTHH:MM:SSZ [default: now]
    #[arg(long, env = "SOLDRANK_BASE_TIME")]
    pub base_time: Option<String>,

    /// Seconds added to and subtracted from the base time
    #[arg(long, env = "SOLDRANK_TOLERANCE_SECONDS", default_value_t = 30)]
    pub tolerance_seconds: u32,

    /// Highest rank still reported as in range
    #[arg(long, env = "SOLDRANK_MAX_RANK", default_value_t = 20)]
    pub max_rank: u32,

    /// Page size (at most 200)
    #[arg(long, env = "SOLDRANK_LIMIT", default_value_t = 200)]
    pub limit: u32,

    /// API environment: sandbox or prod
    #[arg(long = "env", env = "EBAY_ENV", default_value = "prod")]
    pub environment: Environment,

    /// OAuth scope requested during the token exchange
    #[arg(long, env = "EBAY_SCOPE", default_value = DEFAULT_SCOPE)]
    pub scope: String,

    /// Marketplace id header value
    #[arg(long, env = "SOLDRANK_MARKETPLACE_ID", default_value = "EBAY_US")]
    pub marketplace_id: String,

    /// CSV file to write
    #[arg(short, long, env = "SOLDRANK_OUTPUT", default_value = "result.csv")]
    pub output: PathBuf,

    /// Status labels in the output: codes or japanese
    #[arg(long, env = "SOLDRANK_LABELS", default_value = "codes")]
    pub labels: StatusLabels,

    /// Record a failed search as "HTTP <code>" in the report instead of aborting
    #[arg(long, env = "SOLDRANK_DEGRADED")]
    pub degraded: bool,
}

impl Cli {
    /// Fold the arguments into the immutable run configuration.
    pub fn into_config(self) -> Config {
        Config {
            environment: self.environment,
            auth: AuthConfig { scope: self.scope },
            search: SearchConfig {
                query: self.query,
                base_time: self.base_time,
                tolerance_seconds: self.tolerance_seconds,
                limit: self.limit,
                marketplace_id: self.marketplace_id,
            },
            ranking: RankingConfig {
                target_item_id: self.item_id,
                max_rank: self.max_rank,
            },
            output: OutputConfig {
                path: self.output,
                labels: self.labels,
                degraded: self.degraded,
            },
        }
    }
}
