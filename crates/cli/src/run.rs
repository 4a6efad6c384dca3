//! The single-shot check: filter, search, classify, write.

use anyhow::Context;
use chrono::{DateTime, SubsecRound, Utc};
use soldrank_client::{MarketplaceClient, SalesSearch, SearchRequest};
use soldrank_core::{CheckOutcome, Config, Credentials, Endpoints, Error, Result};
use soldrank_ranking::{parse_base_time, RankClassifier, SalesFilter};
use soldrank_report::write_report;
use tracing::{info, warn};

/// Base time from configuration, or the current second when unset.
pub fn resolve_base_time(config: &Config) -> Result<DateTime<Utc>> {
    match config.search.base_time.as_deref() {
        Some(raw) => parse_base_time(raw),
        None => Ok(Utc::now().trunc_subsecs(0)),
    }
}

/// Search one page around `base_time` and classify the target in it.
///
/// A failed search is returned as an error, unless degraded mode is on, in
/// which case it becomes [`CheckOutcome::SearchFailed`].
pub async fn check_listing<S>(
    source: &S,
    config: &Config,
    base_time: DateTime<Utc>,
) -> Result<CheckOutcome>
where
    S: SalesSearch + ?Sized,
{
    let filter = SalesFilter::around(base_time, config.search.tolerance_seconds)?;
    let request = SearchRequest::from_config(config, filter);
    let query = &config.search.query;
    let target_id = &config.ranking.target_item_id;

    match source.search(&request).await {
        Ok(records) => {
            let result = RankClassifier::from_config(config).classify(query, target_id, &records);
            info!(
                query = %result.query,
                target_id = %result.target_id,
                rank = ?result.rank,
                top_price = ?result.top_price.as_ref().map(ToString::to_string),
                status = %result.status,
                "rank check complete"
            );
            Ok(CheckOutcome::Ranked(result))
        }
        Err(Error::Request { status, body }) if config.output.degraded => {
            warn!(status, %body, "search failed, recording status in report");
            Ok(CheckOutcome::SearchFailed {
                query: query.clone(),
                target_id: target_id.clone(),
                status,
            })
        }
        Err(e) => Err(e),
    }
}

/// Run one complete check against the configured environment and write the
/// report.
pub async fn run(config: &Config) -> anyhow::Result<CheckOutcome> {
    config.validate()?;
    let base_time = resolve_base_time(config)?;
    let credentials = Credentials::from_env(config.environment)?;

    info!(environment = %config.environment, "starting rank check");
    run_with(config, config.environment.endpoints(), &credentials, base_time).await
}

/// Connect to `endpoints`, check the listing and write the report.
///
/// The report file is only created once the search has produced an outcome,
/// so a fatal auth or search failure leaves no file behind.
pub async fn run_with(
    config: &Config,
    endpoints: Endpoints,
    credentials: &Credentials,
    base_time: DateTime<Utc>,
) -> anyhow::Result<CheckOutcome> {
    let client = MarketplaceClient::connect_to(
        endpoints,
        credentials,
        &config.auth.scope,
        &config.search.marketplace_id,
    )
    .await
    .context("credential exchange failed")?;
    let outcome = check_listing(&client, config, base_time)
        .await
        .context("item sales search failed")?;

    write_report(&config.output.path, &outcome, config.output.labels)
        .with_context(|| format!("writing {}", config.output.path.display()))?;
    Ok(outcome)
}
