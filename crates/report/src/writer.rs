//! CSV report writer.

use serde::Serialize;
use soldrank_core::{CheckOutcome, Error, RankResult, Result, StatusLabels};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Fixed header row of the report.
pub const HEADER: [&str; 5] = ["label", "item_id", "rank", "top_price", "status"];

/// One data row. Field order and names match [`HEADER`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    /// Query label.
    pub label: String,
    /// Target listing identifier.
    pub item_id: String,
    /// 1-based rank, empty when the target was not on the page.
    pub rank: Option<u32>,
    /// `"<value> <currency>"` of the first record, empty for an empty page.
    pub top_price: Option<String>,
    /// Status label, or `HTTP <code>` for a failed search.
    pub status: String,
}

impl ReportRow {
    /// Row for a classified target.
    pub fn from_result(result: &RankResult, labels: StatusLabels) -> Self {
        Self {
            label: result.query.clone(),
            item_id: result.target_id.clone(),
            rank: result.rank,
            top_price: result.top_price.as_ref().map(ToString::to_string),
            status: result.status.label(labels).to_string(),
        }
    }

    /// Row for either kind of outcome.
    pub fn from_outcome(outcome: &CheckOutcome, labels: StatusLabels) -> Self {
        match outcome {
            CheckOutcome::Ranked(result) => Self::from_result(result, labels),
            CheckOutcome::SearchFailed { status, .. } => Self {
                label: outcome.query().to_string(),
                item_id: outcome.target_id().to_string(),
                rank: None,
                top_price: None,
                status: format!("HTTP {status}"),
            },
        }
    }
}

/// Write the header and one row to any writer.
pub fn write_report_to<W: Write>(out: W, row: &ReportRow) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);
    writer
        .write_record(HEADER)
        .and_then(|_| writer.serialize(row))
        .map_err(|e| Error::output(e.to_string()))?;
    writer.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write the report into it.
pub fn write_report(path: &Path, outcome: &CheckOutcome, labels: StatusLabels) -> Result<()> {
    let row = ReportRow::from_outcome(outcome, labels);
    let file = File::create(path)
        .map_err(|e| Error::output(format!("cannot create {}: {e}", path.display())))?;
    write_report_to(file, &row)?;
    info!(path = %path.display(), status = %row.status, "report written");
    Ok(())
}
