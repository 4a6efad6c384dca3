//! Sales filter construction from a base time and a fluctuation tolerance.
//!
//! Produces the comma-separated filter expression understood by the item
//! sales search endpoint:
//! `lastSoldDate:[<from>..<to>],itemLocationCountry:US,priceCurrency:USD`.

use chrono::{DateTime, NaiveDateTime, TimeZone, Timelike, Utc};
use soldrank_core::{Error, Result, TimeWindow, FILTER_TIME_FORMAT};
use std::fmt;
use tracing::debug;

/// Country every search is restricted to.
pub const COUNTRY: &str = "US";
/// Currency every search is restricted to.
pub const CURRENCY: &str = "USD";

/// Parse a `YYYY-MM-DDTHH:MM:SSZ` timestamp.
pub fn parse_base_time(input: &str) -> Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(input, FILTER_TIME_FORMAT).map_err(|e| {
        Error::format(format!(
            "base time '{input}' is not of the form YYYY-MM-DDTHH:MM:SSZ: {e}"
        ))
    })?;
    // chrono parses second 60 as a leap second carried in the nanoseconds.
    if naive.nanosecond() >= 1_000_000_000 {
        return Err(Error::format(format!(
            "base time '{input}' has second 60, which is not a valid timestamp"
        )));
    }
    Ok(Utc.from_utc_datetime(&naive))
}

/// Render a timestamp the way the filter syntax expects.
pub fn format_filter_time(ts: &DateTime<Utc>) -> String {
    ts.format(FILTER_TIME_FORMAT).to_string()
}

/// A sold-date window plus the fixed locale constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalesFilter {
    pub window: TimeWindow,
}

impl SalesFilter {
    pub fn new(window: TimeWindow) -> Self {
        Self { window }
    }

    /// Filter covering `base +/- tolerance_seconds`.
    pub fn around(base: DateTime<Utc>, tolerance_seconds: u32) -> Result<Self> {
        let window = TimeWindow::around(base, tolerance_seconds).ok_or_else(|| {
            Error::format(format!(
                "window of +/-{tolerance_seconds}s around {base} is out of range"
            ))
        })?;
        Ok(Self::new(window))
    }

    /// The `lastSoldDate` range clause on its own.
    pub fn date_clause(&self) -> String {
        format!(
            "lastSoldDate:[{}..{}]",
            format_filter_time(&self.window.from),
            format_filter_time(&self.window.to)
        )
    }

    /// Full filter expression as sent in the `filter` query parameter.
    pub fn to_filter_expr(&self) -> String {
        format!(
            "{},itemLocationCountry:{COUNTRY},priceCurrency:{CURRENCY}",
            self.date_clause()
        )
    }
}

impl fmt::Display for SalesFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_filter_expr())
    }
}

/// Parse the base time and build the filter in one step.
pub fn build_filter(base_time: &str, tolerance_seconds: u32) -> Result<SalesFilter> {
    let base = parse_base_time(base_time)?;
    let filter = SalesFilter::around(base, tolerance_seconds)?;
    debug!(filter = %filter, "built sales filter");
    Ok(filter)
}
