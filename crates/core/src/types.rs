//! Core data types for the soldrank system.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 1-based position of a listing within a result page.
pub type Rank = u32;

/// Timestamp format used by the sales filter syntax (UTC, second precision).
pub const FILTER_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A monetary amount as reported by the search endpoint.
///
/// The value is kept verbatim (e.g. `"10.00"`) so it can be echoed exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount as a decimal string.
    pub value: String,
    /// ISO currency code.
    pub currency: String,
}

impl Money {
    /// Create a money amount.
    pub fn new(value: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            currency: currency.into(),
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.currency)
    }
}

/// A single sold listing from a search result page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    /// Opaque listing identifier.
    #[serde(default)]
    pub item_id: String,
    /// Price the listing last sold for.
    #[serde(default)]
    pub last_sold_price: Option<Money>,
}

impl SaleRecord {
    /// Create a sale record with a known price.
    pub fn new(item_id: impl Into<String>, price: Money) -> Self {
        Self {
            item_id: item_id.into(),
            last_sold_price: Some(price),
        }
    }
}

/// Inclusive `[from, to]` window around a base instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Window start (inclusive).
    pub from: DateTime<Utc>,
    /// Window end (inclusive).
    pub to: DateTime<Utc>,
}

impl TimeWindow {
    /// Build the window `[base - tolerance, base + tolerance]`.
    ///
    /// Returns `None` only if either bound falls outside chrono's range.
    pub fn around(base: DateTime<Utc>, tolerance_seconds: u32) -> Option<Self> {
        let tolerance = Duration::seconds(i64::from(tolerance_seconds));
        Some(Self {
            from: base.checked_sub_signed(tolerance)?,
            to: base.checked_add_signed(tolerance)?,
        })
    }
}

/// Classification of a target listing against the rank threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RankStatus {
    /// Found at or above the threshold position.
    InRange,
    /// Found below the threshold, or absent from a non-empty page.
    OutOfRange,
    /// The page was empty.
    NotFound,
}

impl RankStatus {
    /// Canonical status code.
    pub fn as_str(self) -> &'static str {
        match self {
            RankStatus::InRange => "IN_RANGE",
            RankStatus::OutOfRange => "OUT_OF_RANGE",
            RankStatus::NotFound => "NOT_FOUND",
        }
    }

    /// Display string under the given label set.
    pub fn label(self, labels: StatusLabels) -> &'static str {
        match labels {
            StatusLabels::Codes => self.as_str(),
            StatusLabels::Japanese => match self {
                RankStatus::InRange => "圏内",
                RankStatus::OutOfRange => "圏外",
                RankStatus::NotFound => "未検出",
            },
        }
    }
}

impl fmt::Display for RankStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which display strings to use for [`RankStatus`] in the output file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLabels {
    #[default]
    Codes,
    Japanese,
}

impl FromStr for StatusLabels {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "codes" | "code" => Ok(StatusLabels::Codes),
            "japanese" | "ja" => Ok(StatusLabels::Japanese),
            other => Err(crate::Error::config(format!(
                "unknown status label set '{other}' (expected 'codes' or 'japanese')"
            ))),
        }
    }
}

/// Outcome of classifying one target against one result page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankResult {
    /// Query label, echoed from the input.
    pub query: String,
    /// Target listing identifier, echoed from the input.
    pub target_id: String,
    /// 1-based position of the target, if it was on the page.
    pub rank: Option<Rank>,
    /// Price of the first (cheapest) record, if the page was non-empty.
    pub top_price: Option<Money>,
    /// Classification.
    pub status: RankStatus,
}

/// What a single invocation produced: a classification, or (in degraded mode)
/// the HTTP status of a failed search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckOutcome {
    /// The search succeeded and the target was classified.
    Ranked(RankResult),
    /// The search returned a non-success status.
    SearchFailed {
        /// Query label, echoed from the input.
        query: String,
        /// Target listing identifier, echoed from the input.
        target_id: String,
        /// HTTP status of the failed search.
        status: u16,
    },
}

impl CheckOutcome {
    /// Query label of the run.
    pub fn query(&self) -> &str {
        match self {
            CheckOutcome::Ranked(r) => &r.query,
            CheckOutcome::SearchFailed { query, .. } => query,
        }
    }

    /// Target listing identifier of the run.
    pub fn target_id(&self) -> &str {
        match self {
            CheckOutcome::Ranked(r) => &r.target_id,
            CheckOutcome::SearchFailed { target_id, .. } => target_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new("10", "USD").to_string(), "10 USD");
        assert_eq!(Money::new("129.99", "USD").to_string(), "129.99 USD");
    }

    #[test]
    fn test_window_is_symmetric() {
        let base = Utc.with_ymd_and_hms(2025, 6, 14, 12, 0, 0).unwrap();
        let window = TimeWindow::around(base, 30).unwrap();
        assert_eq!(window.from, Utc.with_ymd_and_hms(2025, 6, 14, 11, 59, 30).unwrap());
        assert_eq!(window.to, Utc.with_ymd_and_hms(2025, 6, 14, 12, 0, 30).unwrap());
    }

    #[test]
    fn test_zero_tolerance_window() {
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let window = TimeWindow::around(base, 0).unwrap();
        assert_eq!(window.from, base);
        assert_eq!(window.to, base);
    }

    #[test]
    fn test_window_crosses_midnight() {
        let base = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 50).unwrap();
        let window = TimeWindow::around(base, 20).unwrap();
        assert_eq!(window.to, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 10).unwrap());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(RankStatus::InRange.label(StatusLabels::Codes), "IN_RANGE");
        assert_eq!(RankStatus::OutOfRange.label(StatusLabels::Japanese), "圏外");
        assert_eq!(RankStatus::NotFound.label(StatusLabels::Japanese), "未検出");
        assert_eq!("JA".parse::<StatusLabels>().unwrap(), StatusLabels::Japanese);
        assert!("klingon".parse::<StatusLabels>().is_err());
    }

    #[test]
    fn test_sale_record_from_json() {
        let json = r#"{
            "itemId": "v1|1234567890|0",
            "title": "ignored",
            "lastSoldPrice": { "value": "12.50", "currency": "USD" }
        }"#;
        let record: SaleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.item_id, "v1|1234567890|0");
        assert_eq!(record.last_sold_price, Some(Money::new("12.50", "USD")));
    }

    #[test]
    fn test_sale_record_missing_fields() {
        let record: SaleRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record.item_id, "");
        assert!(record.last_sold_price.is_none());
    }
}
