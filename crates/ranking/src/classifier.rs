//! Target rank classification.
//!
//! Locates a target listing within a price-ascending page of sale records and
//! classifies its position against a rank threshold.
//!
//! The page order is taken as authoritative: records are never re-sorted and
//! equal prices are not tie-broken, so the first occurrence of the target wins.

use soldrank_core::{Config, Rank, RankResult, RankStatus, SaleRecord};
use tracing::debug;

/// Classifier holding the rank threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankClassifier {
    /// Highest rank still counted as in range.
    max_rank: Rank,
}

impl RankClassifier {
    /// Create a classifier. `max_rank` is expected to be at least 1.
    pub fn new(max_rank: Rank) -> Self {
        Self { max_rank }
    }

    /// Create a classifier from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.ranking.max_rank)
    }

    /// Classify `target_id` within `records`.
    pub fn classify(&self, query: &str, target_id: &str, records: &[SaleRecord]) -> RankResult {
        let Some(first) = records.first() else {
            debug!(query, target_id, "empty page");
            return RankResult {
                query: query.to_string(),
                target_id: target_id.to_string(),
                rank: None,
                top_price: None,
                status: RankStatus::NotFound,
            };
        };

        let rank = find_rank(records, target_id);
        let status = match rank {
            Some(r) if r <= self.max_rank => RankStatus::InRange,
            _ => RankStatus::OutOfRange,
        };

        debug!(
            query,
            target_id,
            page_size = records.len(),
            ?rank,
            %status,
            "classified target"
        );

        RankResult {
            query: query.to_string(),
            target_id: target_id.to_string(),
            rank,
            top_price: first.last_sold_price.clone(),
            status,
        }
    }
}

/// 1-based position of the first record whose id equals `target_id`.
pub fn find_rank(records: &[SaleRecord], target_id: &str) -> Option<Rank> {
    records
        .iter()
        .position(|r| r.item_id == target_id)
        .and_then(|idx| Rank::try_from(idx + 1).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use soldrank_core::Money;

    fn make_record(id: &str, value: &str) -> SaleRecord {
        SaleRecord::new(id, Money::new(value, "USD"))
    }

    fn two_records() -> Vec<SaleRecord> {
        vec![make_record("A", "10"), make_record("X", "12")]
    }

    #[test]
    fn test_empty_page_not_found() {
        let result = RankClassifier::new(20).classify("M51828", "X", &[]);

        assert_eq!(result.status, RankStatus::NotFound);
        assert_eq!(result.rank, None);
        assert_eq!(result.top_price, None);
        assert_eq!(result.query, "M51828");
        assert_eq!(result.target_id, "X");
    }

    #[test]
    fn test_found_within_threshold() {
        let result = RankClassifier::new(20).classify("q", "X", &two_records());

        assert_eq!(result.rank, Some(2));
        assert_eq!(result.top_price.unwrap().to_string(), "10 USD");
        assert_eq!(result.status, RankStatus::InRange);
    }

    #[test]
    fn test_found_beyond_threshold() {
        let result = RankClassifier::new(1).classify("q", "X", &two_records());

        assert_eq!(result.rank, Some(2));
        assert_eq!(result.top_price.unwrap().to_string(), "10 USD");
        assert_eq!(result.status, RankStatus::OutOfRange);
    }

    #[test]
    fn test_rank_equal_to_threshold_is_in_range() {
        let result = RankClassifier::new(2).classify("q", "X", &two_records());
        assert_eq!(result.status, RankStatus::InRange);
    }

    #[test]
    fn test_missing_target_out_of_range() {
        let records = vec![
            make_record("A", "10"),
            make_record("B", "11"),
            make_record("C", "12"),
        ];
        let result = RankClassifier::new(20).classify("q", "Z", &records);

        assert_eq!(result.rank, None);
        assert_eq!(result.top_price, Some(Money::new("10", "USD")));
        assert_eq!(result.status, RankStatus::OutOfRange);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let records = vec![
            make_record("A", "10"),
            make_record("X", "11"),
            make_record("B", "11"),
            make_record("X", "15"),
        ];
        let result = RankClassifier::new(20).classify("q", "X", &records);
        assert_eq!(result.rank, Some(2));
    }

    #[test]
    fn test_page_order_is_trusted() {
        // Not price-ascending; the classifier must not re-sort.
        let records = vec![
            make_record("A", "30"),
            make_record("B", "10"),
            make_record("X", "20"),
        ];
        let result = RankClassifier::new(20).classify("q", "X", &records);

        assert_eq!(result.rank, Some(3));
        assert_eq!(result.top_price, Some(Money::new("30", "USD")));
    }

    #[test]
    fn test_top_price_independent_of_target() {
        let records: Vec<SaleRecord> = (0..50)
            .map(|i| make_record(&format!("id-{i}"), &format!("{}.00", 100 + i)))
            .collect();
        let classifier = RankClassifier::new(20);

        for (k, target) in ["id-0", "id-19", "id-20", "id-49", "nope"].iter().enumerate() {
            let result = classifier.classify("q", target, &records);
            assert_eq!(result.top_price, Some(Money::new("100.00", "USD")), "case {k}");
        }

        assert_eq!(classifier.classify("q", "id-19", &records).status, RankStatus::InRange);
        assert_eq!(classifier.classify("q", "id-20", &records).status, RankStatus::OutOfRange);
        assert_eq!(classifier.classify("q", "id-49", &records).rank, Some(50));
    }

    #[test]
    fn test_first_record_without_price() {
        let records = vec![
            SaleRecord {
                item_id: "A".to_string(),
                last_sold_price: None,
            },
            make_record("X", "12"),
        ];
        let result = RankClassifier::new(20).classify("q", "X", &records);

        assert_eq!(result.rank, Some(2));
        assert_eq!(result.top_price, None);
        assert_eq!(result.status, RankStatus::InRange);
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        config.ranking.max_rank = 5;
        assert_eq!(RankClassifier::from_config(&config), RankClassifier::new(5));
    }
}
