//! Item sales search request and response types.

use serde::Deserialize;
use soldrank_core::{Config, Result, SaleRecord};
use soldrank_ranking::SalesFilter;

/// Path of the item sales search resource, relative to the API base.
pub const SEARCH_PATH: &str = "/buy/marketplace_insights/v1_beta/item_sales/search";

/// Header naming the marketplace the search runs against.
pub const MARKETPLACE_HEADER: &str = "X-EBAY-C-MARKETPLACE-ID";

/// One page of price-sorted sales for a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Query label (`q`).
    pub query: String,
    /// Page size (`limit`).
    pub limit: u32,
    /// Date window and locale constraints (`filter`).
    pub filter: SalesFilter,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, limit: u32, filter: SalesFilter) -> Self {
        Self {
            query: query.into(),
            limit,
            filter,
        }
    }

    /// Build the request for the configured query and page size.
    pub fn from_config(config: &Config, filter: SalesFilter) -> Self {
        Self::new(config.search.query.clone(), config.search.limit, filter)
    }

    /// Query string parameters. Always the first page, sorted by price.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("q", self.query.clone()),
            ("limit", self.limit.to_string()),
            ("offset", "0".to_string()),
            ("filter", self.filter.to_filter_expr()),
            ("sort", "price".to_string()),
        ]
    }
}

/// Full search URL for an API base.
pub fn search_url(api_base: &str) -> String {
    format!("{}{SEARCH_PATH}", api_base.trim_end_matches('/'))
}

/// Decoded search response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSalesPage {
    /// Sale records in the order the endpoint returned them.
    #[serde(default)]
    pub item_sales: Vec<SaleRecord>,
    /// Total matches across all pages, if reported.
    #[serde(default)]
    pub total: Option<u64>,
}

impl ItemSalesPage {
    /// Decode a response body. A body without `itemSales` is an empty page.
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soldrank_core::Money;
    use soldrank_ranking::build_filter;

    #[test]
    fn test_query_params() {
        let filter = build_filter("2025-06-14T12:00:00Z", 30).unwrap();
        let request = SearchRequest::new("M51828", 200, filter);
        let params = request.query_params();

        assert_eq!(params[0], ("q", "M51828".to_string()));
        assert_eq!(params[1], ("limit", "200".to_string()));
        assert_eq!(params[2], ("offset", "0".to_string()));
        assert_eq!(params[3].0, "filter");
        assert!(params[3].1.starts_with("lastSoldDate:[2025-06-14T11:59:30Z.."));
        assert_eq!(params[4], ("sort", "price".to_string()));
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        config.search.query = "M51828".to_string();
        config.search.limit = 50;
        let filter = build_filter("2025-06-14T12:00:00Z", 0).unwrap();

        let request = SearchRequest::from_config(&config, filter);
        assert_eq!(request.query, "M51828");
        assert_eq!(request.limit, 50);
    }

    #[test]
    fn test_search_url() {
        assert_eq!(
            search_url("https://api.ebay.com"),
            "https://api.ebay.com/buy/marketplace_insights/v1_beta/item_sales/search"
        );
        assert_eq!(search_url("http://127.0.0.1:9/"), format!("http://127.0.0.1:9{SEARCH_PATH}"));
    }

    #[test]
    fn test_page_from_json() {
        let body = r#"{
            "href": "https://api.ebay.com/...",
            "total": 2,
            "itemSales": [
                {"itemId": "v1|111|0", "lastSoldPrice": {"value": "10.00", "currency": "USD"}},
                {"itemId": "v1|222|0", "lastSoldPrice": {"value": "12.00", "currency": "USD"}}
            ]
        }"#;
        let page = ItemSalesPage::from_json(body).unwrap();

        assert_eq!(page.total, Some(2));
        assert_eq!(page.item_sales.len(), 2);
        assert_eq!(page.item_sales[1].item_id, "v1|222|0");
        assert_eq!(
            page.item_sales[0].last_sold_price,
            Some(Money::new("10.00", "USD"))
        );
    }

    #[test]
    fn test_page_without_sales_is_empty() {
        let page = ItemSalesPage::from_json(r#"{"total": 0}"#).unwrap();
        assert!(page.item_sales.is_empty());
    }

    #[test]
    fn test_page_rejects_garbage() {
        assert!(ItemSalesPage::from_json("<html>").is_err());
    }
}
