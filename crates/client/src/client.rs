//! Authenticated marketplace client.

use async_trait::async_trait;
use soldrank_core::{Credentials, Endpoints, Error, Result, SaleRecord};
use tracing::{debug, info};

use crate::auth::{fetch_access_token, AccessToken};
use crate::search::{search_url, ItemSalesPage, SearchRequest, MARKETPLACE_HEADER};

/// Source of one page of price-sorted sale records.
#[async_trait]
pub trait SalesSearch: Send + Sync {
    /// Run a single search. Non-success statuses surface as [`Error::Request`].
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SaleRecord>>;
}

/// Client holding an access token for one environment.
#[derive(Debug)]
pub struct MarketplaceClient {
    http: reqwest::Client,
    endpoints: Endpoints,
    marketplace_id: String,
    token: AccessToken,
}

impl MarketplaceClient {
    /// Exchange credentials for a token against explicit endpoints.
    pub async fn connect_to(
        endpoints: Endpoints,
        credentials: &Credentials,
        scope: &str,
        marketplace_id: &str,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::transport(format!("building HTTP client failed: {e}")))?;
        info!(token_url = %endpoints.token_url, api_base = %endpoints.api_base, "connecting");
        let token = fetch_access_token(&http, &endpoints.token_url, credentials, scope).await?;

        Ok(Self {
            http,
            endpoints,
            marketplace_id: marketplace_id.to_string(),
            token,
        })
    }
}

#[async_trait]
impl SalesSearch for MarketplaceClient {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SaleRecord>> {
        let url = search_url(&self.endpoints.api_base);
        debug!(%url, query = %request.query, limit = request.limit, filter = %request.filter, "searching item sales");

        let response = self
            .http
            .get(&url)
            .bearer_auth(self.token.secret())
            .header(MARKETPLACE_HEADER, &self.marketplace_id)
            .query(&request.query_params())
            .send()
            .await
            .map_err(|e| Error::transport(format!("search request to {url} failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(format!("reading search response failed: {e}")))?;

        if !status.is_success() {
            return Err(Error::request(status.as_u16(), body));
        }

        let page = ItemSalesPage::from_json(&body)?;
        info!(records = page.item_sales.len(), total = ?page.total, "search returned");
        Ok(page.item_sales)
    }
}
