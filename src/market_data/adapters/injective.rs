// Injective spot indexer adapter over the REST gateway

use std::time::Duration;

use tracing::{debug, instrument, warn};

use super::injective_types::{MarketsResponse, OrderbookResponse, PriceLevel};
use super::{MarketDataProvider, ProviderError, ProviderResult};
use crate::engine::types::{MarketInfo, OrderLevel, Orderbook};
use crate::market_data::normaliser::normalise_side;

pub const DEFAULT_BASE_URL: &str = "https://sentry.exchange.grpc-web.injective.network";

pub struct InjectiveAdapter {
    pub base_url: String, // gateway root, no trailing slash
    client: reqwest::Client,
}

impl InjectiveAdapter {
    pub fn new(base_url: &str, timeout: Duration) -> ProviderResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Unavailable(format!("http client: {e}")))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn markets_url(&self) -> String {
        format!("{}/api/exchange/spot/v1/markets", self.base_url)
    }

    fn orderbook_url(&self, market_id: &str) -> String {
        format!("{}/api/exchange/spot/v2/orderbook/{}", self.base_url, market_id)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> ProviderResult<T> {
        let res = self.client.get(url).send().await?;
        let status = res.status();
        if !status.is_success() {
            warn!(%url, %status, "indexer request failed");
            return Err(ProviderError::Unavailable(format!("{url} returned {status}")));
        }
        Ok(res.json::<T>().await?)
    }
}

fn side(levels: &[PriceLevel]) -> ProviderResult<Vec<OrderLevel>> {
    normalise_side(levels.iter().map(|l| (l.price.as_str(), l.quantity.as_str())))
}

#[async_trait::async_trait]
impl MarketDataProvider for InjectiveAdapter {
    #[instrument(level = "debug", skip(self))]
    async fn fetch_markets(&self) -> ProviderResult<Vec<MarketInfo>> {
        let body: MarketsResponse = self.get_json(&self.markets_url()).await?;
        debug!(count = body.markets.len(), "fetched spot markets");
        Ok(body
            .markets
            .into_iter()
            .map(|m| MarketInfo {
                market_id: m.market_id,
                ticker: m.ticker,
                quote_denom: m.quote_denom,
                base_denom: m.base_denom,
                status: m.market_status,
            })
            .collect())
    }

    #[instrument(level = "debug", skip(self))]
    async fn fetch_orderbook(&self, market_id: &str) -> ProviderResult<Orderbook> {
        let body: OrderbookResponse = self.get_json(&self.orderbook_url(market_id)).await?;
        let book = body.orderbook.unwrap_or_default();
        let orderbook = Orderbook { buys: side(&book.buys)?, sells: side(&book.sells)? };
        debug!(buys = orderbook.buys.len(), sells = orderbook.sells.len(), "fetched orderbook");
        Ok(orderbook)
    }
}
