//! Market queries assembled from the data provider plus the pure liquidity engine.

use std::sync::Arc;

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, instrument, warn};

use crate::engine::liquidity::{calculate_spread, compute_liquidity, DEFAULT_DEPTH};
use crate::engine::ranking::rank_by_liquidity;
use crate::engine::types::{
    LiquidityMetrics, MarketInfo, MarketLiquidity, MarketSummary, Orderbook, RankedMarket,
};
use crate::error::{InsightsError, InsightsResult};
use crate::market_data::adapters::{MarketDataProvider, ProviderResult};

#[derive(Debug, Clone, Default)]
pub struct MarketFilter {
    /// Exact status match, e.g. "active".
    pub status: Option<String>,
    /// Case-insensitive substring of the ticker.
    pub ticker: Option<String>,
}

impl MarketFilter {
    pub fn matches(&self, market: &MarketInfo) -> bool {
        let status_ok = self.status.as_deref().map_or(true, |s| market.status == s);
        let ticker_ok = self
            .ticker
            .as_deref()
            .map_or(true, |t| market.ticker.to_lowercase().contains(&t.to_lowercase()));
        status_ok && ticker_ok
    }
}

pub fn summarize(market: &MarketInfo, book: &Orderbook) -> MarketSummary {
    let top_bid = book.top_bid();
    let top_ask = book.top_ask();
    MarketSummary {
        market_id: market.market_id.clone(),
        ticker: market.ticker.clone(),
        market_status: market.status.clone(),
        top_bid,
        top_ask,
        spread: calculate_spread(top_bid, top_ask),
    }
}

fn upstream<T>(result: ProviderResult<T>) -> InsightsResult<T> {
    result.map_err(|e| {
        warn!(error = %e, "market data provider call failed");
        metrics::counter!("insights_upstream_errors_total").increment(1);
        InsightsError::UpstreamUnavailable(e)
    })
}

#[derive(Clone)]
pub struct MarketService {
    provider: Arc<dyn MarketDataProvider>,
    depth: usize,
    rank_concurrency: usize,
}

impl MarketService {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider, depth: DEFAULT_DEPTH, rank_concurrency: 8 }
    }

    /// Levels summed per side. Zero would hide a non-empty book, so it is raised to one.
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth.max(1);
        self
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn rank_concurrency(&self) -> usize {
        self.rank_concurrency
    }

    pub fn with_rank_concurrency(mut self, n: usize) -> Self {
        self.rank_concurrency = n.max(1);
        self
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn list_markets(&self, filter: &MarketFilter) -> InsightsResult<Vec<MarketInfo>> {
        let markets = upstream(self.provider.fetch_markets().await)?;
        Ok(markets.into_iter().filter(|m| filter.matches(m)).collect())
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn get_market(&self, market_id: &str) -> InsightsResult<MarketInfo> {
        let markets = upstream(self.provider.fetch_markets().await)?;
        markets
            .into_iter()
            .find(|m| m.market_id == market_id)
            .ok_or_else(|| InsightsError::MarketNotFound(market_id.to_string()))
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn fetch_orderbook(&self, market_id: &str) -> InsightsResult<Orderbook> {
        upstream(self.provider.fetch_orderbook(market_id).await)
    }

    // Both requests run concurrently, but the lookup result is checked first so an
    // unknown market is always MarketNotFound, whatever the book fetch returned.
    async fn market_and_book(&self, market_id: &str) -> InsightsResult<(MarketInfo, Orderbook)> {
        let (market, book) =
            tokio::join!(self.get_market(market_id), self.fetch_orderbook(market_id));
        Ok((market?, book?))
    }

    pub async fn fetch_market_summary(&self, market_id: &str) -> InsightsResult<MarketSummary> {
        let (market, book) = self.market_and_book(market_id).await?;
        let summary = summarize(&market, &book);
        debug!(
            market_id,
            top_bid = summary.top_bid,
            top_ask = summary.top_ask,
            buys = book.buys.len(),
            sells = book.sells.len(),
            "built market summary"
        );
        Ok(summary)
    }

    pub async fn fetch_liquidity(
        &self,
        market_id: &str,
        depth: Option<usize>,
    ) -> InsightsResult<MarketLiquidity> {
        let book = self.fetch_orderbook(market_id).await?;
        let metrics = compute_liquidity(&book.buys, &book.sells, depth.unwrap_or(self.depth).max(1));
        Ok(MarketLiquidity { market_id: market_id.to_string(), metrics })
    }

    /// Summary and liquidity from a single market lookup and a single book fetch.
    /// Also hands back the book so callers can check what the figures were built from.
    pub async fn fetch_full_market_data(
        &self,
        market_id: &str,
    ) -> InsightsResult<(MarketSummary, LiquidityMetrics, Orderbook)> {
        let (market, book) = self.market_and_book(market_id).await?;
        let summary = summarize(&market, &book);
        let liquidity = compute_liquidity(&book.buys, &book.sells, self.depth);
        Ok((summary, liquidity, book))
    }

    /// Every listed market, best liquidity first. One failed book fetch fails the whole ranking.
    #[instrument(level = "debug", skip(self))]
    pub async fn rank_markets(&self) -> InsightsResult<Vec<RankedMarket>> {
        let markets = upstream(self.provider.fetch_markets().await)?;
        let depth = self.depth;

        // buffered() yields in input order, so ties keep the provider's listing order
        let scored: Vec<RankedMarket> = stream::iter(markets)
            .map(|market| async move {
                let book = self.fetch_orderbook(&market.market_id).await?;
                Ok::<_, InsightsError>(RankedMarket {
                    liquidity: compute_liquidity(&book.buys, &book.sells, depth),
                    market_id: market.market_id,
                    ticker: market.ticker,
                })
            })
            .buffered(self.rank_concurrency)
            .try_collect()
            .await?;

        debug!(count = scored.len(), "scored markets for ranking");
        Ok(rank_by_liquidity(scored))
    }
}
