//! Per-market analytics: summary + liquidity + rolling volatility in one report.
//!
//! Every successful `get_analytics` call appends exactly one snapshot to the
//! market's history, so the volatility window follows request traffic rather
//! than a wall clock. Repeated identical requests still each add a snapshot.

use std::sync::Arc;

use tracing::instrument;

use crate::engine::types::{AnalyticsReport, VolatilitySnapshot};
use crate::engine::volatility::VolatilityTracker;
use crate::error::{InsightsError, InsightsResult};
use crate::market_data::service::MarketService;

#[derive(Clone)]
pub struct MarketAnalytics {
    service: MarketService,
    tracker: Arc<VolatilityTracker>,
}

impl MarketAnalytics {
    pub fn new(service: MarketService, tracker: Arc<VolatilityTracker>) -> Self {
        Self { service, tracker }
    }

    pub fn service(&self) -> &MarketService {
        &self.service
    }

    pub fn tracker(&self) -> &Arc<VolatilityTracker> {
        &self.tracker
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn get_analytics(&self, market_id: &str) -> InsightsResult<AnalyticsReport> {
        metrics::counter!("insights_analytics_requests_total").increment(1);

        let (summary, liquidity, book) = self.service.fetch_full_market_data(market_id).await?;
        if book.is_empty() {
            return Err(InsightsError::IncompleteMarketData {
                market_id: market_id.to_string(),
                reason: "order book has no levels on either side",
            });
        }

        let spread = summary.spread.unwrap_or(liquidity.spread);
        let snapshot = VolatilitySnapshot {
            mid_price: (summary.top_bid + summary.top_ask) / 2.0,
            spread,
            total_depth: liquidity.total_depth,
        };
        let volatility = self.tracker.observe(market_id, snapshot);

        Ok(AnalyticsReport {
            market_id: market_id.to_string(),
            spread,
            summary,
            liquidity,
            volatility,
        })
    }
}
