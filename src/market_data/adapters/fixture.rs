// Offline provider: serves markets and books from memory or a JSON file.
//
// File layout:
// { "markets": [ { "marketId": .., "ticker": .., "quoteDenom": .., "baseDenom": .., "status": .. } ],
//   "orderbooks": { "<marketId>": { "buys": [ {"price": .., "quantity": ..} ], "sells": [ .. ] } } }

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use super::{MarketDataProvider, ProviderError, ProviderResult};
use crate::engine::types::{MarketInfo, Orderbook};
use crate::market_data::normaliser::check_level;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixtureProvider {
    #[serde(default)]
    markets: Vec<MarketInfo>,
    #[serde(default)]
    orderbooks: HashMap<String, Orderbook>,
}

impl FixtureProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(raw: &str) -> ProviderResult<Self> {
        let fixture: Self =
            serde_json::from_str(raw).map_err(|e| ProviderError::Malformed(e.to_string()))?;
        for book in fixture.orderbooks.values() {
            for level in book.buys.iter().chain(book.sells.iter()) {
                check_level(level)?;
            }
        }
        Ok(fixture)
    }

    pub fn from_file(path: &Path) -> ProviderResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ProviderError::Unavailable(format!("{}: {e}", path.display())))?;
        let fixture = Self::from_json(&raw)?;
        info!(path = %path.display(), markets = fixture.markets.len(), "loaded market fixture");
        Ok(fixture)
    }

    pub fn with_market(mut self, market: MarketInfo, book: Orderbook) -> Self {
        self.orderbooks.insert(market.market_id.clone(), book);
        self.markets.push(market);
        self
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for FixtureProvider {
    async fn fetch_markets(&self) -> ProviderResult<Vec<MarketInfo>> {
        Ok(self.markets.clone())
    }

    // Markets listed without a book read as an empty book
    async fn fetch_orderbook(&self, market_id: &str) -> ProviderResult<Orderbook> {
        Ok(self.orderbooks.get(market_id).cloned().unwrap_or_default())
    }
}
