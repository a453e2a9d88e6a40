// Shared trait + error for market data providers

use crate::engine::types::{MarketInfo, Orderbook};

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    // network, HTTP status or lookup failure
    #[error("{0}")]
    Unavailable(String),
    // the provider answered but the payload could not be used
    #[error("malformed payload: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ProviderError::Malformed(e.to_string())
        } else {
            ProviderError::Unavailable(e.to_string())
        }
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Source of market listings and order books. Levels come back already
/// normalised, best first on each side.
#[async_trait::async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn fetch_markets(&self) -> ProviderResult<Vec<MarketInfo>>;
    async fn fetch_orderbook(&self, market_id: &str) -> ProviderResult<Orderbook>;
}

pub mod fixture;
pub mod injective;
pub mod injective_types;
