use crate::market_data::adapters::ProviderError;

/// Failures surfaced by the market service and the analytics facade.
///
/// The numerical core never fails; everything here comes from missing or
/// unusable upstream data.
#[derive(Debug, thiserror::Error)]
pub enum InsightsError {
    #[error("market data provider unavailable: {0}")]
    UpstreamUnavailable(#[from] ProviderError),

    #[error("market {0} not found")]
    MarketNotFound(String),

    #[error("incomplete market data for {market_id}: {reason}")]
    IncompleteMarketData { market_id: String, reason: &'static str },
}

impl InsightsError {
    /// Short stable label, used for metrics and CLI exit reporting.
    pub fn kind(&self) -> &'static str {
        match self {
            InsightsError::UpstreamUnavailable(_) => "upstream_unavailable",
            InsightsError::MarketNotFound(_) => "market_not_found",
            InsightsError::IncompleteMarketData { .. } => "incomplete_market_data",
        }
    }
}

pub type InsightsResult<T> = Result<T, InsightsError>;
