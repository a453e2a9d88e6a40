//! Order-book analytics for spot markets: liquidity scores, market summaries
//! and rolling volatility over a bounded per-market history.

pub mod config;
pub mod engine;
pub mod error;
pub mod market_data;
pub mod telemetry;

pub use engine::liquidity::compute_liquidity;
pub use engine::volatility::VolatilityTracker;
pub use error::{InsightsError, InsightsResult};
pub use market_data::analytics::MarketAnalytics;
pub use market_data::service::MarketService;
