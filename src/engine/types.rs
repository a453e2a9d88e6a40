use serde::{Deserialize, Serialize};

// One price/size point on one side of a book (already normalised to f64)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderLevel {
    pub price: f64,
    pub quantity: f64,
}

impl OrderLevel {
    pub fn new(price: f64, quantity: f64) -> Self {
        Self { price, quantity }
    }

    /// Notional value of the level (price x quantity).
    pub fn notional(&self) -> f64 {
        self.price * self.quantity
    }
}

// Both sides of a book, best level first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Orderbook {
    #[serde(default)]
    pub buys: Vec<OrderLevel>,
    #[serde(default)]
    pub sells: Vec<OrderLevel>,
}

impl Orderbook {
    pub fn top_bid(&self) -> f64 {
        self.buys.first().map(|l| l.price).unwrap_or(0.0)
    }

    pub fn top_ask(&self) -> f64 {
        self.sells.first().map(|l| l.price).unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.buys.is_empty() && self.sells.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidityMetrics {
    pub total_bid_depth: f64,
    pub total_ask_depth: f64,
    pub total_depth: f64,
    pub spread: f64,
    pub mid_price: f64,
    pub imbalance: f64,
    pub liquidity_score: f64,
}

// One observation in a market's rolling history
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolatilitySnapshot {
    pub mid_price: f64,
    pub spread: f64,
    pub total_depth: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolatilityLevel {
    Low,
    Medium,
    High,
}

impl VolatilityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            VolatilityLevel::Low => "low",
            VolatilityLevel::Medium => "medium",
            VolatilityLevel::High => "high",
        }
    }
}

impl std::fmt::Display for VolatilityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolatilityMetrics {
    pub price_volatility: f64,
    pub spread_volatility: f64,
    pub depth_volatility: f64,
    pub volatility_score: f64,
    pub level: VolatilityLevel,
}

impl Default for VolatilityMetrics {
    fn default() -> Self {
        Self {
            price_volatility: 0.0,
            spread_volatility: 0.0,
            depth_volatility: 0.0,
            volatility_score: 0.0,
            level: VolatilityLevel::Low,
        }
    }
}

// Market as listed by the data provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketInfo {
    pub market_id: String,
    pub ticker: String,
    pub quote_denom: String,
    pub base_denom: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSummary {
    pub market_id: String,
    pub ticker: String,
    pub market_status: String,
    pub top_bid: f64,
    pub top_ask: f64,
    /// None when either side of the book has no top price.
    pub spread: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketLiquidity {
    pub market_id: String,
    #[serde(flatten)]
    pub metrics: LiquidityMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedMarket {
    pub market_id: String,
    pub ticker: String,
    pub liquidity: LiquidityMetrics,
}

impl RankedMarket {
    pub fn score(&self) -> f64 {
        self.liquidity.liquidity_score
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub market_id: String,
    pub spread: f64,
    pub summary: MarketSummary,
    pub liquidity: LiquidityMetrics,
    pub volatility: VolatilityMetrics,
}
