// Numerical core: pure liquidity figures, rolling volatility, ranking
pub mod types;
pub mod liquidity;
pub mod volatility;
pub mod ranking;
