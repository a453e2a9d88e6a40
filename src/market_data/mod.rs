// Market data module entrypoint
pub mod adapters;   // provider seam + venue/fixture implementations
pub mod normaliser; // converts wire strings -> typed levels
pub mod service;    // market queries built on a provider
pub mod analytics;  // summary + liquidity + volatility facade
