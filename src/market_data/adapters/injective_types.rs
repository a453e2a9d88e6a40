// Source: Injective indexer REST gateway (exchange/spot/v1/markets, exchange/spot/v2/orderbook)
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct MarketsResponse {
    #[serde(default)]
    pub markets: Vec<SpotMarket>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotMarket {
    pub market_id: String,
    pub market_status: String,
    pub ticker: String,
    pub base_denom: String,
    pub quote_denom: String,
    // fees, tick sizes and token metadata are ignored for now
}

#[derive(Debug, Deserialize)]
pub struct OrderbookResponse {
    pub orderbook: Option<SpotOrderbook>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SpotOrderbook {
    #[serde(default)]
    pub buys: Vec<PriceLevel>,
    #[serde(default)]
    pub sells: Vec<PriceLevel>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PriceLevel {
    pub price: String,    // decimal string, e.g. "0.000000000023"
    pub quantity: String, // decimal string, e.g. "1500000000000000000"
    #[serde(default)]
    pub timestamp: i64,
}
