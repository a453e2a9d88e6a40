// Convert wire strings into typed order levels once, at ingestion.
// The engine only ever sees finite, non-negative f64 prices and quantities.

use crate::engine::types::OrderLevel;
use crate::market_data::adapters::{ProviderError, ProviderResult};

fn check_value(field: &str, value: f64) -> ProviderResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(ProviderError::Malformed(format!("{field} {value} out of range")));
    }
    Ok(value)
}

fn parse_decimal(field: &str, s: &str) -> ProviderResult<f64> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| ProviderError::Malformed(format!("{field} {s:?} is not a number")))?;
    check_value(field, value)
}

/// Reject levels that already arrived as numbers but are unusable.
pub fn check_level(level: &OrderLevel) -> ProviderResult<()> {
    check_value("price", level.price)?;
    check_value("quantity", level.quantity)?;
    Ok(())
}

pub fn level_from_strings(price: &str, quantity: &str) -> ProviderResult<OrderLevel> {
    Ok(OrderLevel {
        price: parse_decimal("price", price)?,
        quantity: parse_decimal("quantity", quantity)?,
    })
}

/// Normalise a whole side, keeping the provider's ordering.
pub fn normalise_side<'a, I>(levels: I) -> ProviderResult<Vec<OrderLevel>>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    levels
        .into_iter()
        .map(|(price, quantity)| level_from_strings(price, quantity))
        .collect()
}
