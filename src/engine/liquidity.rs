//! Point-in-time liquidity figures for one order book.
//!
//! Everything here is a pure function over the supplied levels. The caller owns
//! the ordering of each side (best level first); nothing is sorted here.

use crate::engine::types::{LiquidityMetrics, OrderLevel};

/// Number of levels per side summed when the caller does not say otherwise.
pub const DEFAULT_DEPTH: usize = 10;

const SPREAD_PENALTY_WEIGHT: f64 = 10.0;
const IMBALANCE_PENALTY_WEIGHT: f64 = 5.0;

/// Round half away from zero at `decimals` places. Negative zero comes back as `0.0`.
///
/// Values too large to scale (beyond roughly 1e300) are returned unchanged.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / scale + 0.0
}

/// Top-of-book spread, or None when either top price is missing (zero).
pub fn calculate_spread(top_bid: f64, top_ask: f64) -> Option<f64> {
    if top_bid == 0.0 || top_ask == 0.0 {
        return None;
    }
    Some(round_to(top_ask - top_bid, 6))
}

fn side_depth(levels: &[OrderLevel], depth: usize) -> f64 {
    levels.iter().take(depth).map(OrderLevel::notional).sum()
}

/// Depth, spread, imbalance and composite score over the first `depth` levels of each side.
///
/// Empty sides contribute zero depth and a zero top price, so `compute_liquidity(&[], &[], n)`
/// yields all zeros (the score is `ln(1) = 0`).
pub fn compute_liquidity(buys: &[OrderLevel], sells: &[OrderLevel], depth: usize) -> LiquidityMetrics {
    let total_bid_depth = side_depth(buys, depth);
    let total_ask_depth = side_depth(sells, depth);
    let total_depth = total_bid_depth + total_ask_depth;

    let top_bid = if depth > 0 { buys.first().map(|l| l.price).unwrap_or(0.0) } else { 0.0 };
    let top_ask = if depth > 0 { sells.first().map(|l| l.price).unwrap_or(0.0) } else { 0.0 };

    let mid_price = (top_bid + top_ask) / 2.0;
    let spread = top_ask - top_bid;

    let floored_depth = total_depth.max(1.0);
    let imbalance = (total_bid_depth - total_ask_depth) / floored_depth;

    let depth_score = floored_depth.ln();
    let spread_penalty = if mid_price != 0.0 { spread / mid_price } else { 0.0 };
    let imbalance_penalty = imbalance.abs();

    let liquidity_score = depth_score
        - spread_penalty * SPREAD_PENALTY_WEIGHT
        - imbalance_penalty * IMBALANCE_PENALTY_WEIGHT;

    LiquidityMetrics {
        total_bid_depth: round_to(total_bid_depth, 2),
        total_ask_depth: round_to(total_ask_depth, 2),
        total_depth: round_to(total_depth, 2),
        spread: round_to(spread, 6),
        mid_price: round_to(mid_price, 6),
        imbalance: round_to(imbalance, 6),
        liquidity_score: round_to(liquidity_score, 4),
    }
}
