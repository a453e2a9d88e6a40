//! Rolling per-market snapshot history and the dispersion figures derived from it.
//!
//! The tracker is an explicitly owned store: build one at start-up and hand an
//! `Arc<VolatilityTracker>` to whoever records or reads history. Each market has
//! its own window behind its own lock, so markets never contend with each other.

use std::collections::VecDeque;
use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::{Mutex, RwLock};

use crate::engine::types::{VolatilityLevel, VolatilityMetrics, VolatilitySnapshot};

/// Snapshots kept per market; older ones are evicted first.
pub const WINDOW_SIZE: usize = 20;

const PRICE_WEIGHT: f64 = 0.5;
const SPREAD_WEIGHT: f64 = 0.3;
const DEPTH_WEIGHT: f64 = 0.2;

const MEDIUM_THRESHOLD: f64 = 0.005;
const HIGH_THRESHOLD: f64 = 0.02;

/// Population standard deviation; zero for fewer than two values.
fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = mean(values);
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

// Dispersion relative to the window mean; a zero mean gives zero
fn normalised(std: f64, values: &[f64]) -> f64 {
    let m = mean(values);
    if m == 0.0 {
        0.0
    } else {
        std / m
    }
}

pub fn classify(score: f64) -> VolatilityLevel {
    if score < MEDIUM_THRESHOLD {
        VolatilityLevel::Low
    } else if score < HIGH_THRESHOLD {
        VolatilityLevel::Medium
    } else {
        VolatilityLevel::High
    }
}

/// Fixed-capacity FIFO of snapshots for one market.
#[derive(Debug, Clone, Default)]
pub struct VolatilityWindow {
    snapshots: VecDeque<VolatilitySnapshot>,
}

impl VolatilityWindow {
    pub fn new() -> Self {
        Self { snapshots: VecDeque::with_capacity(WINDOW_SIZE + 1) }
    }

    pub fn push(&mut self, snapshot: VolatilitySnapshot) {
        self.snapshots.push_back(snapshot);
        if self.snapshots.len() > WINDOW_SIZE {
            self.snapshots.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VolatilitySnapshot> {
        self.snapshots.iter()
    }

    /// Price and depth dispersion are normalised by their window means; spread
    /// dispersion is reported in absolute price units.
    pub fn metrics(&self) -> VolatilityMetrics {
        if self.snapshots.is_empty() {
            return VolatilityMetrics::default();
        }

        let mid_prices: Vec<f64> = self.snapshots.iter().map(|s| s.mid_price).collect();
        let spreads: Vec<f64> = self.snapshots.iter().map(|s| s.spread).collect();
        let depths: Vec<f64> = self.snapshots.iter().map(|s| s.total_depth).collect();

        let price_volatility = normalised(std_dev(&mid_prices), &mid_prices);
        let spread_volatility = std_dev(&spreads);
        let depth_volatility = normalised(std_dev(&depths), &depths);

        let volatility_score = price_volatility * PRICE_WEIGHT
            + spread_volatility * SPREAD_WEIGHT
            + depth_volatility * DEPTH_WEIGHT;

        VolatilityMetrics {
            price_volatility,
            spread_volatility,
            depth_volatility,
            volatility_score,
            level: classify(volatility_score),
        }
    }
}

/// Market id -> rolling window. Windows are created lazily and live as long as the tracker.
#[derive(Debug, Default)]
pub struct VolatilityTracker {
    windows: RwLock<AHashMap<String, Arc<Mutex<VolatilityWindow>>>>,
}

impl VolatilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn window(&self, market_id: &str) -> Option<Arc<Mutex<VolatilityWindow>>> {
        self.windows.read().get(market_id).cloned()
    }

    fn window_or_insert(&self, market_id: &str) -> Arc<Mutex<VolatilityWindow>> {
        if let Some(window) = self.window(market_id) {
            return window;
        }
        let mut windows = self.windows.write();
        Arc::clone(
            windows
                .entry(market_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(VolatilityWindow::new()))),
        )
    }

    pub fn add_snapshot(&self, market_id: &str, snapshot: VolatilitySnapshot) {
        self.window_or_insert(market_id).lock().push(snapshot);
    }

    /// Figures over whatever the window holds right now; unknown markets read as empty.
    pub fn compute_volatility(&self, market_id: &str) -> VolatilityMetrics {
        match self.window(market_id) {
            Some(window) => window.lock().metrics(),
            None => VolatilityMetrics::default(),
        }
    }

    /// Append and compute under a single hold of the market's lock, so the
    /// result always includes `snapshot`.
    pub fn observe(&self, market_id: &str, snapshot: VolatilitySnapshot) -> VolatilityMetrics {
        let window = self.window_or_insert(market_id);
        let mut guard = window.lock();
        guard.push(snapshot);
        guard.metrics()
    }

    /// Copy of the market's history, oldest first.
    pub fn snapshots(&self, market_id: &str) -> Vec<VolatilitySnapshot> {
        self.window(market_id)
            .map(|w| w.lock().iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn market_count(&self) -> usize {
        self.windows.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::thread;

    fn snap(mid_price: f64, spread: f64, total_depth: f64) -> VolatilitySnapshot {
        VolatilitySnapshot { mid_price, spread, total_depth }
    }

    #[test]
    fn test_window_keeps_last_twenty() {
        let tracker = VolatilityTracker::new();
        for i in 1..=25 {
            tracker.add_snapshot("inj-usdt", snap(i as f64, 0.0, 0.0));
        }
        let history = tracker.snapshots("inj-usdt");
        assert_eq!(history.len(), WINDOW_SIZE);
        let mids: Vec<f64> = history.iter().map(|s| s.mid_price).collect();
        let expected: Vec<f64> = (6..=25).map(|i| i as f64).collect();
        assert_eq!(mids, expected);
    }

    #[test]
    fn test_unknown_market_is_low_and_zero() {
        let tracker = VolatilityTracker::new();
        let m = tracker.compute_volatility("missing");
        assert_eq!(m, VolatilityMetrics::default());
        assert_eq!(m.level, VolatilityLevel::Low);
        // reading does not create a window
        assert_eq!(tracker.market_count(), 0);
    }

    #[test]
    fn test_single_snapshot_is_zero() {
        let tracker = VolatilityTracker::new();
        tracker.add_snapshot("m", snap(100.0, 1.0, 5000.0));
        let m = tracker.compute_volatility("m");
        assert_eq!(m.volatility_score, 0.0);
        assert_eq!(m.level, VolatilityLevel::Low);
    }

    #[test]
    fn test_metrics_over_two_snapshots() {
        let tracker = VolatilityTracker::new();
        tracker.add_snapshot("m", snap(99.0, 1.0, 900.0));
        tracker.add_snapshot("m", snap(101.0, 3.0, 1100.0));
        let m = tracker.compute_volatility("m");

        // std(99, 101) = 1, mean = 100
        assert!((m.price_volatility - 0.01).abs() < 1e-12);
        // spread stays in absolute units: std(1, 3) = 1
        assert!((m.spread_volatility - 1.0).abs() < 1e-12);
        // std(900, 1100) = 100, mean = 1000
        assert!((m.depth_volatility - 0.1).abs() < 1e-12);
        let expected = 0.5 * 0.01 + 0.3 * 1.0 + 0.2 * 0.1;
        assert!((m.volatility_score - expected).abs() < 1e-12);
        assert_eq!(m.level, VolatilityLevel::High);
    }

    #[test]
    fn test_zero_mean_price_does_not_divide() {
        let tracker = VolatilityTracker::new();
        tracker.add_snapshot("m", snap(-1.0, 0.0, 0.0));
        tracker.add_snapshot("m", snap(1.0, 0.0, 0.0));
        let m = tracker.compute_volatility("m");
        assert_eq!(m.price_volatility, 0.0);
        assert_eq!(m.depth_volatility, 0.0);
        assert!(m.volatility_score.is_finite());
    }

    #[test]
    fn test_classification_boundaries() {
        assert_eq!(classify(0.0), VolatilityLevel::Low);
        assert_eq!(classify(0.0049999), VolatilityLevel::Low);
        assert_eq!(classify(0.005), VolatilityLevel::Medium);
        assert_eq!(classify(0.0199999), VolatilityLevel::Medium);
        assert_eq!(classify(0.02), VolatilityLevel::High);
    }

    #[test]
    fn test_observe_includes_new_snapshot() {
        let tracker = VolatilityTracker::new();
        tracker.add_snapshot("m", snap(100.0, 0.0, 1000.0));
        let m = tracker.observe("m", snap(102.0, 0.0, 1000.0));
        assert!(m.price_volatility > 0.0);
        assert_eq!(tracker.snapshots("m").len(), 2);
    }

    #[test]
    fn test_markets_are_independent() {
        let tracker = VolatilityTracker::new();
        tracker.add_snapshot("a", snap(1.0, 0.0, 1.0));
        tracker.add_snapshot("a", snap(2.0, 0.0, 1.0));
        tracker.add_snapshot("b", snap(5.0, 0.0, 1.0));
        assert_eq!(tracker.snapshots("a").len(), 2);
        assert_eq!(tracker.snapshots("b").len(), 1);
        assert_eq!(tracker.market_count(), 2);
    }

    #[test]
    fn test_concurrent_adds_are_not_lost() {
        let tracker = Arc::new(VolatilityTracker::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let tracker = Arc::clone(&tracker);
                thread::spawn(move || {
                    for i in 0..2 {
                        tracker.add_snapshot("shared", snap((t * 10 + i) as f64, 0.0, 0.0));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        // 16 appends, none evicted
        assert_eq!(tracker.snapshots("shared").len(), 16);
    }

    proptest! {
        #[test]
        fn prop_window_never_exceeds_capacity(n in 0usize..100) {
            let mut window = VolatilityWindow::new();
            for i in 0..n {
                window.push(snap(i as f64, 0.0, 0.0));
            }
            prop_assert_eq!(window.len(), n.min(WINDOW_SIZE));
            if n > 0 {
                let last = window.iter().last().map(|s| s.mid_price);
                prop_assert_eq!(last, Some((n - 1) as f64));
            }
        }

        #[test]
        fn prop_score_never_negative(
            mids in prop::collection::vec(0.0f64..1e6, 0..40),
        ) {
            let mut window = VolatilityWindow::new();
            for m in &mids {
                window.push(snap(*m, 0.1, 10.0));
            }
            prop_assert!(window.metrics().volatility_score >= 0.0);
        }
    }
}
