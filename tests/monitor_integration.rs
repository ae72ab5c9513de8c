use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing_test::traced_test;

use calmscan::binance::catalog::SymbolCatalog;
use calmscan::binance::errors::MarketApiError;
use calmscan::config::AppConfig;
use calmscan::market::monitor::{MarketDataApi, Monitor};
use calmscan::market::types::{Trade, Trend};

// -----------------------
// Mock market-data API
// -----------------------

/// Scripted API: each `recent_trades` call pops the next batch for the
/// symbol; pairs listed as failing error on every call.
#[derive(Default)]
struct MockApi {
    prices: Mutex<HashMap<String, f64>>,
    batches: Mutex<HashMap<String, VecDeque<Vec<Trade>>>>,
    failing: Mutex<HashSet<String>>,
}

impl MockApi {
    fn set_price(&self, symbol: &str, price: f64) {
        self.prices.lock().insert(symbol.to_string(), price);
    }

    fn push_batch(&self, symbol: &str, trades: Vec<Trade>) {
        self.batches
            .lock()
            .entry(symbol.to_string())
            .or_default()
            .push_back(trades);
    }

    fn fail(&self, symbol: &str) {
        self.failing.lock().insert(symbol.to_string());
    }
}

#[async_trait]
impl MarketDataApi for MockApi {
    async fn ticker_price(&self, symbol: &str) -> Result<f64, MarketApiError> {
        if self.failing.lock().contains(symbol) {
            return Err(MarketApiError::Timeout);
        }
        self.prices
            .lock()
            .get(symbol)
            .copied()
            .ok_or(MarketApiError::NotFound)
    }

    async fn recent_trades(
        &self,
        symbol: &str,
        _since_ms: u64,
        _limit: u32,
    ) -> Result<Vec<Trade>, MarketApiError> {
        if self.failing.lock().contains(symbol) {
            return Err(MarketApiError::Timeout);
        }
        Ok(self
            .batches
            .lock()
            .get_mut(symbol)
            .and_then(|q| q.pop_front())
            .unwrap_or_default())
    }
}

// -----------------------
// Helpers
// -----------------------

const PAIR: &str = "ABCUSDT";

fn test_config() -> AppConfig {
    AppConfig {
        api_url: "http://unused".to_string(),
        pairs: vec![PAIR.to_string()],
        refresh_secs: 5,
        stability_threshold: 0.001,
        window_minutes: 3,
        retention_minutes: 10,
    }
}

fn trade(id: u64, ts_ms: u64, price: f64) -> Trade {
    Trade {
        id,
        ts_ms,
        price,
        qty: 1.0,
    }
}

/// Three minute buckets with strictly rising averages and every
/// minute's own range within 0.1% of its low.
fn tight_uptrend(base_ts: u64, first_id: u64) -> Vec<Trade> {
    vec![
        trade(first_id, base_ts + 10_000, 100.00),
        trade(first_id + 1, base_ts + 20_000, 100.05),
        trade(first_id + 2, base_ts + 70_000, 100.02),
        trade(first_id + 3, base_ts + 80_000, 100.06),
        trade(first_id + 4, base_ts + 130_000, 100.03),
        trade(first_id + 5, base_ts + 140_000, 100.08),
    ]
}

fn monitor_with(api: Arc<MockApi>) -> Monitor<MockApi> {
    Monitor::new(api, Arc::new(SymbolCatalog::empty()), &test_config())
}

// -----------------------
// Scenarios
// -----------------------

#[tokio::test]
async fn tight_uptrend_becomes_stable_and_notifies_once() {
    let api = Arc::new(MockApi::default());
    api.set_price(PAIR, 100.08);
    api.push_batch(PAIR, tight_uptrend(0, 1));

    let monitor = monitor_with(Arc::clone(&api));
    let pairs = vec![PAIR.to_string()];

    let reports = monitor.run_pass_at(&pairs, 180_000).await;
    assert_eq!(reports.len(), 1);

    let r = &reports[0];
    assert_eq!(r.trend, Trend::Up);
    assert_eq!(r.klines.len(), 3);
    assert!(r.stable);
    assert!(r.just_notified, "first stable pass must emit");

    // Same window on the next pass: still stable, no second emission.
    let reports = monitor.run_pass_at(&pairs, 180_000).await;
    assert!(reports[0].stable);
    assert!(!reports[0].just_notified, "sustained episode must stay quiet");
}

#[tokio::test]
async fn notifier_rearms_after_an_unstable_stretch() {
    let api = Arc::new(MockApi::default());
    api.set_price(PAIR, 100.0);

    // Phase 1: stable uptrend.
    api.push_batch(PAIR, tight_uptrend(0, 1));
    // Phase 2: 700s later (old window pruned), a clean decline.
    api.push_batch(
        PAIR,
        vec![
            trade(101, 710_000, 100.06),
            trade(102, 770_000, 100.03),
            trade(103, 830_000, 100.00),
        ],
    );
    // Phase 3: another 700s, a fresh tight uptrend.
    api.push_batch(PAIR, tight_uptrend(1_400_000, 201));

    let monitor = monitor_with(Arc::clone(&api));
    let pairs = vec![PAIR.to_string()];

    let r1 = monitor.run_pass_at(&pairs, 180_000).await;
    assert!(r1[0].stable);
    assert!(r1[0].just_notified);

    let r2 = monitor.run_pass_at(&pairs, 880_000).await;
    assert_eq!(r2[0].trend, Trend::Down);
    assert!(!r2[0].stable);
    assert!(!r2[0].just_notified);

    let r3 = monitor.run_pass_at(&pairs, 1_580_000).await;
    assert!(r3[0].stable);
    assert!(r3[0].just_notified, "re-entry into stability must emit again");
}

#[tokio::test]
async fn trade_window_accumulates_across_passes() {
    let api = Arc::new(MockApi::default());
    api.set_price(PAIR, 100.0);

    let all = tight_uptrend(0, 1);
    // First pass sees only the first two minutes; second pass delivers
    // the rest plus an overlap of already-seen ids.
    api.push_batch(PAIR, all[..4].to_vec());
    api.push_batch(PAIR, all[2..].to_vec());

    let monitor = monitor_with(Arc::clone(&api));
    let pairs = vec![PAIR.to_string()];

    let r1 = monitor.run_pass_at(&pairs, 150_000).await;
    assert_eq!(r1[0].klines.len(), 2);
    assert!(!r1[0].stable, "two minutes cannot satisfy a three-minute window");

    let r2 = monitor.run_pass_at(&pairs, 180_000).await;
    assert_eq!(r2[0].klines.len(), 3);
    assert!(r2[0].stable);
    assert!(r2[0].just_notified);
}

#[traced_test]
#[tokio::test]
async fn failing_pair_is_skipped_without_aborting_the_pass() {
    let api = Arc::new(MockApi::default());
    api.set_price("GOODUSDT", 100.0);
    api.push_batch("GOODUSDT", vec![trade(1, 170_000, 100.0)]);
    api.fail("BADUSDT");

    let monitor = monitor_with(Arc::clone(&api));
    let pairs = vec!["BADUSDT".to_string(), "GOODUSDT".to_string()];

    let reports = monitor.run_pass_at(&pairs, 180_000).await;

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].pair, "GOODUSDT");
    assert!(logs_contain("pair skipped this pass"));
}

#[tokio::test]
async fn latest_report_is_available_in_the_store() {
    let api = Arc::new(MockApi::default());
    api.set_price(PAIR, 100.08);
    api.push_batch(PAIR, tight_uptrend(0, 1));

    let monitor = monitor_with(Arc::clone(&api));
    let reports = monitor.reports();

    assert!(reports.get(PAIR).await.is_none());

    monitor.run_pass_at(&[PAIR.to_string()], 180_000).await;

    let stored = reports.get(PAIR).await.expect("report stored");
    assert!(stored.stable);
    // Catalog is empty, so the display name degrades to the raw symbol.
    assert_eq!(stored.display_name, PAIR);
}
