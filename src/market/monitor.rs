//! Monitoring pass orchestrator.
//!
//! One pass walks the configured pairs in order: fetch the ticker price
//! and recent trades, merge + prune the trade window, aggregate minute
//! klines, classify the trend, compute volatility, run the stability
//! verdict, and advance the notification latch. A fetch failure skips
//! that pair for the pass without aborting the others.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{info, warn};

use crate::binance::catalog::SymbolCatalog;
use crate::binance::errors::MarketApiError;
use crate::config::AppConfig;
use crate::market::cache::TradeWindowCache;
use crate::market::kline::aggregate_minutes;
use crate::market::notifier::StabilityNotifier;
use crate::market::stability::is_stable;
use crate::market::trend::classify;
use crate::market::types::{PairReport, Trade};
use crate::market::volatility::overall_volatility;
use crate::time::now_ms;

/// Most trades requested per fetch; the upstream caps page size, so a
/// fetch is not exhaustive and results are re-filtered by `since_ms`.
const TRADE_FETCH_LIMIT: u32 = 1000;

/// The market-data endpoints one pass depends on.
#[async_trait]
pub trait MarketDataApi: Send + Sync {
    /// Latest traded price for the symbol.
    async fn ticker_price(&self, symbol: &str) -> Result<f64, MarketApiError>;

    /// Recent trades at or after `since_ms`, in feed order, at most
    /// `limit` records.
    async fn recent_trades(
        &self,
        symbol: &str,
        since_ms: u64,
        limit: u32,
    ) -> Result<Vec<Trade>, MarketApiError>;
}

/// Latest report per pair, last write wins. Read by presentation
/// without touching pass state.
#[derive(Clone, Default)]
pub struct ReportStore {
    inner: Arc<RwLock<HashMap<String, PairReport>>>,
}

impl ReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set(&self, report: PairReport) {
        let mut guard = self.inner.write().await;
        guard.insert(report.pair.clone(), report);
    }

    pub async fn get(&self, pair: &str) -> Option<PairReport> {
        let guard = self.inner.read().await;
        guard.get(pair).cloned()
    }
}

/// Process-wide monitoring state for one session: the rolling trade
/// windows, the notification latches, and the handles the pass needs.
pub struct Monitor<A> {
    api: Arc<A>,
    catalog: Arc<SymbolCatalog>,
    cache: TradeWindowCache,
    notifier: StabilityNotifier,
    reports: ReportStore,

    window_minutes: u64,
    retention_ms: u64,
    stability_threshold: f64,
}

impl<A: MarketDataApi> Monitor<A> {
    pub fn new(api: Arc<A>, catalog: Arc<SymbolCatalog>, cfg: &AppConfig) -> Self {
        Self {
            api,
            catalog,
            cache: TradeWindowCache::new(),
            notifier: StabilityNotifier::new(),
            reports: ReportStore::new(),
            window_minutes: cfg.window_minutes,
            retention_ms: cfg.retention_ms(),
            stability_threshold: cfg.stability_threshold,
        }
    }

    pub fn reports(&self) -> ReportStore {
        self.reports.clone()
    }

    /// Run one monitoring pass over `pairs` at the current wall clock.
    pub async fn run_pass(&self, pairs: &[String]) -> Vec<PairReport> {
        self.run_pass_at(pairs, now_ms()).await
    }

    /// Run one pass with an explicit `now`; pairs are processed strictly
    /// sequentially in the given order.
    pub async fn run_pass_at(&self, pairs: &[String], now_ms: u64) -> Vec<PairReport> {
        let mut out = Vec::with_capacity(pairs.len());

        for pair in pairs {
            match self.observe_pair(pair, now_ms).await {
                Ok(report) => {
                    self.reports.set(report.clone()).await;
                    out.push(report);
                }
                Err(e) => {
                    warn!(pair = %pair, error = %e, "fetch failed; pair skipped this pass");
                }
            }
        }

        out
    }

    async fn observe_pair(&self, pair: &str, now_ms: u64) -> Result<PairReport, MarketApiError> {
        let price = self.api.ticker_price(pair).await?;

        let since_ms = now_ms.saturating_sub(self.retention_ms);
        let mut trades = self
            .api
            .recent_trades(pair, since_ms, TRADE_FETCH_LIMIT)
            .await?;
        // The upstream bound is the page limit, not the time range.
        trades.retain(|t| t.ts_ms >= since_ms);

        self.cache.merge(pair, trades);
        self.cache.prune(pair, now_ms, self.retention_ms);

        let window = self.cache.snapshot(pair);
        let klines = aggregate_minutes(&window, self.window_minutes, now_ms);
        let trend = classify(&klines);
        let volatility = overall_volatility(&klines);
        let stable = is_stable(&klines, self.window_minutes as usize, self.stability_threshold);
        let just_notified = self.notifier.advance(pair, stable);

        let display_name = self.catalog.display_name(pair);

        if just_notified {
            info!(
                pair = %display_name,
                price,
                volatility,
                "pair entered stable regime"
            );
        }

        Ok(PairReport {
            pair: pair.to_string(),
            display_name,
            price,
            klines,
            trend,
            overall_volatility: volatility,
            stable,
            just_notified,
            ts_ms: now_ms,
        })
    }
}

/// Recurring monitoring loop.
///
/// One pass is fully awaited per tick; a tick that fires while a pass
/// is still in flight is skipped, so passes never interleave and the
/// per-pair windows are only ever mutated by one pass at a time.
pub async fn run_monitor_loop<A: MarketDataApi>(
    monitor: Arc<Monitor<A>>,
    pairs: Vec<String>,
    poll_every: Duration,
) {
    let mut ticker = interval(poll_every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!(
        pairs = pairs.len(),
        every_ms = poll_every.as_millis() as u64,
        "monitor loop started"
    );

    loop {
        ticker.tick().await;

        let reports = monitor.run_pass(&pairs).await;

        for report in &reports {
            let last_minute = report
                .klines
                .last()
                .map(|k| minute_label(k.minute_start_ms))
                .unwrap_or_else(|| "-".to_string());

            info!(
                pair = %report.display_name,
                price = report.price,
                minutes = report.klines.len(),
                last_minute = %last_minute,
                trend = ?report.trend,
                volatility = report.overall_volatility,
                stable = report.stable,
                "pass result"
            );
        }
    }
}

fn minute_label(minute_start_ms: u64) -> String {
    DateTime::<Utc>::from_timestamp_millis(minute_start_ms as i64)
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| minute_start_ms.to_string())
}
