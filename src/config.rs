use std::time::Duration;

pub const MINUTE_MS: u64 = 60_000;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Base URL of the market-data API.
    pub api_url: String,

    /// Symbols to monitor, in pass iteration order.
    pub pairs: Vec<String>,

    // =========================
    // Monitoring configuration
    // =========================
    /// Seconds between monitoring passes.
    ///
    /// Kept at 5s or above to stay inside upstream rate limits;
    /// a pass that overruns the interval causes the next tick to
    /// be skipped rather than queued.
    pub refresh_secs: u64,

    /// Stability threshold as a price fraction
    /// (0.0015 = price range within 0.15%).
    pub stability_threshold: f64,

    /// Length of the window trend/stability are judged over, in minutes.
    ///
    /// Must be >= 2: trend classification needs at least two
    /// minute buckets to compare.
    pub window_minutes: u64,

    /// Maximum age of trades kept in the rolling cache, in minutes.
    ///
    /// Must be >= `window_minutes`, otherwise the aggregator could
    /// never see a full monitoring window.
    pub retention_minutes: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let api_url = std::env::var("BINANCE_API_URL")
            .unwrap_or_else(|_| "https://api.binance.com".to_string());

        let pairs = std::env::var("CALMSCAN_PAIRS")
            .unwrap_or_else(|_| "BTCUSDT,ETHUSDT".to_string())
            .split(',')
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();

        let refresh_secs = env_u64("CALMSCAN_REFRESH_SECS", 10).max(5);
        let stability_threshold = env_f64("CALMSCAN_THRESHOLD", 0.0015);
        let window_minutes = env_u64("CALMSCAN_WINDOW_MINUTES", 3).max(2);
        let retention_minutes = env_u64("CALMSCAN_RETENTION_MINUTES", 10).max(window_minutes);

        Self {
            api_url,
            pairs,
            refresh_secs,
            stability_threshold,
            window_minutes,
            retention_minutes,
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }

    pub fn retention_ms(&self) -> u64 {
        self.retention_minutes * MINUTE_MS
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_f64(key: &str, default: f64) -> f64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
