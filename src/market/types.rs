/// One executed trade as reported by the upstream aggregate-trade feed.
///
/// Immutable after ingestion; owned by the per-pair trade window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trade {
    /// Upstream aggregate-trade id, unique within a pair's history.
    pub id: u64,
    /// Execution time, ms since epoch.
    pub ts_ms: u64,
    pub price: f64,
    pub qty: f64,
}

/// Per-minute price summary derived from the trades in that minute.
///
/// `minute_start_ms` is the trade timestamp truncated to a 60s boundary.
/// Recomputed fresh from the trade window on every pass, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinuteKline {
    pub minute_start_ms: u64,
    pub max: f64,
    pub min: f64,
    pub avg: f64,
}

/// Short-term price direction over the monitoring window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    /// Fewer than two minute buckets; direction undefined.
    Insufficient,
    /// Average price strictly increased at every minute step.
    Up,
    /// Average price strictly decreased at every minute step.
    Down,
    /// Mixed or flat; any single reversal lands here.
    Sideways,
}

/// Result of one monitoring pass for one pair.
#[derive(Debug, Clone)]
pub struct PairReport {
    pub pair: String,
    pub display_name: String,
    /// Latest ticker price at pass time.
    pub price: f64,
    pub klines: Vec<MinuteKline>,
    pub trend: Trend,
    pub overall_volatility: f64,
    pub stable: bool,
    /// True exactly on the pass where the pair entered the stable regime.
    pub just_notified: bool,
    pub ts_ms: u64,
}
