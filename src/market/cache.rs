use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::market::types::Trade;

#[derive(Debug, Default)]
struct PairTrades {
    /// Arrival-ordered records. Each contributing fetch is internally
    /// ordered by the feed, but the collection is never re-sorted, so
    /// callers must not assume global timestamp ordering.
    trades: Vec<Trade>,
    /// Ids currently held in `trades`.
    seen: HashSet<u64>,
}

/// Rolling per-pair store of recent trades.
///
/// Guarantees:
/// - No two retained records share an id (dedup across overlapping fetches).
/// - After `prune(now, retention)`, every retained record satisfies
///   `ts_ms >= now - retention`.
///
/// Entries are created lazily on first merge and live for the process
/// lifetime of the monitoring session.
#[derive(Default)]
pub struct TradeWindowCache {
    inner: Mutex<HashMap<String, PairTrades>>,
}

impl TradeWindowCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append records whose id is not already present for the pair,
    /// preserving their arrival order after existing records.
    pub fn merge(&self, pair: &str, new_records: Vec<Trade>) {
        let mut guard = self.inner.lock();
        let entry = guard.entry(pair.to_string()).or_default();

        let before = entry.trades.len();
        for trade in new_records {
            if entry.seen.insert(trade.id) {
                entry.trades.push(trade);
            }
        }

        debug!(
            pair = %pair,
            added = entry.trades.len() - before,
            total = entry.trades.len(),
            "trade window merged"
        );
    }

    /// Drop every record older than `now_ms - retention_ms`.
    /// Must run after each merge to keep memory bounded.
    pub fn prune(&self, pair: &str, now_ms: u64, retention_ms: u64) {
        let cutoff = now_ms.saturating_sub(retention_ms);

        let mut guard = self.inner.lock();
        let Some(entry) = guard.get_mut(pair) else {
            return;
        };

        let expired: Vec<u64> = entry
            .trades
            .iter()
            .filter(|t| t.ts_ms < cutoff)
            .map(|t| t.id)
            .collect();

        if expired.is_empty() {
            return;
        }

        entry.trades.retain(|t| t.ts_ms >= cutoff);
        for id in &expired {
            entry.seen.remove(id);
        }

        debug!(
            pair = %pair,
            expired = expired.len(),
            remaining = entry.trades.len(),
            "trade window pruned"
        );
    }

    /// Ordered copy of the pair's retained records; empty if the pair
    /// has never been merged.
    pub fn snapshot(&self, pair: &str) -> Vec<Trade> {
        let guard = self.inner.lock();
        guard
            .get(pair)
            .map(|e| e.trades.clone())
            .unwrap_or_default()
    }
}
