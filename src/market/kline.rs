use std::collections::BTreeMap;

use crate::config::MINUTE_MS;
use crate::market::types::{MinuteKline, Trade};

/// Fold trades into per-minute price summaries.
///
/// Trades older than `now_ms - window_minutes * 60s` are ignored. Each
/// non-empty minute bucket yields one kline with the max, min, and
/// arithmetic average of `price` (quantity is not weighted in). Buckets
/// come out ascending by minute start; empty minutes are omitted.
///
/// Total function: empty input yields an empty sequence.
pub fn aggregate_minutes(records: &[Trade], window_minutes: u64, now_ms: u64) -> Vec<MinuteKline> {
    let cutoff = now_ms.saturating_sub(window_minutes * MINUTE_MS);

    // (max, min, sum, count) per bucket; BTreeMap keeps buckets ordered.
    let mut buckets: BTreeMap<u64, (f64, f64, f64, u64)> = BTreeMap::new();

    for trade in records.iter().filter(|t| t.ts_ms >= cutoff) {
        let minute_start = (trade.ts_ms / MINUTE_MS) * MINUTE_MS;

        buckets
            .entry(minute_start)
            .and_modify(|(max, min, sum, count)| {
                *max = max.max(trade.price);
                *min = min.min(trade.price);
                *sum += trade.price;
                *count += 1;
            })
            .or_insert((trade.price, trade.price, trade.price, 1));
    }

    buckets
        .into_iter()
        .map(|(minute_start_ms, (max, min, sum, count))| MinuteKline {
            minute_start_ms,
            max,
            min,
            avg: sum / count as f64,
        })
        .collect()
}
