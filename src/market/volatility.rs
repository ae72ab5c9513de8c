use crate::market::types::MinuteKline;

/// Price range of a single minute relative to its low: `(max - min) / min`.
///
/// Upstream prices are strictly positive, so the divisor is never zero.
pub fn per_minute_volatility(kline: &MinuteKline) -> f64 {
    (kline.max - kline.min) / kline.min
}

/// Range over the whole window relative to its global low, taking the
/// global max over klines' `max` and the global min over klines' `min`.
///
/// An empty window has no range; defined as 0.
pub fn overall_volatility(klines: &[MinuteKline]) -> f64 {
    if klines.is_empty() {
        return 0.0;
    }

    let global_max = klines.iter().map(|k| k.max).fold(f64::MIN, f64::max);
    let global_min = klines.iter().map(|k| k.min).fold(f64::MAX, f64::min);

    (global_max - global_min) / global_min
}
