use crate::market::trend::classify;
use crate::market::types::{MinuteKline, Trend};
use crate::market::volatility::{overall_volatility, per_minute_volatility};

/// Stability verdict for one monitoring window.
///
/// A window shorter than `required_minutes` is never stable. A clean
/// uptrend is judged by its *local* jitter: every minute's own range
/// must stay within the threshold. A sideways window is judged by its
/// *global* range instead, since local noise direction carries no
/// signal without a trend. A downtrend is never stable; the detector
/// flags dependable-or-flat conditions, not declines.
pub fn is_stable(klines: &[MinuteKline], required_minutes: usize, threshold: f64) -> bool {
    if klines.len() < required_minutes {
        return false;
    }

    match classify(klines) {
        Trend::Up => klines.iter().all(|k| per_minute_volatility(k) <= threshold),
        Trend::Sideways => overall_volatility(klines) <= threshold,
        Trend::Down | Trend::Insufficient => false,
    }
}
