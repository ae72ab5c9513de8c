use crate::market::types::{MinuteKline, Trend};

/// Classify the direction of a kline sequence by its minute averages.
///
/// All-or-nothing monotonicity, not a majority vote: every consecutive
/// step must strictly rise for `Up` (or strictly fall for `Down`); a
/// single reversal or flat step anywhere makes the window `Sideways`.
pub fn classify(klines: &[MinuteKline]) -> Trend {
    if klines.len() < 2 {
        return Trend::Insufficient;
    }

    let mut rising = 0usize;
    let mut falling = 0usize;

    for pair in klines.windows(2) {
        if pair[1].avg > pair[0].avg {
            rising += 1;
        } else if pair[1].avg < pair[0].avg {
            falling += 1;
        }
        // Equal averages count toward neither direction.
    }

    let steps = klines.len() - 1;
    if rising == steps {
        Trend::Up
    } else if falling == steps {
        Trend::Down
    } else {
        Trend::Sideways
    }
}
