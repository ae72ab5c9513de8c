use parking_lot::Mutex;
use std::collections::HashMap;

/// Per-pair latch turning the stability verdict into an edge-triggered
/// "became stable" event.
///
/// `advance` returns true exactly when a pair transitions from
/// not-notified to notified; a verdict that stays true across passes
/// holds the latch silently, so one sustained stable episode produces
/// one event. A false verdict re-arms the latch.
#[derive(Default)]
pub struct StabilityNotifier {
    notified: Mutex<HashMap<String, bool>>,
}

impl StabilityNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, pair: &str, verdict: bool) -> bool {
        let mut guard = self.notified.lock();
        let latched = guard.entry(pair.to_string()).or_insert(false);

        match (verdict, *latched) {
            (true, false) => {
                *latched = true;
                true
            }
            (false, true) => {
                *latched = false;
                false
            }
            _ => false,
        }
    }
}
