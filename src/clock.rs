use crate::config::Millis;

/// Turns wall-clock time into discrete moves. At most one tick fires per
/// call, however late the caller is.
#[derive(Clone, Debug)]
pub struct SimClock {
    base_interval_ms: Millis,
    last_tick: Millis,
}

impl SimClock {
    pub fn new(base_interval_ms: Millis, start: Millis) -> Self {
        SimClock { base_interval_ms, last_tick: start }
    }

    #[cfg(test)]
    pub fn last_tick(&self) -> Millis {
        self.last_tick
    }

    pub fn effective_interval(&self, multiplier: f64) -> Millis {
        (self.base_interval_ms as f64 * multiplier) as Millis
    }

    pub fn tick(&mut self, now: Millis, multiplier: f64) -> bool {
        if now.saturating_sub(self.last_tick) < self.effective_interval(multiplier) {
            return false;
        }
        self.last_tick = now;
        true
    }
}
